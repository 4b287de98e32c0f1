use enum_dispatch::enum_dispatch;

/// Contains structs representing recurring sets of structured data.
/// For instance, MAC-Addresses, default headers, etc.
pub mod components;

/// Management frame structs
mod management;
/// Bounded buffer used by all encoders.
pub mod writer;

pub use management::*;
pub use writer::FrameWriter;

#[enum_dispatch(Addresses)]
#[derive(Clone, Debug)]
/// This represents all currently supported payloads for action frames.
/// Each variant is represented by its own struct.
///
/// WNM frames with a known action code get their own typed variant,
/// every other action frame is kept as a generic [Action].
pub enum Frame {
    Wnm(WnmAction),
    Action(Action),
}
