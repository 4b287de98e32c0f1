mod management;
mod wnm;

pub use management::*;
pub use wnm::*;
