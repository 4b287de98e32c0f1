use nom::number::complete::le_u8;
use nom::sequence::tuple;

use crate::error::Error;
use crate::frame::components::FrameControl;
use crate::frame::*;
use crate::parsers::{parse_management_header, parse_wnm_body};

/// Parse an action frame.
///
/// The general structure is:
/// - ManagementHeader
/// - Category
/// - Action code
/// - Action specific body
///
/// WNM frames with a known action code are parsed into a [WnmAction],
/// everything else is returned as a generic [Action].
pub fn parse_action(frame_control: FrameControl, input: &[u8]) -> Result<Frame, Error> {
    let (input, header) = parse_management_header(frame_control, input)?;
    let (body, (category, action)) = tuple((le_u8, le_u8))(input)?;
    let category = ActionCategory::from(category);

    if category == ActionCategory::Wnm {
        let code = WnmActionCode::from(action);
        if !matches!(code, WnmActionCode::Unknown(_)) {
            let body = parse_wnm_body(code, body)?;
            return Ok(Frame::Wnm(WnmAction { header, body }));
        }
    }

    Ok(Frame::Action(Action {
        header,
        category,
        action,
        body: body.to_vec(),
    }))
}
