use crate::utils::varint::{read_len_delimited, VarUInt64};
use crate::utils::DecodeError;
use crate::wire::WireKind;

#[inline(always)]
fn advance(buf: &[u8], pos: usize, n: usize) -> Result<usize, DecodeError> {
    match pos.checked_add(n) {
        Some(end) if end <= buf.len() => Ok(end),
        _ => Err(DecodeError::Truncated),
    }
}

/// Moves past the payload of a field whose tag, of kind `wire`, ends at `pos`,
/// returning the cursor after it. Nothing is interpreted beyond the framing.
///
/// Legacy groups are walked as balanced start/end pairs. Tags inside a group
/// are only inspected for their wire kind.
pub fn skip_field(buf: &[u8], pos: usize, wire: WireKind) -> Result<usize, DecodeError> {
    let mut depth = 0usize;
    let mut pos = pos;
    let mut wire = wire;
    loop {
        pos = match wire {
            WireKind::Varint => VarUInt64::read(buf, pos)?.1,
            WireKind::Fixed64 => advance(buf, pos, 8)?,
            WireKind::Fixed32 => advance(buf, pos, 4)?,
            WireKind::LengthDelimited => read_len_delimited(buf, pos)?.1,
            WireKind::StartGroup => {
                depth += 1;
                pos
            }
            WireKind::EndGroup => {
                if depth == 0 {
                    return Err(DecodeError::UnexpectedEndOfGroup);
                }
                depth -= 1;
                pos
            }
        };

        if depth == 0 {
            return Ok(pos);
        }

        // still inside a group, a missing end marker surfaces as Truncated here
        let (key, next) = VarUInt64::read(buf, pos)?;
        wire = WireKind::try_from((key & 0x7) as u8)?;
        pos = next;
    }
}
