use std::fmt;

use crate::utils::varint::VarUInt64;
use crate::utils::DecodeError;

/// Largest field number a tag may carry.
pub const MAX_FIELD_NUMBER: u32 = (1 << 29) - 1;

/// Physical encoding of a field payload, the low three bits of every tag.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WireKind {
    Varint = 0,
    Fixed64 = 1,
    LengthDelimited = 2,
    StartGroup = 3,
    EndGroup = 4,
    Fixed32 = 5,
}

impl TryFrom<u8> for WireKind {
    type Error = DecodeError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Ok(match value {
            0 => WireKind::Varint,
            1 => WireKind::Fixed64,
            2 => WireKind::LengthDelimited,
            3 => WireKind::StartGroup,
            4 => WireKind::EndGroup,
            5 => WireKind::Fixed32,
            _ => return Err(DecodeError::UnknownWireType(value)),
        })
    }
}

impl From<WireKind> for u8 {
    fn from(value: WireKind) -> Self {
        value as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tag {
    pub field: u32,
    pub wire: WireKind,
}

impl Tag {
    pub const fn new(field: u32, wire: WireKind) -> Self {
        Self { field, wire }
    }

    #[inline(always)]
    pub const fn key(self) -> u64 {
        ((self.field as u64) << 3) | self.wire as u64
    }

    #[inline(always)]
    pub const fn encoded_len(self) -> usize {
        VarUInt64(self.key()).encoded_len()
    }

    #[inline]
    pub fn write(self, out: &mut Vec<u8>) {
        VarUInt64(self.key()).write(out);
    }

    /// Reads the tag at `pos`, returning it and the cursor after it.
    ///
    /// The wire kind is validated before the field number so that a stray
    /// group end or an illegal kind is reported as such.
    pub fn read(bytes: &[u8], pos: usize) -> Result<(Self, usize), DecodeError> {
        let (key, next) = VarUInt64::read(bytes, pos)?;
        let wire = WireKind::try_from((key & 0x7) as u8)?;
        let field = key >> 3;
        if field == 0 || field > MAX_FIELD_NUMBER as u64 {
            return Err(DecodeError::InvalidTag(key));
        }
        Ok((Tag::new(field as u32, wire), next))
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{:?}", self.field, self.wire)
    }
}
