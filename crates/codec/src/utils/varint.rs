//! varint.rs  –  base-128 varints as used by every tag, length and integer field
use crate::utils::DecodeError;

/// Longest encoding of a `u64`: ten 7-bit groups.
pub const MAX_VARINT_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarUInt64(pub u64);

impl VarUInt64 {
    /// Encoded length in bytes, computed without writing anything.
    #[inline(always)]
    pub const fn encoded_len(self) -> usize {
        // one group per started 7 bits, `| 1` makes zero take a single byte
        let bits = 64 - (self.0 | 1).leading_zeros() as usize;
        (bits + 6) / 7
    }

    /// Encode into a 10-byte buffer; returns (buffer, length_used).
    #[inline]
    pub fn encode(self) -> ([u8; MAX_VARINT_LEN], usize) {
        let mut buf = [0u8; MAX_VARINT_LEN];
        let mut v = self.0;
        let mut i = 0;
        while v >= 0x80 {
            buf[i] = (v as u8 & 0x7F) | 0x80;
            v >>= 7;
            i += 1;
        }
        buf[i] = v as u8;
        (buf, i + 1)
    }

    /// Append the encoding to `out`.
    #[inline]
    pub fn write(self, out: &mut Vec<u8>) {
        let (raw, len) = self.encode();
        out.extend_from_slice(&raw[..len]);
    }

    /// Decode from `bytes`, returning the value and bytes consumed.
    ///
    /// The group limit is checked before the buffer end, so ten continuation
    /// bytes fail with `IntegerOverflow` even when nothing follows them.
    pub fn decode(bytes: &[u8]) -> Result<(Self, usize), DecodeError> {
        let mut result = 0u64;
        let mut shift = 0u32;
        let mut i = 0;
        loop {
            if shift >= 64 {
                return Err(DecodeError::IntegerOverflow);
            }
            let b = *bytes.get(i).ok_or(DecodeError::Truncated)?;
            i += 1;
            result |= ((b & 0x7F) as u64) << shift;
            if b < 0x80 {
                return Ok((VarUInt64(result), i));
            }
            shift += 7;
        }
    }

    /// Decode at `pos`, returning the value and the cursor after it.
    #[inline]
    pub fn read(bytes: &[u8], pos: usize) -> Result<(u64, usize), DecodeError> {
        let tail = bytes.get(pos..).ok_or(DecodeError::Truncated)?;
        let (v, used) = Self::decode(tail)?;
        Ok((v.0, pos + used))
    }
}

impl From<u64> for VarUInt64 {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
impl From<VarUInt64> for u64 {
    fn from(v: VarUInt64) -> Self {
        v.0
    }
}

/// Reads a length prefix at `pos` and returns the `(start, end)` range of the
/// payload it announces, bounds-checked against `bytes`.
pub fn read_len_delimited(bytes: &[u8], pos: usize) -> Result<(usize, usize), DecodeError> {
    let (len, start) = VarUInt64::read(bytes, pos)?;
    if len > isize::MAX as u64 {
        return Err(DecodeError::NegativeLength);
    }
    let end = start
        .checked_add(len as usize)
        .ok_or(DecodeError::NegativeLength)?;
    if end > bytes.len() {
        return Err(DecodeError::Truncated);
    }
    Ok((start, end))
}
