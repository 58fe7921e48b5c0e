use core::cmp::Ordering;
use core::fmt::{self, Debug, Display};
use core::str::FromStr;

use ethnum::U256;

use crate::utils::DecodeError;

/// Signed integer with a magnitude of up to 256 bits.
///
/// Wire payload is the canonical base-10 text: an optional `-`, then digits
/// without leading zeros. Zero is never negative.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct Int {
    negative: bool,
    magnitude: U256,
}

impl Int {
    pub const ZERO: Int = Int { negative: false, magnitude: U256::ZERO };

    /// Largest magnitude a payload may carry, in bits.
    pub const MAX_BIT_LEN: u32 = 256;

    pub fn from_parts(negative: bool, magnitude: U256) -> Self {
        Self { negative: negative && magnitude != U256::ZERO, magnitude }
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.negative
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.magnitude == U256::ZERO
    }

    #[inline]
    pub const fn magnitude(&self) -> U256 {
        self.magnitude
    }

    pub fn bit_len(&self) -> u32 {
        256 - self.magnitude.leading_zeros()
    }

    pub fn as_i64(&self) -> Option<i64> {
        let (hi, lo) = self.magnitude.into_words();
        if hi != 0 || lo > i64::MAX as u128 + 1 {
            return None;
        }
        match (self.negative, lo) {
            (false, lo) if lo <= i64::MAX as u128 => Some(lo as i64),
            (true, lo) => Some((lo as i128).wrapping_neg() as i64),
            _ => None,
        }
    }

    pub fn as_u64(&self) -> Option<u64> {
        let (hi, lo) = self.magnitude.into_words();
        if self.negative || hi != 0 {
            return None;
        }
        u64::try_from(lo).ok()
    }

    /// Length of the canonical text payload.
    pub fn encoded_len(&self) -> usize {
        let mut digits = 1;
        let ten = U256::new(10);
        let mut rest = self.magnitude / ten;
        while rest != U256::ZERO {
            digits += 1;
            rest /= ten;
        }
        digits + self.negative as usize
    }

    /// Canonical text payload.
    pub fn to_payload(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Parses a payload. Accepts an optional sign, leading zeros and the
    /// empty payload (zero), rejecting anything that is not a decimal integer
    /// or does not fit in 256 bits of magnitude.
    pub fn from_payload(raw: &[u8]) -> Result<Self, DecodeError> {
        if raw.is_empty() {
            return Ok(Self::ZERO);
        }
        let (negative, digits) = match raw[0] {
            b'-' => (true, &raw[1..]),
            b'+' => (false, &raw[1..]),
            _ => (false, raw),
        };
        if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
            return Err(DecodeError::InvalidInteger);
        }
        // all ascii digits, so valid utf-8
        let text = core::str::from_utf8(digits).map_err(|_| DecodeError::InvalidInteger)?;
        let magnitude = U256::from_str_radix(text, 10).map_err(|_| DecodeError::InvalidInteger)?;
        Ok(Self::from_parts(negative, magnitude))
    }
}

impl Default for Int {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Debug for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Int({})", self)
    }
}

impl Display for Int {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        Display::fmt(&self.magnitude, f)
    }
}

impl FromStr for Int {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_payload(s.as_bytes())
    }
}

impl Ord for Int {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, false) => self.magnitude.cmp(&other.magnitude),
            (true, true) => other.magnitude.cmp(&self.magnitude),
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
        }
    }
}

impl PartialOrd for Int {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

macro_rules! int_from {
    (unsigned: [$($u_ty:ty),* $(,)?], signed: [$($s_ty:ty),* $(,)?]) => {
        $(
            impl From<$u_ty> for Int {
                #[inline]
                fn from(n: $u_ty) -> Self {
                    Self { negative: false, magnitude: U256::new(n as u128) }
                }
            }
        )*

        $(
            impl From<$s_ty> for Int {
                #[inline]
                fn from(n: $s_ty) -> Self {
                    Self::from_parts(n < 0, U256::new((n as i128).unsigned_abs()))
                }
            }
        )*
    };
}

int_from!(
    unsigned: [u8, u16, u32, u64, u128, usize],
    signed:   [i8, i16, i32, i64, isize]
);

impl From<U256> for Int {
    fn from(magnitude: U256) -> Self {
        Self { negative: false, magnitude }
    }
}
