use std::borrow::Cow;
use std::fmt;
use std::fmt::Debug;

use crate::utils::numbers::Int;

/// Helper that prints a byte slice as `0x…` hex.
pub(crate) struct HexSlice<'a>(pub &'a [u8]);

impl<'a> Debug for HexSlice<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for byte in self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

/// Intermediate form a record travels through on its way to and from the
/// wire. `Message` slots are positional, one per descriptor field.
#[derive(Clone, PartialEq)]
pub enum Value<'a> {
    /// absent optional field
    None,
    Bool(bool),

    UInt(u64),
    Int(i64),
    BigInt(Int),

    Bytes(Cow<'a, [u8]>),
    String(Cow<'a, str>),

    Array(Vec<Value<'a>>),
    Message(Vec<Value<'a>>),
}

impl<'a> Value<'a> {
    /// Detach from any borrowed buffer.
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Value::None => Value::None,
            Value::Bool(b) => Value::Bool(b),
            Value::UInt(n) => Value::UInt(n),
            Value::Int(n) => Value::Int(n),
            Value::BigInt(n) => Value::BigInt(n),
            Value::Bytes(b) => Value::Bytes(Cow::Owned(b.into_owned())),
            Value::String(s) => Value::String(Cow::Owned(s.into_owned())),
            Value::Array(vals) => Value::Array(vals.into_iter().map(Value::into_owned).collect()),
            Value::Message(slots) => {
                Value::Message(slots.into_iter().map(Value::into_owned).collect())
            }
        }
    }

    /// True for the values a singular scalar field leaves off the wire.
    pub fn is_default(&self) -> bool {
        match self {
            Value::None => true,
            Value::Bool(b) => !b,
            Value::UInt(n) => *n == 0,
            Value::Int(n) => *n == 0,
            Value::Bytes(b) => b.is_empty(),
            Value::String(s) => s.is_empty(),
            Value::Array(vals) => vals.is_empty(),
            Value::BigInt(_) | Value::Message(_) => false,
        }
    }
}

impl<'a> Debug for Value<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::UInt(n) => write!(f, "{n}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::BigInt(n) => write!(f, "{n}"),
            Value::Bytes(bytes) => f.debug_tuple("Bytes").field(&HexSlice(bytes)).finish(),
            Value::String(s) => write!(f, "\"{s}\""),
            Value::Array(v) => f.debug_list().entries(v).finish(),
            Value::Message(slots) => f.debug_tuple("Message").field(slots).finish(),
        }
    }
}

/// Borrowing conversion into a `Value`, implemented by every field type a
/// record may hold (and, through `#[derive(Record)]`, by the records).
pub trait IntoValue {
    fn to_value(&self) -> Value<'_>;
}

/// Conversion out of a decoded `Value`. The decoder only ever hands over the
/// variant the field descriptor names. Anything else means a table drifted
/// from its struct: debug builds panic, release builds fall back to default.
pub trait FromValue: Sized {
    fn from_value(value: Value<'_>) -> Self;
}

#[doc(hidden)]
#[inline]
pub fn unexpected_variant<T: Default>(expected: &'static str, found: &Value) -> T {
    debug_assert!(false, "expected {expected} value, found {found:?}");
    T::default()
}

macro_rules! scalar_value {
    ($( ($ty:ty, $variant:ident, $wide:ty) ),* $(,)?) => {$(
        impl IntoValue for $ty {
            #[inline]
            fn to_value(&self) -> Value<'_> {
                Value::$variant(*self as $wide)
            }
        }

        impl FromValue for $ty {
            #[inline]
            fn from_value(value: Value<'_>) -> Self {
                match value {
                    Value::$variant(n) => n as $ty,
                    other => unexpected_variant(stringify!($ty), &other),
                }
            }
        }
    )*};
}

scalar_value!(
    (u64, UInt, u64),
    (i64, Int,  i64),
    (i32, Int,  i64),
);

impl IntoValue for bool {
    fn to_value(&self) -> Value<'_> {
        Value::Bool(*self)
    }
}

impl FromValue for bool {
    fn from_value(value: Value<'_>) -> Self {
        match value {
            Value::Bool(b) => b,
            other => unexpected_variant("bool", &other),
        }
    }
}

impl IntoValue for Int {
    fn to_value(&self) -> Value<'_> {
        Value::BigInt(*self)
    }
}

impl FromValue for Int {
    fn from_value(value: Value<'_>) -> Self {
        match value {
            Value::BigInt(n) => n,
            other => unexpected_variant("int", &other),
        }
    }
}

impl IntoValue for String {
    fn to_value(&self) -> Value<'_> {
        Value::String(Cow::Borrowed(self.as_str()))
    }
}

impl FromValue for String {
    fn from_value(value: Value<'_>) -> Self {
        match value {
            Value::String(s) => s.into_owned(),
            other => unexpected_variant("string", &other),
        }
    }
}

impl IntoValue for Vec<u8> {
    fn to_value(&self) -> Value<'_> {
        Value::Bytes(Cow::Borrowed(self.as_slice()))
    }
}

impl FromValue for Vec<u8> {
    fn from_value(value: Value<'_>) -> Self {
        match value {
            Value::Bytes(b) => b.into_owned(),
            other => unexpected_variant("bytes", &other),
        }
    }
}

impl<T: IntoValue> IntoValue for Option<T> {
    fn to_value(&self) -> Value<'_> {
        match self {
            Some(v) => v.to_value(),
            None => Value::None,
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: Value<'_>) -> Self {
        match value {
            Value::None => None,
            v => Some(T::from_value(v)),
        }
    }
}

/// Repeated fields. Implemented per element type rather than generically,
/// `Vec<u8>` already stands for a bytes field.
#[macro_export]
macro_rules! repeated_value {
    ($($ty:ty),* $(,)?) => {$(
        impl $crate::value::IntoValue for Vec<$ty> {
            fn to_value(&self) -> $crate::value::Value<'_> {
                $crate::value::Value::Array(
                    self.iter().map($crate::value::IntoValue::to_value).collect()
                )
            }
        }

        impl $crate::value::FromValue for Vec<$ty> {
            fn from_value(value: $crate::value::Value<'_>) -> Self {
                match value {
                    $crate::value::Value::Array(vals) => vals
                        .into_iter()
                        .map(<$ty as $crate::value::FromValue>::from_value)
                        .collect(),
                    other => $crate::value::unexpected_variant("repeated", &other),
                }
            }
        }
    )*};
}

repeated_value!(i64, u64, String);
