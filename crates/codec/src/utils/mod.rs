pub mod numbers;
pub mod varint;

use crate::wire::WireKind;

#[macro_export]
#[cfg(feature = "debug")]
macro_rules! debug_log {
    ($($args:tt)*) => {{
        ::tracing::trace!("{}", format_args!($($args)*));
    }};
}

#[macro_export]
#[cfg(not(feature = "debug"))]
macro_rules! debug_log {
    ($($args:tt)*) => {{}};
}

#[macro_export]
macro_rules! define_error {
    ($name:ident) => {
        #[derive(Debug, ::thiserror::Error)]
        #[error("{reason}")]
        pub struct $name {
            pub reason: String,
        }

        impl $name {
            pub fn new(args: impl ::core::fmt::Display) -> Self {
                Self {
                    reason: args.to_string(),
                }
            }

            pub fn fmt(args: ::core::fmt::Arguments<'_>) -> Self {
                Self {
                    reason: args.to_string(),
                }
            }
        }
    };
}

define_error!(TypeCompileError);
#[macro_export]
macro_rules! compiler_error {
    ($($arg:tt)*) => {
        $crate::utils::TypeCompileError::fmt(format_args!($($arg)*))
    };
}

/// Failure of a single decode call. Every kind is terminal: the partially
/// built record is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ::thiserror::Error)]
pub enum DecodeError {
    #[error("unexpected end of buffer")]
    Truncated,

    #[error("integer overflow")]
    IntegerOverflow,

    #[error("negative length found during unmarshaling")]
    NegativeLength,

    #[error("wrong wire type {found:?} for field {record}.{field}, expected {expected:?}")]
    WireTypeMismatch {
        record: &'static str,
        field: &'static str,
        expected: WireKind,
        found: WireKind,
    },

    #[error("unexpected end of group")]
    UnexpectedEndOfGroup,

    #[error("illegal wire type {0}")]
    UnknownWireType(u8),

    #[error("illegal tag {0}")]
    InvalidTag(u64),

    #[error("invalid utf-8 in string field {record}.{field}")]
    InvalidUtf8 {
        record: &'static str,
        field: &'static str,
    },

    #[error("invalid extended-precision integer payload")]
    InvalidInteger,
}
