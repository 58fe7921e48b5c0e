extern crate self as evmcodec;

pub mod utils;
pub mod wire;
pub mod value;
pub mod compiler;
pub mod encoding;
pub mod runtime;
pub mod records;

pub use utils::{
    numbers::Int,
    varint::VarUInt64,
    DecodeError,
    TypeCompileError,
};
pub use value::{
    Value,
    IntoValue,
    FromValue,
};
pub use compiler::{
    Catalogue,
    MessageDescriptor,
    CATALOGUE,
};
pub use runtime::{
    compact_text,
    Packer,
    Record,
    Unpacker,
};
pub use records::{
    AccessTuple,
    ChainConfig,
    Log,
    Params,
    State,
    TraceConfig,
    TransactionLogs,
    TxResult,
};

pub use evmcodec_macros::Record;
