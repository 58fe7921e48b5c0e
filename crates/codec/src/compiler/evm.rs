//! Field tables of the EVM module records.
//!
//! Slot order of each table is the field order of the matching struct in
//! `crate::records`; wire order comes from the field numbers.
use super::FieldKind::{Bool, Bytes, Int, Int32, Int64, Message, String, UInt64};
use super::Repetition::{Optional, Packed, Repeated, Singular};
use super::{FieldDescriptor as F, MessageDescriptor};

pub static PARAMS: MessageDescriptor = MessageDescriptor {
    id: 0,
    name: "Params",
    fields: &[
        F::new(1, "evm_denom", String, Singular),
        F::new(2, "enable_create", Bool, Singular),
        F::new(3, "enable_call", Bool, Singular),
        F::new(4, "extra_eips", Int64, Packed),
        F::new(5, "chain_config", Message(&CHAIN_CONFIG), Singular),
        F::new(6, "allow_unprotected_txs", Bool, Singular),
    ],
};

// 14, 15, 16 and 19 are retired fork fields
pub static CHAIN_CONFIG: MessageDescriptor = MessageDescriptor {
    id: 1,
    name: "ChainConfig",
    fields: &[
        F::new(1, "homestead_block", Int, Optional),
        F::new(2, "dao_fork_block", Int, Optional),
        F::new(3, "dao_fork_support", Bool, Singular),
        F::new(4, "eip150_block", Int, Optional),
        F::new(5, "eip150_hash", String, Singular),
        F::new(6, "eip155_block", Int, Optional),
        F::new(7, "eip158_block", Int, Optional),
        F::new(8, "byzantium_block", Int, Optional),
        F::new(9, "constantinople_block", Int, Optional),
        F::new(10, "petersburg_block", Int, Optional),
        F::new(11, "istanbul_block", Int, Optional),
        F::new(12, "muir_glacier_block", Int, Optional),
        F::new(13, "berlin_block", Int, Optional),
        F::new(17, "london_block", Int, Optional),
        F::new(18, "arrow_glacier_block", Int, Optional),
        F::new(20, "gray_glacier_block", Int, Optional),
        F::new(21, "merge_netsplit_block", Int, Optional),
        F::new(22, "shanghai_block", Int, Optional),
        F::new(23, "cancun_block", Int, Optional),
    ],
};

pub static STATE: MessageDescriptor = MessageDescriptor {
    id: 2,
    name: "State",
    fields: &[
        F::new(1, "key", String, Singular),
        F::new(2, "value", String, Singular),
    ],
};

pub static LOG: MessageDescriptor = MessageDescriptor {
    id: 3,
    name: "Log",
    fields: &[
        F::new(1, "address", String, Singular),
        F::new(2, "topics", String, Repeated),
        F::new(3, "data", Bytes, Singular),
        F::new(4, "block_number", UInt64, Singular),
        F::new(5, "tx_hash", String, Singular),
        F::new(6, "tx_index", UInt64, Singular),
        F::new(7, "block_hash", String, Singular),
        F::new(8, "index", UInt64, Singular),
        F::new(9, "removed", Bool, Singular),
    ],
};

pub static TRANSACTION_LOGS: MessageDescriptor = MessageDescriptor {
    id: 4,
    name: "TransactionLogs",
    fields: &[
        F::new(1, "hash", String, Singular),
        F::new(2, "logs", Message(&LOG), Repeated),
    ],
};

pub static TX_RESULT: MessageDescriptor = MessageDescriptor {
    id: 5,
    name: "TxResult",
    fields: &[
        F::new(1, "contract_address", String, Singular),
        F::new(2, "bloom", Bytes, Singular),
        F::new(3, "tx_logs", Message(&TRANSACTION_LOGS), Singular),
        F::new(4, "ret", Bytes, Singular),
        F::new(5, "reverted", Bool, Singular),
        F::new(6, "gas_used", UInt64, Singular),
    ],
};

pub static ACCESS_TUPLE: MessageDescriptor = MessageDescriptor {
    id: 6,
    name: "AccessTuple",
    fields: &[
        F::new(1, "address", String, Singular),
        F::new(2, "storage_keys", String, Repeated),
    ],
};

pub static TRACE_CONFIG: MessageDescriptor = MessageDescriptor {
    id: 7,
    name: "TraceConfig",
    fields: &[
        F::new(1, "tracer", String, Singular),
        F::new(2, "timeout", String, Singular),
        F::new(3, "reexec", UInt64, Singular),
        F::new(5, "disable_stack", Bool, Singular),
        F::new(6, "disable_storage", Bool, Singular),
        F::new(8, "debug", Bool, Singular),
        F::new(9, "limit", Int32, Singular),
        F::new(10, "overrides", Message(&CHAIN_CONFIG), Optional),
        F::new(11, "enable_memory", Bool, Singular),
        F::new(12, "enable_return_data", Bool, Singular),
        F::new(13, "tracer_json_config", String, Singular),
    ],
};

/// Every record, positioned by descriptor id.
pub static DESCRIPTORS: &[&MessageDescriptor] = &[
    &PARAMS,
    &CHAIN_CONFIG,
    &STATE,
    &LOG,
    &TRANSACTION_LOGS,
    &TX_RESULT,
    &ACCESS_TUPLE,
    &TRACE_CONFIG,
];
