//! Typed records of the EVM module. Field order mirrors the slot order of the
//! tables in `compiler::evm`.
use crate::utils::numbers::Int;
use crate::Record;

/// Module parameters.
#[derive(Debug, Clone, PartialEq, Default, Record)]
#[record_schema = "crate::compiler::evm::PARAMS"]
pub struct Params {
    pub evm_denom: String,
    pub enable_create: bool,
    pub enable_call: bool,
    pub extra_eips: Vec<i64>,
    pub chain_config: ChainConfig,
    pub allow_unprotected_txs: bool,
}

/// Fork activation heights. An absent height means the fork never activates,
/// which is not the same as activation at block zero.
#[derive(Debug, Clone, PartialEq, Default, Record)]
#[record_schema = "crate::compiler::evm::CHAIN_CONFIG"]
pub struct ChainConfig {
    pub homestead_block: Option<Int>,
    pub dao_fork_block: Option<Int>,
    pub dao_fork_support: bool,
    pub eip150_block: Option<Int>,
    pub eip150_hash: String,
    pub eip155_block: Option<Int>,
    pub eip158_block: Option<Int>,
    pub byzantium_block: Option<Int>,
    pub constantinople_block: Option<Int>,
    pub petersburg_block: Option<Int>,
    pub istanbul_block: Option<Int>,
    pub muir_glacier_block: Option<Int>,
    pub berlin_block: Option<Int>,
    pub london_block: Option<Int>,
    pub arrow_glacier_block: Option<Int>,
    pub gray_glacier_block: Option<Int>,
    pub merge_netsplit_block: Option<Int>,
    pub shanghai_block: Option<Int>,
    pub cancun_block: Option<Int>,
}

#[derive(Debug, Clone, PartialEq, Default, Record)]
#[record_schema = "crate::compiler::evm::STATE"]
pub struct State {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Default, Record)]
#[record_schema = "crate::compiler::evm::LOG"]
pub struct Log {
    pub address: String,
    pub topics: Vec<String>,
    pub data: Vec<u8>,
    pub block_number: u64,
    pub tx_hash: String,
    pub tx_index: u64,
    pub block_hash: String,
    pub index: u64,
    pub removed: bool,
}

#[derive(Debug, Clone, PartialEq, Default, Record)]
#[record_schema = "crate::compiler::evm::TRANSACTION_LOGS"]
pub struct TransactionLogs {
    pub hash: String,
    pub logs: Vec<Log>,
}

#[derive(Debug, Clone, PartialEq, Default, Record)]
#[record_schema = "crate::compiler::evm::TX_RESULT"]
pub struct TxResult {
    pub contract_address: String,
    pub bloom: Vec<u8>,
    pub tx_logs: TransactionLogs,
    pub ret: Vec<u8>,
    pub reverted: bool,
    pub gas_used: u64,
}

#[derive(Debug, Clone, PartialEq, Default, Record)]
#[record_schema = "crate::compiler::evm::ACCESS_TUPLE"]
pub struct AccessTuple {
    pub address: String,
    pub storage_keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Record)]
#[record_schema = "crate::compiler::evm::TRACE_CONFIG"]
pub struct TraceConfig {
    pub tracer: String,
    pub timeout: String,
    pub reexec: u64,
    pub disable_stack: bool,
    pub disable_storage: bool,
    pub debug: bool,
    pub limit: i32,
    pub overrides: Option<ChainConfig>,
    pub enable_memory: bool,
    pub enable_return_data: bool,
    pub tracer_json_config: String,
}
