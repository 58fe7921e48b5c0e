use evmcodec::{
    AccessTuple,
    ChainConfig,
    Int,
    Log,
    Params,
    Record,
    State,
    TraceConfig,
    TransactionLogs,
    TxResult,
};

macro_rules! pack_value_and_assert {
    ($value:expr, $expected:expr) => {
        let value = $value;
        let expected: &[u8] = $expected;
        let encoded = value.encode();
        assert_eq!(encoded, expected, "{:?}", value);
        assert_eq!(value.encoded_size(), expected.len(), "{:?}", value);
    };
}

fn sample_chain_config() -> ChainConfig {
    ChainConfig {
        homestead_block: Some(Int::from(0u64)),
        dao_fork_block: Some(Int::from(1_920_000u64)),
        dao_fork_support: true,
        eip150_block: Some(Int::from(2_463_000u64)),
        eip150_hash: "0x2086799aeebeae135c246c65021c82b4e15a2c451340993aacfd2751886514f0".into(),
        eip155_block: Some(Int::from(2_675_000u64)),
        london_block: Some(Int::from(12_965_000u64)),
        cancun_block: Some(Int::from(-1i64)),
        ..Default::default()
    }
}

fn sample_log(index: u64) -> Log {
    Log {
        address: "0x5FbDB2315678afecb367f032d93F642f64180aa3".into(),
        topics: vec![
            "0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef".into(),
            "0x0000000000000000000000000000000000000000000000000000000000000000".into(),
        ],
        data: vec![0xde, 0xad, 0xbe, 0xef],
        block_number: 17_000_000,
        tx_hash: "0x7c1ec1d3e4cd0b9e3f5c1c1f1b7f7b1e8d1b0b0fb3a6ffa8f3c1f8d2c0e8f6b1".into(),
        tx_index: 4,
        block_hash: "0x9d2f6a6c8f0b4f3a2e1d0c9b8a7f6e5d4c3b2a1f0e9d8c7b6a5f4e3d2c1b0a99".into(),
        index,
        removed: false,
    }
}

#[test]
fn test_pack_state() {
    pack_value_and_assert!(
        State { key: "0xabc".into(), value: "0x01".into() },
        &[0x0a, 0x05, b'0', b'x', b'a', b'b', b'c', 0x12, 0x04, b'0', b'x', b'0', b'1']
    );
    pack_value_and_assert!(State::default(), &[]);
    pack_value_and_assert!(State { key: String::new(), value: "z".into() }, &[0x12, 0x01, b'z']);
}

#[test]
fn test_pack_always_emits_embedded_records() {
    pack_value_and_assert!(Params::default(), &[0x2a, 0x00]);
    pack_value_and_assert!(TxResult::default(), &[0x1a, 0x00]);

    // nullable, so absent unless set
    pack_value_and_assert!(TraceConfig::default(), &[]);
    pack_value_and_assert!(
        TraceConfig { overrides: Some(ChainConfig::default()), ..Default::default() },
        &[0x52, 0x00]
    );
}

#[test]
fn test_pack_extra_eips() {
    pack_value_and_assert!(
        Params { extra_eips: vec![1, 2, 1559], ..Default::default() },
        &[0x22, 0x04, 0x01, 0x02, 0x97, 0x0c, 0x2a, 0x00]
    );

    // negative values take the full ten bytes
    pack_value_and_assert!(
        Params { extra_eips: vec![-1], ..Default::default() },
        &[0x22, 0x0a, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01, 0x2a, 0x00]
    );
}

#[test]
fn test_pack_chain_config_heights() {
    pack_value_and_assert!(ChainConfig::default(), &[]);

    // zero height is present and must be written
    pack_value_and_assert!(
        ChainConfig { homestead_block: Some(Int::ZERO), ..Default::default() },
        &[0x0a, 0x01, b'0']
    );
    pack_value_and_assert!(
        ChainConfig { cancun_block: Some(Int::from(123u64)), ..Default::default() },
        &[0xba, 0x01, 0x03, b'1', b'2', b'3']
    );
    pack_value_and_assert!(
        ChainConfig { london_block: Some(Int::from(-5i64)), ..Default::default() },
        &[0x8a, 0x01, 0x02, b'-', b'5']
    );
}

#[test]
fn test_pack_ascending_field_order() {
    let config = ChainConfig {
        eip150_hash: "h".into(),
        dao_fork_support: true,
        cancun_block: Some(Int::from(1u64)),
        homestead_block: Some(Int::from(2u64)),
        ..Default::default()
    };
    pack_value_and_assert!(
        config,
        &[0x0a, 0x01, b'2', 0x18, 0x01, 0x2a, 0x01, b'h', 0xba, 0x01, 0x01, b'1']
    );
}

#[test]
fn test_pack_trace_config_limit() {
    pack_value_and_assert!(TraceConfig { limit: 5, ..Default::default() }, &[0x48, 0x05]);
    pack_value_and_assert!(
        TraceConfig { limit: -1, ..Default::default() },
        &[0x48, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x01]
    );
}

#[test]
fn test_pack_log() {
    pack_value_and_assert!(
        Log {
            topics: vec!["a".into(), "b".into()],
            block_number: 300,
            removed: true,
            ..Default::default()
        },
        &[0x12, 0x01, b'a', 0x12, 0x01, b'b', 0x20, 0xac, 0x02, 0x48, 0x01]
    );

    // empty elements of a repeated field still take a tag each
    pack_value_and_assert!(
        AccessTuple { address: String::new(), storage_keys: vec![String::new(), "k".into()] },
        &[0x12, 0x00, 0x12, 0x01, b'k']
    );
}

#[test]
fn test_pack_nested_logs() {
    let logs = TransactionLogs {
        hash: "0x01".into(),
        logs: vec![Log { index: 1, ..Default::default() }, Log { index: 2, ..Default::default() }],
    };
    pack_value_and_assert!(
        logs,
        &[0x0a, 0x04, b'0', b'x', b'0', b'1', 0x12, 0x02, 0x40, 0x01, 0x12, 0x02, 0x40, 0x02]
    );
}

#[test]
fn test_encode_to_appends() {
    let state = State { key: "k".into(), value: String::new() };
    let mut out = vec![0xaa];
    state.encode_to(&mut out);
    state.encode_to(&mut out);
    assert_eq!(out, [0xaa, 0x0a, 0x01, b'k', 0x0a, 0x01, b'k']);
}

#[test]
fn test_encoded_size_matches() {
    let params = Params {
        evm_denom: "aphoton".into(),
        enable_create: true,
        enable_call: true,
        extra_eips: vec![1344, 1884, 2200, 2929, 3198, 3529],
        chain_config: sample_chain_config(),
        allow_unprotected_txs: false,
    };
    assert_eq!(params.encoded_size(), params.encode().len());

    let tx = TxResult {
        contract_address: "0x0000000000000000000000000000000000000000".into(),
        bloom: vec![0u8; 256],
        tx_logs: TransactionLogs {
            hash: "0xabcd".into(),
            // enough logs to need a two byte length prefix
            logs: (0..64).map(sample_log).collect(),
        },
        ret: vec![1, 2, 3],
        reverted: true,
        gas_used: 21_000,
    };
    assert_eq!(tx.encoded_size(), tx.encode().len());

    let trace = TraceConfig {
        tracer: "callTracer".into(),
        timeout: "10s".into(),
        reexec: 128,
        disable_stack: true,
        disable_storage: true,
        debug: true,
        limit: i32::MIN,
        overrides: Some(sample_chain_config()),
        enable_memory: true,
        enable_return_data: true,
        tracer_json_config: "{}".into(),
    };
    assert_eq!(trace.encoded_size(), trace.encode().len());

    let state = State { key: "k".repeat(200), value: "v".repeat(20_000) };
    assert_eq!(state.encoded_size(), state.encode().len());
}
