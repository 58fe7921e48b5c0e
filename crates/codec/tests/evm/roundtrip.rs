use ethnum::U256;
use proptest::prelude::*;
use proptest::collection::vec;
use proptest::option;
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

fn int() -> impl Strategy<Value = Int> {
    prop_oneof![
        any::<i64>().prop_map(Int::from),
        (any::<bool>(), any::<u128>(), any::<u128>())
            .prop_map(|(neg, hi, lo)| Int::from_parts(neg, U256::from_words(hi, lo))),
    ]
}

fn text() -> impl Strategy<Value = String> {
    prop_oneof!["0x[0-9a-f]{0,64}", any::<String>()]
}

fn bytes() -> impl Strategy<Value = Vec<u8>> {
    vec(any::<u8>(), 0..64)
}

fn height() -> impl Strategy<Value = Option<Int>> {
    option::of(int())
}

prop_compose! {
    fn chain_config()(
        heights in vec(height(), 17),
        dao_fork_support in any::<bool>(),
        eip150_hash in text(),
    ) -> ChainConfig {
        let mut h = heights.into_iter();
        let mut next = move || h.next().flatten();
        ChainConfig {
            homestead_block: next(),
            dao_fork_block: next(),
            dao_fork_support,
            eip150_block: next(),
            eip150_hash,
            eip155_block: next(),
            eip158_block: next(),
            byzantium_block: next(),
            constantinople_block: next(),
            petersburg_block: next(),
            istanbul_block: next(),
            muir_glacier_block: next(),
            berlin_block: next(),
            london_block: next(),
            arrow_glacier_block: next(),
            gray_glacier_block: next(),
            merge_netsplit_block: next(),
            shanghai_block: next(),
            cancun_block: next(),
        }
    }
}

prop_compose! {
    fn params()(
        evm_denom in text(),
        enable_create in any::<bool>(),
        enable_call in any::<bool>(),
        extra_eips in vec(any::<i64>(), 0..8),
        chain_config in chain_config(),
        allow_unprotected_txs in any::<bool>(),
    ) -> Params {
        Params { evm_denom, enable_create, enable_call, extra_eips, chain_config, allow_unprotected_txs }
    }
}

prop_compose! {
    fn state()(key in text(), value in text()) -> State {
        State { key, value }
    }
}

prop_compose! {
    fn log()(
        address in text(),
        topics in vec(text(), 0..4),
        data in bytes(),
        numbers in any::<(u64, u64, u64)>(),
        tx_hash in text(),
        block_hash in text(),
        removed in any::<bool>(),
    ) -> Log {
        let (block_number, tx_index, index) = numbers;
        Log { address, topics, data, block_number, tx_hash, tx_index, block_hash, index, removed }
    }
}

prop_compose! {
    fn transaction_logs()(hash in text(), logs in vec(log(), 0..6)) -> TransactionLogs {
        TransactionLogs { hash, logs }
    }
}

prop_compose! {
    fn tx_result()(
        contract_address in text(),
        bloom in bytes(),
        tx_logs in transaction_logs(),
        ret in bytes(),
        reverted in any::<bool>(),
        gas_used in any::<u64>(),
    ) -> TxResult {
        TxResult { contract_address, bloom, tx_logs, ret, reverted, gas_used }
    }
}

prop_compose! {
    fn access_tuple()(address in text(), storage_keys in vec(text(), 0..6)) -> AccessTuple {
        AccessTuple { address, storage_keys }
    }
}

prop_compose! {
    fn trace_config()(
        tracer in text(),
        timeout in text(),
        reexec in any::<u64>(),
        flags in any::<[bool; 5]>(),
        limit in any::<i32>(),
        overrides in option::of(chain_config()),
        tracer_json_config in text(),
    ) -> TraceConfig {
        let [disable_stack, disable_storage, debug, enable_memory, enable_return_data] = flags;
        TraceConfig {
            tracer,
            timeout,
            reexec,
            disable_stack,
            disable_storage,
            debug,
            limit,
            overrides,
            enable_memory,
            enable_return_data,
            tracer_json_config,
        }
    }
}

fn check_roundtrip<R: Record + PartialEq + std::fmt::Debug>(record: &R) -> Result<(), TestCaseError> {
    let encoded = record.encode();
    prop_assert_eq!(record.encoded_size(), encoded.len());
    let decoded = R::decode(&encoded).map_err(|e| TestCaseError::fail(e.to_string()))?;
    prop_assert_eq!(&decoded, record);
    Ok(())
}

proptest! {
    #[test]
    fn roundtrip_params(record in params()) {
        check_roundtrip(&record)?;
    }

    #[test]
    fn roundtrip_chain_config(record in chain_config()) {
        check_roundtrip(&record)?;
    }

    #[test]
    fn roundtrip_state(record in state()) {
        check_roundtrip(&record)?;
    }

    #[test]
    fn roundtrip_log(record in log()) {
        check_roundtrip(&record)?;
    }

    #[test]
    fn roundtrip_transaction_logs(record in transaction_logs()) {
        check_roundtrip(&record)?;
    }

    #[test]
    fn roundtrip_tx_result(record in tx_result()) {
        check_roundtrip(&record)?;
    }

    #[test]
    fn roundtrip_access_tuple(record in access_tuple()) {
        check_roundtrip(&record)?;
    }

    #[test]
    fn roundtrip_trace_config(record in trace_config()) {
        check_roundtrip(&record)?;
    }

    #[test]
    fn concatenation_merges(a in access_tuple(), b in access_tuple()) {
        let mut buf = a.encode();
        b.encode_to(&mut buf);
        let merged = AccessTuple::decode(&buf).map_err(|e| TestCaseError::fail(e.to_string()))?;

        let address = if b.address.is_empty() { a.address.clone() } else { b.address.clone() };
        let mut storage_keys = a.storage_keys.clone();
        storage_keys.extend(b.storage_keys.iter().cloned());
        prop_assert_eq!(merged, AccessTuple { address, storage_keys });
    }

    #[test]
    fn merge_matches_concatenation(a in state(), b in state()) {
        let mut merged = a.clone();
        merged.merge(&b.encode()).map_err(|e| TestCaseError::fail(e.to_string()))?;

        let mut buf = a.encode();
        b.encode_to(&mut buf);
        prop_assert_eq!(Some(merged), State::decode(&buf).ok());
    }

    #[test]
    fn arbitrary_input_never_panics(buf in vec(any::<u8>(), 0..256)) {
        let _ = Params::decode(&buf);
        let _ = ChainConfig::decode(&buf);
        let _ = State::decode(&buf);
        let _ = Log::decode(&buf);
        let _ = TransactionLogs::decode(&buf);
        let _ = TxResult::decode(&buf);
        let _ = AccessTuple::decode(&buf);
        let _ = TraceConfig::decode(&buf);
    }

    #[test]
    fn decoded_input_reencodes_canonically(buf in vec(any::<u8>(), 0..256)) {
        // whatever decodes must survive a second trip unchanged
        if let Ok(config) = TraceConfig::decode(&buf) {
            check_roundtrip(&config)?;
        }
        if let Ok(log) = Log::decode(&buf) {
            check_roundtrip(&log)?;
        }
    }
}
