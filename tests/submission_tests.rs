use alloy::consensus::transaction::SignerRecoverable;
use alloy::consensus::TxEnvelope;
use alloy::eips::eip2718::Decodable2718;
use alloy::primitives::{Address, Bytes, TxKind, B256, U256};
use alloy::signers::local::PrivateKeySigner;
use anyhow::Result;
use async_trait::async_trait;
use oracle_keeper::blockchain::ChainClient;
use oracle_keeper::submitter::{SubmissionError, TxSubmitter};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::timeout;

const TEST_PRIVATE_KEY: &str =
    "0x0000000000000000000000000000000000000000000000000000000000000001";
const TEST_CHAIN_ID: u64 = 1;

/// Accepts every broadcast with a fixed hash and keeps the raw bytes.
struct RecordingChain {
    broadcasts: Mutex<Vec<Bytes>>,
    outcome: Mutex<Option<Result<B256, SubmissionError>>>,
}

impl RecordingChain {
    fn accepting(hash: B256) -> Self {
        Self {
            broadcasts: Mutex::new(Vec::new()),
            outcome: Mutex::new(Some(Ok(hash))),
        }
    }

    fn rejecting(reason: &str) -> Self {
        Self {
            broadcasts: Mutex::new(Vec::new()),
            outcome: Mutex::new(Some(Err(SubmissionError::Rejected(reason.into())))),
        }
    }
}

#[async_trait]
impl ChainClient for RecordingChain {
    async fn pending_nonce(&self, _address: Address) -> Result<u64> {
        Ok(0)
    }

    async fn broadcast(&self, raw: Bytes) -> Result<B256, SubmissionError> {
        self.broadcasts.lock().unwrap().push(raw);
        self.outcome.lock().unwrap().take().expect("single broadcast")
    }
}

/// Never answers until the test releases it.
struct HangingChain {
    release: Notify,
}

#[async_trait]
impl ChainClient for HangingChain {
    async fn pending_nonce(&self, _address: Address) -> Result<u64> {
        Ok(0)
    }

    async fn broadcast(&self, _raw: Bytes) -> Result<B256, SubmissionError> {
        self.release.notified().await;
        Ok(B256::repeat_byte(0xAB))
    }
}

fn test_submitter<C: ChainClient>(chain: Arc<C>) -> TxSubmitter<C> {
    let signer: PrivateKeySigner = TEST_PRIVATE_KEY.parse().unwrap();
    TxSubmitter::new(chain, signer, TEST_CHAIN_ID, 200_000, 100)
}

#[tokio::test]
async fn submit_broadcasts_signed_eip1559_envelope() -> Result<()> {
    let expected_hash = B256::repeat_byte(0x42);
    let chain = Arc::new(RecordingChain::accepting(expected_hash));
    let submitter = test_submitter(chain.clone());

    let to = Address::repeat_byte(0xAA);
    let calldata = Bytes::from(vec![0xDE, 0xAD, 0xBE, 0xEF]);
    let hash = submitter.submit(7, to, calldata.clone()).await?;
    assert_eq!(hash, expected_hash);

    let broadcasts = chain.broadcasts.lock().unwrap().clone();
    assert_eq!(broadcasts.len(), 1);

    let mut slice = broadcasts[0].as_ref();
    let envelope = TxEnvelope::decode_2718(&mut slice)?;
    let sender = envelope.recover_signer()?;
    assert_eq!(sender, submitter.address());

    let TxEnvelope::Eip1559(signed) = envelope else {
        panic!("expected an EIP-1559 transaction");
    };
    let tx = signed.tx();

    assert_eq!(tx.chain_id, TEST_CHAIN_ID);
    assert_eq!(tx.nonce, 7);
    assert_eq!(tx.gas_limit, 200_000);
    assert_eq!(tx.max_fee_per_gas, 100_000_000_000); // 100 gwei
    assert_eq!(tx.max_priority_fee_per_gas, 1_000_000_000); // 1 gwei
    assert_eq!(tx.to, TxKind::Call(to));
    assert_eq!(tx.value, U256::ZERO);
    assert_eq!(tx.input, calldata);

    Ok(())
}

#[tokio::test]
async fn submit_surfaces_node_rejection() {
    let chain = Arc::new(RecordingChain::rejecting("insufficient funds"));
    let submitter = test_submitter(chain);

    let result = submitter
        .submit(0, Address::repeat_byte(0xAA), Bytes::new())
        .await;

    assert_eq!(
        result,
        Err(SubmissionError::Rejected("insufficient funds".into()))
    );
}

#[tokio::test]
async fn submit_stays_suspended_until_broadcast_resolves() {
    let chain = Arc::new(HangingChain {
        release: Notify::new(),
    });
    let submitter = test_submitter(chain.clone());

    let fut = submitter.submit(0, Address::repeat_byte(0xAA), Bytes::new());
    tokio::pin!(fut);

    // The node has not answered: the call must neither return nor fail.
    assert!(timeout(Duration::from_millis(50), &mut fut).await.is_err());

    chain.release.notify_one();
    let hash = timeout(Duration::from_secs(1), &mut fut)
        .await
        .expect("resolves once the node answers")
        .expect("accepted");
    assert_eq!(hash, B256::repeat_byte(0xAB));
}
