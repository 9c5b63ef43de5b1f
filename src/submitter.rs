use crate::blockchain::ChainClient;
use alloy::consensus::{SignableTransaction, TxEip1559, TxEnvelope};
use alloy::eips::eip2718::Encodable2718;
use alloy::network::TxSignerSync;
use alloy::primitives::{Address, Bytes, TxKind, B256, U256};
use alloy::signers::local::PrivateKeySigner;
use std::sync::Arc;
use thiserror::Error;

const GWEI: u128 = 1_000_000_000;

/// Tip kept at a flat 1 gwei; only the fee cap is operator-configured.
const MAX_PRIORITY_FEE_PER_GAS: u128 = GWEI;

/// How a single submission can fail. Every variant is fatal to that one
/// call only; the keeper loop carries on with the rest of the tick.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmissionError {
    #[error("failed to sign transaction: {0}")]
    SignFailed(String),
    #[error("transaction rejected: {0}")]
    Rejected(String),
    #[error("network unavailable: {0}")]
    NetworkUnavailable(String),
}

/// Signs and broadcasts one transaction at an explicit nonce, then waits
/// for the node's accept-or-reject verdict. Stateless between calls.
pub struct TxSubmitter<C> {
    client: Arc<C>,
    signer: PrivateKeySigner,
    chain_id: u64,
    gas_limit: u64,
    max_fee_per_gas_gwei: u64,
}

impl<C: ChainClient> TxSubmitter<C> {
    pub fn new(
        client: Arc<C>,
        signer: PrivateKeySigner,
        chain_id: u64,
        gas_limit: u64,
        max_fee_per_gas_gwei: u64,
    ) -> Self {
        Self {
            client,
            signer,
            chain_id,
            gas_limit,
            max_fee_per_gas_gwei,
        }
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }

    pub async fn submit(
        &self,
        nonce: u64,
        to: Address,
        calldata: Bytes,
    ) -> Result<B256, SubmissionError> {
        // Fee cap converted fresh on every call rather than held as a
        // precomputed wei amount.
        let max_fee_per_gas = self.max_fee_per_gas_gwei as u128 * GWEI;

        let mut tx = TxEip1559 {
            chain_id: self.chain_id,
            nonce,
            gas_limit: self.gas_limit,
            max_fee_per_gas,
            max_priority_fee_per_gas: MAX_PRIORITY_FEE_PER_GAS,
            to: TxKind::Call(to),
            value: U256::ZERO,
            access_list: Default::default(),
            input: calldata,
        };

        let signature = self
            .signer
            .sign_transaction_sync(&mut tx)
            .map_err(|e| SubmissionError::SignFailed(e.to_string()))?;

        let envelope: TxEnvelope = tx.into_signed(signature).into();
        let raw = envelope.encoded_2718();

        // Suspends until the node answers with exactly one of
        // {accepted: hash, rejected: reason}.
        self.client.broadcast(Bytes::from(raw)).await
    }
}
