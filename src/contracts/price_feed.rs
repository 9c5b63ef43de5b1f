use crate::blockchain::ChainClient;
use crate::submitter::{SubmissionError, TxSubmitter};
use alloy::primitives::{Address, B256};
use alloy::sol;
use alloy::sol_types::SolCall;

sol! {
    interface IPriceFeed {
        function poke() external;
    }
}

/// Price-feed relay: `poke()` pushes the next queued price into effect.
#[derive(Clone)]
pub struct PriceFeedContract {
    address: Address,
}

impl PriceFeedContract {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub async fn poke<C: ChainClient>(
        &self,
        submitter: &TxSubmitter<C>,
        nonce: u64,
    ) -> Result<B256, SubmissionError> {
        let call = IPriceFeed::pokeCall {};
        let data: Vec<u8> = call.abi_encode();

        submitter.submit(nonce, self.address, data.into()).await
    }
}
