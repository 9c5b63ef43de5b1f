use crate::blockchain::ChainClient;
use crate::submitter::{SubmissionError, TxSubmitter};
use alloy::primitives::{Address, FixedBytes, B256};
use alloy::sol;
use alloy::sol_types::SolCall;

sol! {
    interface IRiskParam {
        function poke(bytes32 ilk) external;
    }
}

/// Collateral-risk parameter updater: `poke(ilk)` recomputes the spot
/// price and liquidation parameters for one collateral type.
#[derive(Clone)]
pub struct RiskParamContract {
    address: Address,
}

impl RiskParamContract {
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
        ilk: FixedBytes<32>,
    ) -> Result<B256, SubmissionError> {
        let call = IRiskParam::pokeCall { ilk };
        let data: Vec<u8> = call.abi_encode();

        submitter.submit(nonce, self.address, data.into()).await
    }
}
