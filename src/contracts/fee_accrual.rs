use crate::blockchain::ChainClient;
use crate::submitter::{SubmissionError, TxSubmitter};
use alloy::primitives::{Address, FixedBytes, B256};
use alloy::sol;
use alloy::sol_types::SolCall;

sol! {
    interface IFeeAccrual {
        function drip(bytes32 ilk) external;
    }
}

/// Fee-accrual updater: `drip(ilk)` folds accumulated stability fees for
/// one collateral type into the accounting rate.
#[derive(Clone)]
pub struct FeeAccrualContract {
    address: Address,
}

impl FeeAccrualContract {
    pub fn new(address: Address) -> Self {
        Self { address }
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub async fn drip<C: ChainClient>(
        &self,
        submitter: &TxSubmitter<C>,
        nonce: u64,
        ilk: FixedBytes<32>,
    ) -> Result<B256, SubmissionError> {
        let call = IFeeAccrual::dripCall { ilk };
        let data: Vec<u8> = call.abi_encode();

        submitter.submit(nonce, self.address, data.into()).await
    }
}
