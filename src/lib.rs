pub mod blockchain;
pub mod config;
pub mod contracts;
pub mod keeper;
pub mod signer;
pub mod submitter;

pub use blockchain::{BlockchainClient, ChainClient};
pub use config::KeeperConfig;
pub use keeper::Keeper;
pub use signer::build_signer;
pub use submitter::{SubmissionError, TxSubmitter};
