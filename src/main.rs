use anyhow::Result;
use clap::Parser;
use dotenv::dotenv;
use oracle_keeper::blockchain::BlockchainClient;
use oracle_keeper::config::KeeperConfig;
use oracle_keeper::contracts::{FeeAccrualContract, PriceFeedContract, RiskParamContract};
use oracle_keeper::keeper::Keeper;
use oracle_keeper::signer::build_signer;
use oracle_keeper::submitter::TxSubmitter;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "oracle-keeper", about = "Keeps price feed, risk parameter and fee accrual contracts fresh")]
struct Args {
    /// Path to the keeper TOML config
    #[arg(long, default_value = "configs/keeper.toml")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logging
    tracing_subscriber::fmt::init();

    let args = Args::parse();
    let config = KeeperConfig::load(&args.config)?;

    let signer = build_signer(&config.credential)?;
    info!(
        "keeper address: 0x{}",
        hex::encode(signer.address().as_slice())
    );

    let client = Arc::new(BlockchainClient::connect(&config.chain.rpc_url).await?);

    let submitter = TxSubmitter::new(
        client.clone(),
        signer,
        client.chain_id(),
        config.transaction.gas_limit,
        config.transaction.max_fee_per_gas_gwei,
    );

    let price_feed = PriceFeedContract::new(BlockchainClient::parse_address(
        &config.contracts.price_feed_address,
    )?);
    let risk_param = RiskParamContract::new(BlockchainClient::parse_address(
        &config.contracts.risk_param_address,
    )?);
    let fee_accrual = FeeAccrualContract::new(BlockchainClient::parse_address(
        &config.contracts.fee_accrual_address,
    )?);

    let keeper = Keeper::new(
        client,
        submitter,
        price_feed,
        risk_param,
        fee_accrual,
        &config.keeper.asset_id,
        Duration::from_secs(config.keeper.poll_interval_seconds),
    );

    keeper.run().await;

    Ok(())
}
