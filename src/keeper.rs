use crate::blockchain::ChainClient;
use crate::contracts::{asset_id_bytes, FeeAccrualContract, PriceFeedContract, RiskParamContract};
use crate::submitter::TxSubmitter;
use alloy::primitives::FixedBytes;
use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

/// Fee accrual is rate-limited to once per day, independent of the poll
/// interval.
const ACCRUAL_INTERVAL_SECS: u64 = 60 * 60 * 24;

/// Drives the update loop: every tick pokes the price feed and the risk
/// parameter updater, and at most once a day drips the fee accrual
/// updater, all from one freshly queried nonce base.
pub struct Keeper<C> {
    client: Arc<C>,
    submitter: TxSubmitter<C>,
    price_feed: PriceFeedContract,
    risk_param: RiskParamContract,
    fee_accrual: FeeAccrualContract,
    asset_id: FixedBytes<32>,
    poll_interval: Duration,
    last_accrual_time: u64,
}

impl<C: ChainClient> Keeper<C> {
    pub fn new(
        client: Arc<C>,
        submitter: TxSubmitter<C>,
        price_feed: PriceFeedContract,
        risk_param: RiskParamContract,
        fee_accrual: FeeAccrualContract,
        asset_id: &str,
        poll_interval: Duration,
    ) -> Self {
        Self {
            client,
            submitter,
            price_feed,
            risk_param,
            fee_accrual,
            asset_id: asset_id_bytes(asset_id),
            poll_interval,
            // Zero means the first tick after startup always drips.
            last_accrual_time: 0,
        }
    }

    pub async fn run(mut self) {
        loop {
            if let Err(err) = self.tick().await {
                error!("tick aborted: {:#}", err);
            }

            info!("wait for {} seconds...", self.poll_interval.as_secs());
            tokio::time::sleep(self.poll_interval).await;
        }
    }

    pub async fn tick(&mut self) -> Result<()> {
        self.tick_at(unix_now()).await
    }

    /// Runs one keeper cycle as of `now` (unix seconds).
    ///
    /// The pending nonce is queried once per tick; the calls share it as a
    /// base with offsets 0, +1, +2. They are broadcast back-to-back before
    /// any of them can be mined, so a mid-tick re-query would return the
    /// same stale value — local incrementing is the only correct ordering.
    /// The offsets are never recomputed, even if an earlier call's nonce is
    /// rejected; the next tick's fresh query heals any resulting gap.
    pub async fn tick_at(&mut self, now: u64) -> Result<()> {
        let nonce = self
            .client
            .pending_nonce(self.submitter.address())
            .await
            .context("failed to query pending nonce")?;

        match self.price_feed.poke(&self.submitter, nonce).await {
            Ok(hash) => info!("call poke method of price feed, hash: {}", hash),
            Err(err) => error!("failed to call poke method of price feed, reason: {}", err),
        }

        match self
            .risk_param
            .poke(&self.submitter, nonce + 1, self.asset_id)
            .await
        {
            Ok(hash) => info!("call poke method of risk param updater, hash: {}", hash),
            Err(err) => error!(
                "failed to call poke method of risk param updater, reason: {}",
                err
            ),
        }

        if now.saturating_sub(self.last_accrual_time) >= ACCRUAL_INTERVAL_SECS {
            match self
                .fee_accrual
                .drip(&self.submitter, nonce + 2, self.asset_id)
                .await
            {
                Ok(hash) => {
                    self.last_accrual_time = now;
                    info!("call drip method of fee accrual updater, hash: {}", hash);
                }
                Err(err) => error!(
                    "failed to call drip method of fee accrual updater, reason: {}",
                    err
                ),
            }
        }

        Ok(())
    }
}

fn unix_now() -> u64 {
    Utc::now().timestamp().max(0) as u64
}
