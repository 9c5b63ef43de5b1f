pub mod fee_accrual;
pub mod price_feed;
pub mod risk_param;

pub use fee_accrual::FeeAccrualContract;
pub use price_feed::PriceFeedContract;
pub use risk_param::RiskParamContract;

use alloy::primitives::FixedBytes;

/// Fixed-width encoding of a collateral identifier: ASCII bytes
/// right-padded with zeros to exactly 32 bytes. The contracts key their
/// storage by bytes32, so anything longer is truncated to the first 32.
pub fn asset_id_bytes(id: &str) -> FixedBytes<32> {
    let mut out = [0u8; 32];
    let bytes = id.as_bytes();
    let len = bytes.len().min(32);
    out[..len].copy_from_slice(&bytes[..len]);
    FixedBytes::from(out)
}
