//! Bundle-trade decomposition for single-choice questions priced by
//! per-option AMMs.
//!
//! "Outcome X will NOT win" has no native primitive when every option has its
//! own AMM; it is realized as one simultaneous YES purchase across every
//! sibling outcome. The backend performs the economic allocation; the client
//! only frames the request and validates the response against the contract.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::error;

use crate::backend::{AmmBackend, BundleOrder, BundleType};
use crate::domain::{AmountType, BundleQuote, MarketId, OptionId};
use crate::error::{BundleContractError, Result};

/// Composes and validates bundle quotes/trades. Bundles are atomic: the
/// backend either executes every component or nothing, so no partial-bundle
/// state exists here.
pub struct BundleComposer {
    backend: Arc<dyn AmmBackend>,
}

impl BundleComposer {
    pub fn new(backend: Arc<dyn AmmBackend>) -> Self {
        Self { backend }
    }

    /// Frame a BUY_NO bundle request against `target`.
    ///
    /// Per-sibling monetary allocation is never computed client-side; it
    /// would drift from the authoritative engine's rounding.
    pub fn compose(
        market: &MarketId,
        target: &OptionId,
        amount_type: AmountType,
        amount: Decimal,
    ) -> BundleOrder {
        BundleOrder {
            market_id: market.clone(),
            bundle_type: BundleType::BuyNo,
            target_option_id: target.clone(),
            amount_type,
            amount,
        }
    }

    pub async fn quote(&self, order: &BundleOrder) -> Result<BundleQuote> {
        let quote = self.backend.bundle_quote(order).await?;
        Self::verify(&order.target_option_id, &quote)?;
        Ok(quote)
    }

    pub async fn trade(&self, order: &BundleOrder) -> Result<BundleQuote> {
        let fill = self.backend.bundle_trade(order).await?;
        Self::verify(&order.target_option_id, &fill)?;
        Ok(fill)
    }

    /// Reject responses that violate the bundle contract rather than
    /// rendering them.
    fn verify(target: &OptionId, quote: &BundleQuote) -> std::result::Result<(), BundleContractError> {
        if quote.components.is_empty() {
            error!(%target, "Bundle response carried no components");
            return Err(BundleContractError::EmptyComponents);
        }
        if quote.contains_option(target) {
            error!(%target, "Bundle response included the excluded target");
            return Err(BundleContractError::TargetInComponents {
                option: target.to_string(),
            });
        }
        let summed = quote.component_shares();
        if quote.total_shares != summed {
            error!(
                total = %quote.total_shares,
                %summed,
                "Bundle share totals disagree"
            );
            return Err(BundleContractError::ShareMismatch {
                total: quote.total_shares,
                summed,
            });
        }
        Ok(())
    }
}
