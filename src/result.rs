//! Result type for order submission.

use crate::{ErrorCode, OrderId, OrderStatus, Quantity, Trade};

/// Result of submitting an order.
///
/// The `trades` field is the complete, ordered, authoritative list of trades
/// produced by the submission; any fan-out to a bus or log happens from it.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubmitResult {
    /// The order id the caller assigned
    pub order_id: OrderId,
    /// Final status of the order after this call
    pub status: OrderStatus,
    /// Trades generated by this submission, in match order
    pub trades: Vec<Trade>,
    /// Quantity filled during this call
    pub filled_quantity: Quantity,
    /// Quantity left resting on the book (always 0 for market orders)
    pub resting_quantity: Quantity,
    /// Quantity not filled: resting for limits, dropped for markets
    pub remaining_quantity: Quantity,
    /// Why the order was rejected; `None` unless `status` is `Rejected`
    pub reject_reason: Option<ErrorCode>,
}

impl SubmitResult {
    pub(crate) fn rejected(order_id: OrderId, reason: ErrorCode, quantity: Quantity) -> Self {
        Self {
            order_id,
            status: OrderStatus::Rejected,
            trades: Vec::new(),
            filled_quantity: 0,
            resting_quantity: 0,
            remaining_quantity: quantity,
            reject_reason: Some(reason),
        }
    }

    /// Returns true if any trades occurred.
    pub fn has_trades(&self) -> bool {
        !self.trades.is_empty()
    }

    /// Returns true if the order was fully filled.
    pub fn is_fully_filled(&self) -> bool {
        self.status == OrderStatus::Filled
    }

    /// Returns true if the order is resting on the book after this call.
    pub fn is_resting(&self) -> bool {
        self.resting_quantity > 0
    }
}
