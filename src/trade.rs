//! Trade representation

use crate::{OrderId, Price, Quantity, Side, Symbol, Timestamp, TradeId};
use std::fmt;

/// A completed match between a buy order and a sell order.
///
/// One incoming order can generate several trades when it sweeps multiple
/// resting orders. Trades are immutable once emitted; the book keeps no
/// reference to them after returning.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trade {
    /// Unique identifier, strictly increasing per book
    pub id: TradeId,
    /// The buying order, regardless of which side was the aggressor
    pub buy_order_id: OrderId,
    /// The selling order
    pub sell_order_id: OrderId,
    /// Instrument that was traded
    pub symbol: Symbol,
    /// Execution price (always the resting order's price)
    pub price: Price,
    /// Quantity executed
    pub quantity: Quantity,
    /// When the trade occurred
    pub timestamp: Timestamp,
    /// Side of the incoming order that caused the match
    pub aggressor_side: Side,
}

impl Trade {
    /// Create a new trade.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: TradeId,
        buy_order_id: OrderId,
        sell_order_id: OrderId,
        symbol: Symbol,
        price: Price,
        quantity: Quantity,
        aggressor_side: Side,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            buy_order_id,
            sell_order_id,
            symbol,
            price,
            quantity,
            timestamp,
            aggressor_side,
        }
    }

    /// Returns the id of the incoming (taker) order.
    #[inline]
    pub fn aggressor_order_id(&self) -> OrderId {
        match self.aggressor_side {
            Side::Buy => self.buy_order_id,
            Side::Sell => self.sell_order_id,
        }
    }

    /// Returns the id of the resting (maker) order.
    #[inline]
    pub fn passive_order_id(&self) -> OrderId {
        match self.aggressor_side {
            Side::Buy => self.sell_order_id,
            Side::Sell => self.buy_order_id,
        }
    }

    /// Notional value: price × quantity, still in scaled price units.
    #[inline]
    pub fn notional(&self) -> i64 {
        self.price.0 * self.quantity as i64
    }
}

impl fmt::Display for Trade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} {} {} @ {} ({} aggressor)",
            self.id, self.quantity, self.symbol, self.aggressor_side, self.price, self.aggressor_order_id()
        )
    }
}
