//! Order representation and lifecycle

use crate::{clock, OrderId, Price, Quantity, Side, Symbol, Timestamp};

/// Kind of order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrderType {
    /// Execute at the named price or better; residual rests on the book.
    Limit,
    /// Execute at the best available prices; residual is discarded.
    Market,
}

/// Status of an order in its lifecycle.
///
/// ```text
/// New -> PartiallyFilled -> Filled
/// New -> Filled
/// New | PartiallyFilled -> Cancelled
/// New -> Rejected            (failed validation, never entered the book)
/// ```
///
/// Filled, Cancelled and Rejected are terminal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OrderStatus {
    /// Accepted, no fills yet
    #[default]
    New,
    /// Some quantity executed, remainder open
    PartiallyFilled,
    /// Fully executed, no longer on the book
    Filled,
    /// Removed by caller request, no longer on the book
    Cancelled,
    /// Failed validation, never placed on the book
    Rejected,
}

impl OrderStatus {
    /// Returns true if the order can still be filled or cancelled.
    #[inline]
    pub fn is_active(self) -> bool {
        matches!(self, OrderStatus::New | OrderStatus::PartiallyFilled)
    }

    /// Returns true if the order is terminal (no further state changes).
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Filled | OrderStatus::Cancelled | OrderStatus::Rejected
        )
    }
}

/// An order submitted to the book.
///
/// The caller constructs the order (ids are caller-assigned) and hands it to
/// [`crate::OrderBook::submit`]. While it rests, the book owns the stored
/// copy; the caller follows it by id.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Order {
    /// Caller-assigned identifier, unique per book
    pub id: OrderId,
    /// Instrument this order is for
    pub symbol: Symbol,
    /// Buy or sell
    pub side: Side,
    /// Limit or market
    pub order_type: OrderType,
    /// Total quantity when submitted
    pub quantity: Quantity,
    /// Quantity executed so far (monotone, never exceeds `quantity`)
    pub filled_quantity: Quantity,
    /// Limit price; `Price::ZERO` for market orders
    pub price: Price,
    /// Current lifecycle status
    pub status: OrderStatus,
    /// When the order was created
    pub timestamp: Timestamp,
}

impl Order {
    /// Create an order with an explicit timestamp (deterministic tests).
    pub fn new(
        id: OrderId,
        symbol: Symbol,
        side: Side,
        order_type: OrderType,
        quantity: Quantity,
        price: Price,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            symbol,
            side,
            order_type,
            quantity,
            filled_quantity: 0,
            price,
            status: OrderStatus::New,
            timestamp,
        }
    }

    /// Create a limit order stamped with the monotonic clock.
    pub fn limit(id: OrderId, symbol: Symbol, side: Side, quantity: Quantity, price: Price) -> Self {
        Self::new(
            id,
            symbol,
            side,
            OrderType::Limit,
            quantity,
            price,
            clock::monotonic_nanos(),
        )
    }

    /// Create a market order stamped with the monotonic clock.
    ///
    /// Market orders carry the `Price::ZERO` sentinel and cross any price.
    pub fn market(id: OrderId, symbol: Symbol, side: Side, quantity: Quantity) -> Self {
        Self::new(
            id,
            symbol,
            side,
            OrderType::Market,
            quantity,
            Price::ZERO,
            clock::monotonic_nanos(),
        )
    }

    /// Quantity still open to fill.
    #[inline]
    pub fn remaining(&self) -> Quantity {
        self.quantity - self.filled_quantity
    }

    /// Returns true once the full quantity has executed.
    #[inline]
    pub fn is_filled(&self) -> bool {
        self.filled_quantity >= self.quantity
    }

    /// Returns true if the order can still be filled or cancelled.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    #[inline]
    pub fn is_buy(&self) -> bool {
        self.side == Side::Buy
    }

    #[inline]
    pub fn is_sell(&self) -> bool {
        self.side == Side::Sell
    }

    #[inline]
    pub fn is_limit(&self) -> bool {
        self.order_type == OrderType::Limit
    }

    #[inline]
    pub fn is_market(&self) -> bool {
        self.order_type == OrderType::Market
    }

    /// Apply a fill and step the status machine.
    ///
    /// # Panics
    ///
    /// Panics if `quantity` exceeds the remaining quantity.
    pub fn fill(&mut self, quantity: Quantity) {
        assert!(
            quantity <= self.remaining(),
            "fill quantity {} exceeds remaining {}",
            quantity,
            self.remaining()
        );

        self.filled_quantity += quantity;
        self.status = if self.is_filled() {
            OrderStatus::Filled
        } else {
            OrderStatus::PartiallyFilled
        };
    }

    /// Cancel the order, returning the quantity that was still open.
    ///
    /// # Panics
    ///
    /// Panics if the order is already in a terminal state.
    pub fn cancel(&mut self) -> Quantity {
        assert!(
            self.is_active(),
            "cannot cancel order in terminal state {:?}",
            self.status
        );

        let open = self.remaining();
        self.status = OrderStatus::Cancelled;
        open
    }

    /// Mark the order rejected (validation failure; never entered the book).
    pub(crate) fn reject(&mut self) {
        self.status = OrderStatus::Rejected;
    }
}
