//! OrderBook: both sides of a single instrument's book plus the order
//! indexes.
//!
//! Three structures cooperate:
//! - `bids` / `asks`: price-sorted sides, best price cached
//! - `orders`: central store, O(1) lookup by id (resting and retired
//!   orders, the latter kept for status queries)
//! - `locations`: the by-id index over exactly the resting orders; each
//!   entry carries the level slot that makes cancel O(1)

use rustc_hash::FxHashMap;

use crate::{
    clock, ErrorCode, LevelSlot, Order, OrderId, Price, PriceLevels, Quantity, Side, SubmitResult,
    Symbol, Timestamp, TradeId,
};

/// Where a resting order sits: its side, its price level, and its slot
/// inside that level. Valid exactly while the order rests; erased the
/// instant the order is filled or cancelled.
#[derive(Clone, Copy, Debug)]
pub(crate) struct OrderLocation {
    pub(crate) side: Side,
    pub(crate) price: Price,
    pub(crate) slot: LevelSlot,
}

/// A single-instrument limit order book with price-time priority matching.
///
/// Single-writer: all operations run to completion on the caller's thread.
/// One book per instrument; books on different threads need no coordination.
///
/// ```
/// use matchbook::{Order, OrderBook, OrderId, Price, Side, Symbol};
///
/// let sym = Symbol::new("AAPL");
/// let mut book = OrderBook::new(sym);
///
/// book.submit(Order::limit(OrderId(1), sym, Side::Sell, 100, Price::from_f64(150.0)));
/// let result = book.submit(Order::limit(OrderId(2), sym, Side::Buy, 100, Price::from_f64(150.0)));
///
/// assert_eq!(result.trades.len(), 1);
/// assert_eq!(result.trades[0].price, Price::from_f64(150.0));
/// assert!(book.is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct OrderBook {
    /// The instrument this book serves
    symbol: Symbol,
    /// Buy side, best = highest price
    pub(crate) bids: PriceLevels,
    /// Sell side, best = lowest price
    pub(crate) asks: PriceLevels,
    /// All accepted orders by id, including filled/cancelled for history
    pub(crate) orders: FxHashMap<OrderId, Order>,
    /// Resting orders only: id -> position (the "by id" index)
    pub(crate) locations: FxHashMap<OrderId, OrderLocation>,
    /// Last issued trade id; pre-incremented, so the first trade gets 1
    next_trade_id: u64,
    /// Timestamp source for trades; swap in a counter for deterministic tests
    pub(crate) clock: fn() -> Timestamp,
}

impl OrderBook {
    /// Create an empty book for the given instrument.
    pub fn new(symbol: Symbol) -> Self {
        Self::with_clock(symbol, clock::monotonic_nanos)
    }

    /// Create an empty book with an explicit timestamp source.
    pub fn with_clock(symbol: Symbol, clock: fn() -> Timestamp) -> Self {
        Self {
            symbol,
            bids: PriceLevels::new(Side::Buy),
            asks: PriceLevels::new(Side::Sell),
            orders: FxHashMap::default(),
            locations: FxHashMap::default(),
            next_trade_id: 0,
            clock,
        }
    }

    // === Core operations ===

    /// Submit an order: validate, match against the opposite side, rest any
    /// limit residual.
    ///
    /// A validation failure sets the order's status to `Rejected` and
    /// returns an empty trade list; the book is untouched and the order is
    /// not stored. A market order's residual is dropped, never rested.
    ///
    /// Re-submitting an id that is still resting is a caller error (the
    /// id-to-position index must stay a bijection) and panics.
    pub fn submit(&mut self, mut order: Order) -> SubmitResult {
        if let Err(reason) = self.validate(&order) {
            order.reject();
            return SubmitResult::rejected(order.id, reason, order.quantity);
        }

        let order_id = order.id;
        let mut trades = Vec::new();
        self.match_incoming(&mut order, &mut trades);

        let filled_quantity = order.filled_quantity;
        let remaining_quantity = order.remaining();
        let status = order.status;

        let resting_quantity = if remaining_quantity > 0 && order.is_limit() {
            self.rest(order);
            remaining_quantity
        } else {
            // Fully filled, or a market residual being dropped; keep the
            // order queryable by id either way.
            self.orders.insert(order_id, order);
            0
        };

        SubmitResult {
            order_id,
            status,
            trades,
            filled_quantity,
            resting_quantity,
            remaining_quantity,
            reject_reason: None,
        }
    }

    /// Cancel a resting order by id. O(1).
    ///
    /// Only the resting index is consulted, so a double cancel and a cancel
    /// of an id that left the book on full fill both return
    /// `OrderNotFound`. A failed cancel changes nothing.
    pub fn cancel(&mut self, order_id: OrderId) -> ErrorCode {
        let Some(location) = self.locations.remove(&order_id) else {
            return ErrorCode::OrderNotFound;
        };

        let order = self
            .orders
            .get_mut(&order_id)
            .expect("resting order present in central store");
        let open = order.cancel();

        self.side_mut(location.side)
            .remove_order(location.price, location.slot, open);

        ErrorCode::Success
    }

    // === Market data ===

    /// Highest resting bid price, if any. O(1).
    pub fn best_bid(&self) -> Option<Price> {
        self.bids.best_price()
    }

    /// Lowest resting ask price, if any. O(1).
    pub fn best_ask(&self) -> Option<Price> {
        self.asks.best_price()
    }

    /// Best ask minus best bid, when both exist. O(1).
    pub fn spread(&self) -> Option<Price> {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => Some(Price(ask.0 - bid.0)),
            _ => None,
        }
    }

    /// Total remaining quantity at an exact price on one side; 0 if the
    /// level is absent. O(log n).
    pub fn volume_at_price(&self, side: Side, price: Price) -> Quantity {
        self.side_ref(side)
            .get_level(price)
            .map_or(0, |level| level.total_quantity())
    }

    /// Returns true if best bid >= best ask. Never true between operations;
    /// exists as an invariant probe for tests.
    pub fn is_crossed(&self) -> bool {
        match (self.best_bid(), self.best_ask()) {
            (Some(bid), Some(ask)) => bid >= ask,
            _ => false,
        }
    }

    // === Book state ===

    /// The instrument this book serves.
    pub fn symbol(&self) -> Symbol {
        self.symbol
    }

    /// Number of resting orders. O(1).
    pub fn order_count(&self) -> usize {
        self.locations.len()
    }

    /// Returns true if no orders are resting. O(1).
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Number of distinct bid price levels. O(1).
    pub fn bid_levels(&self) -> usize {
        self.bids.level_count()
    }

    /// Number of distinct ask price levels. O(1).
    pub fn ask_levels(&self) -> usize {
        self.asks.level_count()
    }

    /// The buy side.
    pub fn bids(&self) -> &PriceLevels {
        &self.bids
    }

    /// The sell side.
    pub fn asks(&self) -> &PriceLevels {
        &self.asks
    }

    // === Order access ===

    /// Look up an order by id, including retired (filled/cancelled) orders.
    pub fn get_order(&self, order_id: OrderId) -> Option<&Order> {
        self.orders.get(&order_id)
    }

    /// Returns true if the id is currently resting on the book.
    pub fn is_resting(&self, order_id: OrderId) -> bool {
        self.locations.contains_key(&order_id)
    }

    /// Ids of all resting orders, in no particular order.
    pub fn resting_order_ids(&self) -> impl Iterator<Item = OrderId> + '_ {
        self.locations.keys().copied()
    }

    /// Drop retired orders from the store; resting orders are untouched.
    ///
    /// Returns the number of orders removed. Long-running books call this
    /// periodically to bound memory.
    pub fn clear_history(&mut self) -> usize {
        let before = self.orders.len();
        let locations = &self.locations;
        self.orders.retain(|id, _| locations.contains_key(id));
        before - self.orders.len()
    }

    // === Internal helpers ===

    fn validate(&self, order: &Order) -> Result<(), ErrorCode> {
        if order.quantity == 0 {
            return Err(ErrorCode::InvalidQuantity);
        }
        if order.symbol.is_empty() {
            return Err(ErrorCode::BookNotFound);
        }
        if order.is_limit() && order.price.0 <= 0 {
            return Err(ErrorCode::InvalidPrice);
        }
        Ok(())
    }

    /// Rest a limit residual: store the order, append it to its level, and
    /// register its position in the by-id index.
    fn rest(&mut self, order: Order) {
        assert!(
            !self.locations.contains_key(&order.id),
            "order {} is already resting",
            order.id
        );

        let (id, side, price) = (order.id, order.side, order.price);
        let remaining = order.remaining();

        self.orders.insert(id, order);
        let slot = self.side_mut(side).insert_order(price, id, remaining);
        self.locations.insert(id, OrderLocation { side, price, slot });
    }

    pub(crate) fn side_ref(&self, side: Side) -> &PriceLevels {
        match side {
            Side::Buy => &self.bids,
            Side::Sell => &self.asks,
        }
    }

    pub(crate) fn side_mut(&mut self, side: Side) -> &mut PriceLevels {
        match side {
            Side::Buy => &mut self.bids,
            Side::Sell => &mut self.asks,
        }
    }

    /// The side an incoming order matches against.
    pub(crate) fn opposite_mut(&mut self, side: Side) -> &mut PriceLevels {
        self.side_mut(side.opposite())
    }

    /// Issue the next trade id: pre-incremented, strictly increasing, never
    /// reused over the life of the book.
    pub(crate) fn next_trade_id(&mut self) -> TradeId {
        self.next_trade_id += 1;
        TradeId(self.next_trade_id)
    }

    pub(crate) fn now(&self) -> Timestamp {
        (self.clock)()
    }
}
