//! Matching engine: the core algorithm for executing trades.
//!
//! Price-time priority:
//! 1. Better prices match first (higher bids, lower asks)
//! 2. At the same price, earlier orders match first (FIFO)
//! 3. Trades execute at the resting order's price (price improvement for
//!    the aggressor)

use crate::{Order, OrderBook, Price, Side, Trade};

impl OrderBook {
    /// Check whether an incoming order's price crosses a resting price.
    ///
    /// - Market orders cross any price
    /// - Buy limit crosses if incoming >= resting ask
    /// - Sell limit crosses if incoming <= resting bid
    #[inline]
    fn prices_cross(incoming: &Order, resting_price: Price) -> bool {
        if incoming.is_market() {
            return true;
        }
        match incoming.side {
            Side::Buy => incoming.price >= resting_price,
            Side::Sell => incoming.price <= resting_price,
        }
    }

    /// Match an incoming order against the opposite side, best level first.
    ///
    /// Fills both orders, emits a trade per fill, removes fully filled
    /// resting orders from their level and from the by-id index, and evicts
    /// emptied levels. The incoming order is not added to the book here;
    /// `submit` decides what happens to any residual.
    pub(crate) fn match_incoming(&mut self, incoming: &mut Order, trades: &mut Vec<Trade>) {
        while incoming.remaining() > 0 {
            let opposite = self.side_ref(incoming.side.opposite());
            let best_price = match opposite.best_price() {
                Some(price) => price,
                None => break, // no liquidity
            };

            if !Self::prices_cross(incoming, best_price) {
                break;
            }

            self.fill_at_level(incoming, best_price, trades);
        }
    }

    /// Fill against the FIFO queue at one price level until the incoming
    /// order or the level is exhausted.
    fn fill_at_level(&mut self, incoming: &mut Order, price: Price, trades: &mut Vec<Trade>) {
        while incoming.remaining() > 0 {
            let level = self.opposite_mut(incoming.side).get_level_mut(price);
            let resting_id = match level.and_then(|l| l.front()) {
                Some(id) => id,
                None => break, // level exhausted and evicted
            };

            let resting_remaining = self
                .orders
                .get(&resting_id)
                .expect("level order present in central store")
                .remaining();
            let fill_qty = incoming.remaining().min(resting_remaining);

            let (buy_order_id, sell_order_id) = match incoming.side {
                Side::Buy => (incoming.id, resting_id),
                Side::Sell => (resting_id, incoming.id),
            };
            let trade = Trade::new(
                self.next_trade_id(),
                buy_order_id,
                sell_order_id,
                self.symbol(),
                price, // the resting order's price, never the aggressor's
                fill_qty,
                incoming.side,
                self.now(),
            );
            trades.push(trade);

            incoming.fill(fill_qty);

            let resting_filled = {
                let resting = self
                    .orders
                    .get_mut(&resting_id)
                    .expect("level order present in central store");
                resting.fill(fill_qty);
                resting.is_filled()
            };

            // Keep the level's cached total in step with the fill while the
            // resting order is still resident.
            if let Some(level) = self.opposite_mut(incoming.side).get_level_mut(price) {
                level.reduce_quantity(fill_qty);
            }

            if resting_filled {
                let location = self
                    .locations
                    .remove(&resting_id)
                    .expect("resting order indexed by id");
                // Remaining is zero after the fill; the cache was already
                // reduced above. Evicts the level if this was the last order.
                self.side_mut(location.side)
                    .remove_order(location.price, location.slot, 0);
            }
        }
    }
}
