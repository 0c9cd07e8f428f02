//! PriceLevels: one side of the order book (bids or asks).
//!
//! Maintains a sorted collection of price levels with a cached best price
//! for O(1) best bid/offer queries.

use std::collections::BTreeMap;

use crate::{LevelSlot, OrderId, Price, PriceLevel, Quantity, Side};

/// One side of the order book (all bids or all asks).
///
/// - **Bids**: best = highest price
/// - **Asks**: best = lowest price
///
/// The `BTreeMap` provides O(log n) insert/remove with ordered iteration.
/// The best price is cached for O(1) access.
#[derive(Clone, Debug)]
pub struct PriceLevels {
    /// Price levels, sorted by price
    levels: BTreeMap<Price, PriceLevel>,
    /// Cached best price for O(1) access
    best_price: Option<Price>,
    /// Which side this represents (determines "best" direction)
    side: Side,
}

impl PriceLevels {
    /// Create a new empty collection for the given side.
    pub fn new(side: Side) -> Self {
        Self {
            levels: BTreeMap::new(),
            best_price: None,
            side,
        }
    }

    /// Returns which side this collection represents.
    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    /// Returns true if there are no orders on this side.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Returns the number of distinct price levels.
    #[inline]
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Returns the best price (highest for bids, lowest for asks). O(1).
    #[inline]
    pub fn best_price(&self) -> Option<Price> {
        self.best_price
    }

    /// Returns a reference to the best level. O(log n) map lookup on the
    /// cached key.
    pub fn best_level(&self) -> Option<&PriceLevel> {
        self.best_price.and_then(|p| self.levels.get(&p))
    }

    /// Returns a reference to the level at the given price, if it exists.
    pub fn get_level(&self, price: Price) -> Option<&PriceLevel> {
        self.levels.get(&price)
    }

    /// Returns a mutable reference to the level at the given price.
    pub fn get_level_mut(&mut self, price: Price) -> Option<&mut PriceLevel> {
        self.levels.get_mut(&price)
    }

    /// Append an order at the given price, creating the level on demand.
    ///
    /// Returns the slot for later O(1) removal.
    pub fn insert_order(
        &mut self,
        price: Price,
        order_id: OrderId,
        remaining: Quantity,
    ) -> LevelSlot {
        let level = self.get_or_create_level(price);
        level.push_back(order_id, remaining)
    }

    /// Remove the order at `slot` from the level at `price`.
    ///
    /// `remaining` is subtracted from the level's cached total. Evicts the
    /// level if it becomes empty; no side index ever holds an empty level.
    pub fn remove_order(&mut self, price: Price, slot: LevelSlot, remaining: Quantity) {
        let Some(level) = self.levels.get_mut(&price) else {
            return;
        };
        level.remove(slot, remaining);
        if level.is_empty() {
            self.remove_level(price);
        }
    }

    /// Remove a price level entirely, updating the best-price cache.
    pub fn remove_level(&mut self, price: Price) {
        if self.levels.remove(&price).is_some() && self.best_price == Some(price) {
            self.recompute_best_price();
        }
    }

    /// Returns an iterator over levels from best to worst price.
    ///
    /// - Bids: highest to lowest
    /// - Asks: lowest to highest
    pub fn iter_best_to_worst(&self) -> impl Iterator<Item = (&Price, &PriceLevel)> {
        let (fwd, rev) = match self.side {
            Side::Buy => (None, Some(self.levels.iter().rev())),
            Side::Sell => (Some(self.levels.iter()), None),
        };
        fwd.into_iter()
            .flatten()
            .chain(rev.into_iter().flatten())
    }

    /// Returns the total remaining quantity across all levels. O(levels).
    pub fn total_quantity(&self) -> Quantity {
        self.levels.values().map(|l| l.total_quantity()).sum()
    }

    /// Gets or creates a level at the given price, keeping the best-price
    /// cache current.
    fn get_or_create_level(&mut self, price: Price) -> &mut PriceLevel {
        if !self.levels.contains_key(&price) {
            self.update_best_price_after_insert(price);
            self.levels.insert(price, PriceLevel::new(price));
        }
        self.levels.get_mut(&price).unwrap()
    }

    /// Recompute best price from scratch (O(log n) for BTreeMap).
    fn recompute_best_price(&mut self) {
        self.best_price = match self.side {
            Side::Buy => self.levels.keys().next_back().copied(),
            Side::Sell => self.levels.keys().next().copied(),
        };
    }

    fn update_best_price_after_insert(&mut self, new_price: Price) {
        match self.best_price {
            None => self.best_price = Some(new_price),
            Some(current_best) => {
                let is_better = match self.side {
                    Side::Buy => new_price > current_best,
                    Side::Sell => new_price < current_best,
                };
                if is_better {
                    self.best_price = Some(new_price);
                }
            }
        }
    }
}
