//! End-to-end matching scenarios and the laws the book must satisfy.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use matchbook::{
    ErrorCode, Order, OrderBook, OrderId, OrderStatus, Price, Quantity, Side, Symbol,
};

static TICK: AtomicU64 = AtomicU64::new(1);

/// Deterministic timestamp source: a strictly increasing counter.
fn tick() -> u64 {
    TICK.fetch_add(1, Ordering::Relaxed)
}

fn sym() -> Symbol {
    Symbol::new("AAPL")
}

fn px(p: f64) -> Price {
    Price::from_f64(p)
}

fn book() -> OrderBook {
    OrderBook::with_clock(sym(), tick)
}

fn limit(id: u64, side: Side, qty: Quantity, price: f64) -> Order {
    Order::limit(OrderId(id), sym(), side, qty, px(price))
}

// ============================================================================
// Concrete scenarios
// ============================================================================

#[test]
fn exact_match_book_clears() {
    let mut book = book();

    book.submit(limit(1, Side::Sell, 100, 150.0));
    let result = book.submit(limit(2, Side::Buy, 100, 150.0));

    assert_eq!(result.trades.len(), 1);
    let trade = &result.trades[0];
    assert_eq!(trade.quantity, 100);
    assert_eq!(trade.price, px(150.0));
    assert_eq!(trade.aggressor_side, Side::Buy);

    assert!(book.is_empty());
    assert_eq!(book.get_order(OrderId(1)).unwrap().status, OrderStatus::Filled);
    assert_eq!(book.get_order(OrderId(2)).unwrap().status, OrderStatus::Filled);
}

#[test]
fn price_improvement_for_aggressor() {
    let mut book = book();

    book.submit(limit(1, Side::Sell, 100, 150.0));
    let result = book.submit(limit(2, Side::Buy, 100, 151.0));

    // Prints at the resting price, not the aggressor's.
    assert_eq!(result.trades.len(), 1);
    assert_eq!(result.trades[0].price, px(150.0));
    assert_eq!(result.trades[0].quantity, 100);
    assert!(book.is_empty());
}

#[test]
fn partial_fill_aggressor_rests() {
    let mut book = book();

    book.submit(limit(1, Side::Sell, 60, 150.0));
    let result = book.submit(limit(2, Side::Buy, 100, 150.0));

    assert_eq!(result.trades.len(), 1);
    assert_eq!(result.trades[0].quantity, 60);
    assert_eq!(result.trades[0].price, px(150.0));
    assert_eq!(result.status, OrderStatus::PartiallyFilled);

    assert_eq!(book.best_bid(), Some(px(150.0)));
    assert_eq!(book.volume_at_price(Side::Buy, px(150.0)), 40);
    assert_eq!(book.best_ask(), None);
}

#[test]
fn multi_level_sweep_with_fifo() {
    let mut book = book();

    book.submit(limit(1, Side::Sell, 50, 150.0)); // S1
    book.submit(limit(2, Side::Sell, 50, 151.0)); // S2
    book.submit(limit(3, Side::Sell, 50, 152.0)); // S3

    let result = book.submit(limit(4, Side::Buy, 120, 152.0));

    assert_eq!(result.trades.len(), 3);
    assert_eq!(result.trades[0].sell_order_id, OrderId(1));
    assert_eq!(result.trades[0].quantity, 50);
    assert_eq!(result.trades[0].price, px(150.0));
    assert_eq!(result.trades[1].sell_order_id, OrderId(2));
    assert_eq!(result.trades[1].quantity, 50);
    assert_eq!(result.trades[1].price, px(151.0));
    assert_eq!(result.trades[2].sell_order_id, OrderId(3));
    assert_eq!(result.trades[2].quantity, 20);
    assert_eq!(result.trades[2].price, px(152.0));

    assert_eq!(book.ask_levels(), 1);
    assert_eq!(book.best_ask(), Some(px(152.0)));
    assert_eq!(book.volume_at_price(Side::Sell, px(152.0)), 30);
}

#[test]
fn fifo_at_single_price() {
    let mut book = book();

    book.submit(limit(1, Side::Sell, 50, 150.0)); // A
    book.submit(limit(2, Side::Sell, 50, 150.0)); // B

    let result = book.submit(limit(3, Side::Buy, 50, 150.0));

    // Exactly one trade, against A, not B.
    assert_eq!(result.trades.len(), 1);
    assert_eq!(result.trades[0].sell_order_id, OrderId(1));

    assert_eq!(book.get_order(OrderId(1)).unwrap().status, OrderStatus::Filled);
    let b = book.get_order(OrderId(2)).unwrap();
    assert_eq!(b.status, OrderStatus::New);
    assert_eq!(b.remaining(), 50);
    assert!(book.is_resting(OrderId(2)));
}

#[test]
fn cancel_after_partial_fill() {
    let mut book = book();

    book.submit(limit(1, Side::Sell, 100, 150.0));
    let result = book.submit(limit(2, Side::Buy, 40, 150.0));
    assert_eq!(result.trades.len(), 1);
    assert_eq!(
        book.get_order(OrderId(1)).unwrap().status,
        OrderStatus::PartiallyFilled
    );
    assert_eq!(book.get_order(OrderId(1)).unwrap().remaining(), 60);

    assert_eq!(book.cancel(OrderId(1)), ErrorCode::Success);

    assert_eq!(
        book.get_order(OrderId(1)).unwrap().status,
        OrderStatus::Cancelled
    );
    assert_eq!(book.best_ask(), None);
    assert!(!book.is_resting(OrderId(1)));
}

// ============================================================================
// Laws
// ============================================================================

/// Observable book state, for before/after comparisons.
#[derive(Debug, PartialEq, Eq)]
struct BookState {
    best_bid: Option<Price>,
    best_ask: Option<Price>,
    bid_levels: Vec<(Price, Quantity, usize)>,
    ask_levels: Vec<(Price, Quantity, usize)>,
    resting: Vec<OrderId>,
}

fn capture(book: &OrderBook) -> BookState {
    let levels = |side: &matchbook::PriceLevels| {
        side.iter_best_to_worst()
            .map(|(p, l)| (*p, l.total_quantity(), l.order_count()))
            .collect::<Vec<_>>()
    };
    let mut resting: Vec<_> = book.resting_order_ids().collect();
    resting.sort_by_key(|id| id.0);
    BookState {
        best_bid: book.best_bid(),
        best_ask: book.best_ask(),
        bid_levels: levels(book.bids()),
        ask_levels: levels(book.asks()),
        resting,
    }
}

#[test]
fn submit_then_cancel_round_trip() {
    let mut book = book();
    book.submit(limit(1, Side::Buy, 100, 149.0));
    book.submit(limit(2, Side::Sell, 80, 151.0));

    let before = capture(&book);

    // A non-crossing limit, then its cancel, restores the prior state.
    book.submit(limit(3, Side::Buy, 25, 150.0));
    assert_ne!(capture(&book), before);
    assert_eq!(book.cancel(OrderId(3)), ErrorCode::Success);

    assert_eq!(capture(&book), before);
}

#[test]
fn market_order_never_rests() {
    let mut book = book();
    book.submit(limit(1, Side::Sell, 50, 150.0));

    book.submit(Order::market(OrderId(2), sym(), Side::Buy, 500));

    assert!(!book.is_resting(OrderId(2)));
    assert!(book
        .resting_order_ids()
        .all(|id| id != OrderId(2)));
}

#[test]
fn bijection_between_index_and_levels() {
    let mut book = book();
    for i in 0..20u64 {
        let side = if i % 2 == 0 { Side::Buy } else { Side::Sell };
        let price = if side == Side::Buy {
            149.0 - (i % 5) as f64
        } else {
            151.0 + (i % 5) as f64
        };
        book.submit(limit(i + 1, side, 10 + i, price));
    }
    let _ = book.cancel(OrderId(3));
    let _ = book.cancel(OrderId(8));
    book.submit(limit(100, Side::Buy, 35, 151.0)); // crosses one ask level

    let mut level_ids = HashSet::new();
    for (_, level) in book.bids().iter_best_to_worst() {
        level_ids.extend(level.iter());
    }
    for (_, level) in book.asks().iter_best_to_worst() {
        level_ids.extend(level.iter());
    }
    let index_ids: HashSet<_> = book.resting_order_ids().collect();

    assert_eq!(level_ids, index_ids);
    assert_eq!(book.order_count(), index_ids.len());
}

#[test]
fn emitted_quantity_equals_filled_delta() {
    let mut book = book();
    book.submit(limit(1, Side::Sell, 30, 150.0));
    book.submit(limit(2, Side::Sell, 40, 150.5));
    book.submit(limit(3, Side::Sell, 50, 151.0));

    let result = book.submit(limit(4, Side::Buy, 100, 151.0));

    let emitted: Quantity = result.trades.iter().map(|t| t.quantity).sum();
    assert_eq!(emitted, result.filled_quantity);
    assert_eq!(emitted, 100);

    // Also equals the fills applied to the resting side.
    let resting_filled: Quantity = [1u64, 2, 3]
        .iter()
        .map(|&id| book.get_order(OrderId(id)).unwrap().filled_quantity)
        .sum();
    assert_eq!(emitted, resting_filled);
}

#[test]
fn trade_ids_strictly_increase_across_calls() {
    let mut book = book();
    let mut last = 0u64;
    for i in 0..10u64 {
        book.submit(limit(i * 2 + 1, Side::Sell, 10, 150.0));
        let result = book.submit(limit(i * 2 + 2, Side::Buy, 10, 150.0));
        for trade in &result.trades {
            assert!(trade.id.0 > last);
            last = trade.id.0;
        }
    }
}
