//! # matchbook
//!
//! A single-instrument limit order book with a price-time priority matching
//! engine.
//!
//! ## Features
//!
//! - **Order types**: Limit, Market
//! - **Price-time priority**: better prices first, FIFO at each price level
//! - **Fixed-point prices**: scaled `i64` with six fractional digits, no
//!   floating point on the match path
//! - **O(1) cancel**: every resting order carries a position token into its
//!   price level
//! - **Synchronous trade stream**: each submission returns the complete,
//!   ordered list of trades it produced
//!
//! ## Quick start
//!
//! ```
//! use matchbook::{Order, OrderBook, OrderId, Price, Side, Symbol};
//!
//! let sym = Symbol::new("AAPL");
//! let mut book = OrderBook::new(sym);
//!
//! // Rest some asks
//! book.submit(Order::limit(OrderId(1), sym, Side::Sell, 100, Price::from_f64(101.0)));
//! book.submit(Order::limit(OrderId(2), sym, Side::Sell, 200, Price::from_f64(102.0)));
//!
//! // A bid that crosses: this matches
//! let result = book.submit(Order::limit(OrderId(3), sym, Side::Buy, 50, Price::from_f64(101.0)));
//!
//! assert_eq!(result.filled_quantity, 50);
//! assert_eq!(result.trades.len(), 1);
//! assert_eq!(result.trades[0].price, Price::from_f64(101.0));
//! ```
//!
//! ## Price representation
//!
//! Prices are scaled integers (`Price(i64)`, six fractional digits), so
//! equality and ordering are exact where binary floating point would not be:
//!
//! ```
//! use matchbook::Price;
//!
//! assert_eq!(Price::from_f64(0.1 + 0.2), Price::from_f64(0.3));
//! assert_eq!(Price::from_f64(100.50), Price(100_500_000));
//! ```
//!
//! ## Market orders
//!
//! Market orders cross any price and never rest; an unfilled residual is
//! dropped:
//!
//! ```
//! use matchbook::{Order, OrderBook, OrderId, Price, Side, Symbol};
//!
//! let sym = Symbol::new("AAPL");
//! let mut book = OrderBook::new(sym);
//! book.submit(Order::limit(OrderId(1), sym, Side::Sell, 50, Price::from_f64(100.0)));
//! book.submit(Order::limit(OrderId(2), sym, Side::Sell, 50, Price::from_f64(101.0)));
//!
//! let result = book.submit(Order::market(OrderId(3), sym, Side::Buy, 75));
//! assert_eq!(result.trades.len(), 2);
//! assert_eq!(result.trades[0].price, Price::from_f64(100.0)); // best price first
//! assert_eq!(result.trades[1].price, Price::from_f64(101.0));
//! ```
//!
//! ## Cancellation
//!
//! Cancel is O(1) and reports its outcome as a plain value:
//!
//! ```
//! use matchbook::{ErrorCode, Order, OrderBook, OrderId, Price, Side, Symbol};
//!
//! let sym = Symbol::new("AAPL");
//! let mut book = OrderBook::new(sym);
//! book.submit(Order::limit(OrderId(1), sym, Side::Buy, 100, Price::from_f64(99.0)));
//!
//! assert_eq!(book.cancel(OrderId(1)), ErrorCode::Success);
//! assert_eq!(book.cancel(OrderId(1)), ErrorCode::OrderNotFound);
//! ```
//!
//! ## Concurrency model
//!
//! A book is a single-writer object: operations execute to completion on
//! the caller's thread with no internal locks or suspension points. Run one
//! book per instrument; books on different threads need no coordination.

mod book;
pub mod clock;
mod error;
mod level;
mod matching;
mod order;
mod price_levels;
mod result;
mod side;
mod trade;
mod types;

// Re-export public API
pub use book::OrderBook;
pub use error::ErrorCode;
pub use level::{LevelIter, LevelSlot, PriceLevel};
pub use order::{Order, OrderStatus, OrderType};
pub use price_levels::PriceLevels;
pub use result::SubmitResult;
pub use side::Side;
pub use trade::Trade;
pub use types::{OrderId, Price, Quantity, Symbol, Timestamp, TradeId};
