//! Error kinds returned by book operations.
//!
//! Errors are plain values returned from every operation. Nothing on the
//! submit or cancel path unwinds.

use std::fmt;

/// Outcome of a book operation.
///
/// Submission failures surface as `OrderStatus::Rejected` plus the matching
/// kind in [`crate::SubmitResult::reject_reason`]; cancellation returns the
/// kind directly.
///
/// `OrderAlreadyCancelled` and `OrderAlreadyFilled` are declared for
/// forward compatibility: ids leave the resting index the instant an order
/// is cancelled or fully filled, so both conditions currently surface as
/// `OrderNotFound`. `InsufficientLiquidity` is reserved.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[must_use]
pub enum ErrorCode {
    /// Operation completed normally.
    Success,
    /// No resting order with that id.
    OrderNotFound,
    /// Target is already cancelled.
    OrderAlreadyCancelled,
    /// Target is already fully filled.
    OrderAlreadyFilled,
    /// Submitted order has zero quantity.
    InvalidQuantity,
    /// Submitted limit order has a non-positive price.
    InvalidPrice,
    /// Submitted order has an empty symbol.
    BookNotFound,
    /// Reserved for future use.
    InsufficientLiquidity,
}

impl ErrorCode {
    /// Returns true for the `Success` kind.
    #[inline]
    pub fn is_success(self) -> bool {
        self == ErrorCode::Success
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::Success => "success",
            ErrorCode::OrderNotFound => "order not found",
            ErrorCode::OrderAlreadyCancelled => "order already cancelled",
            ErrorCode::OrderAlreadyFilled => "order already filled",
            ErrorCode::InvalidQuantity => "quantity must be greater than zero",
            ErrorCode::InvalidPrice => "price must be greater than zero",
            ErrorCode::BookNotFound => "symbol must not be empty",
            ErrorCode::InsufficientLiquidity => "insufficient liquidity",
        };
        f.write_str(s)
    }
}
