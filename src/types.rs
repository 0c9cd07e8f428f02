//! Core types: Price, Quantity, Timestamp, OrderId, TradeId, Symbol

use std::fmt;

/// Fixed-point price with six fractional digits.
///
/// `Price(100_500_000)` represents 100.50. All comparison and arithmetic on
/// the match path happens on the scaled integer; the floating-point
/// conversions exist for ingress and display only. Binary floating-point
/// cannot represent typical decimal tick sizes exactly, so two prices that
/// should match could compare unequal.
///
/// `Price::ZERO` is the "no price" sentinel, valid only for market orders.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Price(pub i64);

impl Price {
    /// Scale factor: six fractional digits.
    pub const SCALE: i64 = 1_000_000;

    /// The "no price" sentinel (market orders).
    pub const ZERO: Price = Price(0);

    /// Convert a decimal price to fixed-point. Ingress only.
    ///
    /// Negative inputs are undefined; callers reject them before converting.
    pub fn from_f64(price: f64) -> Self {
        Price((price * Self::SCALE as f64).round() as i64)
    }

    /// Convert back to a decimal price. Display only.
    pub fn to_f64(self) -> f64 {
        self.0 as f64 / Self::SCALE as f64
    }

    /// Returns true if this is the "no price" sentinel.
    #[inline]
    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let units = self.0 / Self::SCALE;
        let frac = (self.0 % Self::SCALE).abs();
        if self.0 < 0 && units == 0 {
            write!(f, "-0.{:06}", frac)
        } else {
            write!(f, "{}.{:06}", units, frac)
        }
    }
}

/// Quantity of shares/contracts. Never negative.
pub type Quantity = u64;

/// Nanoseconds from a monotonic anchor. See [`crate::clock`].
pub type Timestamp = u64;

/// Unique order identifier assigned by the caller. Zero means unset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OrderId(pub u64);

impl OrderId {
    /// Returns true if this id carries a real (non-sentinel) value.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "O{}", self.0)
    }
}

/// Unique trade identifier assigned by the book. Zero means unset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TradeId(pub u64);

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

/// A fixed-size instrument identifier (e.g., "AAPL", "MSFT").
///
/// Stored inline as `[u8; 8]` with a length byte — no heap allocation,
/// `Copy`, and suitable for use as a hash map key. Maximum 8 ASCII bytes.
///
/// ```
/// use matchbook::Symbol;
///
/// let sym = Symbol::new("AAPL");
/// assert_eq!(sym.as_str(), "AAPL");
/// assert_eq!(format!("{sym}"), "AAPL");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Symbol {
    buf: [u8; 8],
    len: u8,
}

impl Symbol {
    /// Create a symbol from a string slice. Panics if longer than 8 bytes.
    pub fn new(s: &str) -> Self {
        Self::try_new(s).expect("Symbol must be at most 8 bytes")
    }

    /// Try to create a symbol. Returns `None` if longer than 8 bytes.
    pub fn try_new(s: &str) -> Option<Self> {
        if s.len() > 8 {
            return None;
        }
        let mut buf = [0u8; 8];
        buf[..s.len()].copy_from_slice(s.as_bytes());
        Some(Self {
            buf,
            len: s.len() as u8,
        })
    }

    /// Returns the symbol as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        // Safety: we only accept valid str input in constructors
        unsafe { std::str::from_utf8_unchecked(&self.buf[..self.len as usize]) }
    }

    /// Returns true for the empty symbol (rejected at submission).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol(\"{}\")", self.as_str())
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Symbol {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Symbol {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <&str>::deserialize(deserializer)?;
        Symbol::try_new(s).ok_or_else(|| serde::de::Error::custom("Symbol must be at most 8 bytes"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_ordering() {
        assert!(Price(100) < Price(200));
        assert!(Price(-50) < Price(50));
        assert_eq!(Price(100), Price(100));
    }

    #[test]
    fn price_from_f64() {
        assert_eq!(Price::from_f64(150.0), Price(150_000_000));
        assert_eq!(Price::from_f64(100.50), Price(100_500_000));
        assert_eq!(Price::from_f64(0.000001), Price(1));
        assert_eq!(Price::from_f64(0.0), Price::ZERO);
    }

    #[test]
    fn price_round_trip() {
        let prices = [150.0, 100.50, 0.000001, 9999.123456];
        for p in prices {
            assert!((Price::from_f64(p).to_f64() - p).abs() < 1e-9);
        }
    }

    #[test]
    fn price_equality_survives_conversion_routes() {
        // 0.1 + 0.2 != 0.3 in binary floating point; the fixed-point
        // representation must make them compare equal.
        assert_eq!(Price::from_f64(0.1 + 0.2), Price::from_f64(0.3));
    }

    #[test]
    fn price_display() {
        assert_eq!(format!("{}", Price(100_500_000)), "100.500000");
        assert_eq!(format!("{}", Price(1)), "0.000001");
        assert_eq!(format!("{}", Price(-2_500_000)), "-2.500000");
        assert_eq!(format!("{}", Price(-500_000)), "-0.500000");
    }

    #[test]
    fn price_zero_sentinel() {
        assert!(Price::ZERO.is_zero());
        assert!(!Price(1).is_zero());
    }

    #[test]
    fn order_id_sentinel() {
        assert!(!OrderId(0).is_valid());
        assert!(OrderId(1).is_valid());
    }

    #[test]
    fn order_id_display() {
        assert_eq!(format!("{}", OrderId(42)), "O42");
    }

    #[test]
    fn trade_id_display() {
        assert_eq!(format!("{}", TradeId(7)), "T7");
    }

    // === Symbol tests ===

    #[test]
    fn symbol_new() {
        let sym = Symbol::new("AAPL");
        assert_eq!(sym.as_str(), "AAPL");
    }

    #[test]
    fn symbol_display() {
        assert_eq!(format!("{}", Symbol::new("MSFT")), "MSFT");
    }

    #[test]
    fn symbol_debug() {
        assert_eq!(format!("{:?}", Symbol::new("GOOG")), "Symbol(\"GOOG\")");
    }

    #[test]
    fn symbol_max_length() {
        let sym = Symbol::new("12345678");
        assert_eq!(sym.as_str(), "12345678");
    }

    #[test]
    fn symbol_try_new_too_long() {
        assert!(Symbol::try_new("123456789").is_none());
    }

    #[test]
    fn symbol_empty() {
        let sym = Symbol::new("");
        assert!(sym.is_empty());
        assert_eq!(sym.as_str(), "");
    }

    #[test]
    fn symbol_hash_eq() {
        use std::collections::HashMap;
        let mut map = HashMap::new();
        map.insert(Symbol::new("AAPL"), 42);
        assert_eq!(map[&Symbol::new("AAPL")], 42);
    }

    #[test]
    #[should_panic(expected = "at most 8 bytes")]
    fn symbol_new_panics_too_long() {
        Symbol::new("TOOLONGNAME");
    }
}
