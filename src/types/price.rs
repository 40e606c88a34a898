//! Fixed-point price representation.
//!
//! Prices live in the engine as `u64` values scaled by 10^8
//! ([`PRICE_SCALE`]), giving 8 decimal places. The matching predicate
//! compares prices for exact equality (a limit at the best opposite price
//! must match), so floats and tolerance comparisons never enter the book.
//!
//! Decimal strings cross this boundary through `rust_decimal`, which parses
//! and rounds exactly; rendering back out is plain integer arithmetic on
//! the raw value.
//!
//! ```
//! use tickmatch::types::price::{parse_price, format_price};
//!
//! let raw = parse_price("100.50").unwrap();
//! assert_eq!(raw, 10_050_000_000);
//! assert_eq!(format_price(raw), "100.50000000");
//! ```

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Number of raw units per whole price unit: 10^8.
pub const PRICE_SCALE: u64 = 100_000_000;

/// Parse a decimal string into a raw fixed-point price.
///
/// Negative, malformed, and out-of-range inputs all return `None`; a raw
/// price is always a well-formed book price.
///
/// ```
/// use tickmatch::types::price::parse_price;
///
/// assert_eq!(parse_price("1"), Some(100_000_000));
/// assert_eq!(parse_price("99.50"), Some(9_950_000_000));
/// assert_eq!(parse_price("-1.0"), None);
/// assert_eq!(parse_price("abc"), None);
/// ```
pub fn parse_price(text: &str) -> Option<u64> {
    let value = Decimal::from_str(text).ok()?;
    if value.is_sign_negative() {
        return None;
    }

    value
        .checked_mul(Decimal::from(PRICE_SCALE))?
        .round_dp(0)
        .to_u64()
}

/// Render a raw price with all 8 decimal places.
///
/// ```
/// use tickmatch::types::price::format_price;
///
/// assert_eq!(format_price(100_000_000), "1.00000000");
/// assert_eq!(format_price(1), "0.00000001");
/// ```
pub fn format_price(raw: u64) -> String {
    format!("{}.{:08}", raw / PRICE_SCALE, raw % PRICE_SCALE)
}

/// Render a raw price with trailing zeros trimmed, for ladders and logs.
///
/// ```
/// use tickmatch::types::price::format_price_compact;
///
/// assert_eq!(format_price_compact(100_000_000), "1");
/// assert_eq!(format_price_compact(10_050_000_000), "100.5");
/// ```
pub fn format_price_compact(raw: u64) -> String {
    let exact = Decimal::from(raw) / Decimal::from(PRICE_SCALE);
    exact.normalize().to_string()
}
