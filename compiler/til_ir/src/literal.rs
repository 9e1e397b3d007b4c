//! C-style integer literal parsing.
//!
//! The declaration language uses plain integer literals for basic-type
//! sizes, enumerant values, and fixed array lengths: optional sign, decimal
//! or `0x` hex.

/// Parse a C-style integer literal. Returns `None` for anything else.
pub fn parse_int(text: &str) -> Option<i64> {
    let (negative, rest) = match text.as_bytes().first()? {
        b'-' => (true, &text[1..]),
        b'+' => (false, &text[1..]),
        _ => (false, text),
    };
    let value = if let Some(hex) = rest.strip_prefix("0x").or_else(|| rest.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16).ok()?
    } else {
        rest.parse::<i64>().ok()?
    };
    Some(if negative { -value } else { value })
}
