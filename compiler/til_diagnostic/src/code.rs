//! Error codes for all generator diagnostics.
//!
//! Each code is a unique identifier with the first digit group indicating
//! the phase: E01xx parser, E10xx analysis, W11xx analysis warnings.

use std::fmt;

/// Error codes for all generator diagnostics.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Parser (E01xx)
    /// Unexpected token / malformed tree
    E0101,
    /// Unclosed delimiter
    E0102,

    // Analysis (E10xx)
    /// Unrecognized type kind
    E1001,
    /// Duplicate symbol
    E1002,
    /// Missing or non-integer basic type size
    E1003,
    /// Unresolved type name
    E1004,
    /// Missing member type
    E1005,
    /// Array tag missing its count argument
    E1006,
    /// Array count is not an earlier member
    E1007,
    /// Non-integer enumerant value
    E1008,
    /// Enum underlying type is not a basic type
    E1009,
    /// Malformed map type shape
    E1010,
    /// Map In type is not an enum
    E1011,
    /// Malformed map case shape
    E1012,
    /// Case name is not an enumerant of the In type
    E1013,
    /// Duplicate member name
    E1014,
    /// Duplicate map case
    E1015,
    /// Include cycle
    E1016,
    /// Unreadable include file
    E1017,

    // Analysis warnings (W11xx)
    /// Map marked complete is missing cases
    W1101,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_as_identifier() {
        assert_eq!(ErrorCode::E1004.to_string(), "E1004");
        assert_eq!(ErrorCode::W1101.to_string(), "W1101");
    }
}
