//! Per-cell evaluation errors.

use thiserror::Error;

/// Why a cell has no value.
///
/// `Display` yields the message shown to the user in the offending cell.
/// Two kinds are special: [`NoFormula`](ErrorKind::NoFormula) is only shown
/// by a formula that refers to a blank or text cell, and
/// [`UpstreamError`](ErrorKind::UpstreamError) renders as an empty string
/// because the referred cell already shows the real message.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    #[error("Syntax error: unknown token type")]
    SyntaxBadToken,

    #[error("Syntax error: expected a factor")]
    SyntaxFactorExpected,

    #[error("Syntax error: expected ')'")]
    SyntaxMissingParen,

    #[error("Syntax error: unexpected token")]
    SyntaxTrailingToken,

    #[error("Syntax error: nested too deeply")]
    SyntaxTooDeep,

    #[error("Divide by 0")]
    DivByZero,

    #[error("Non-integer cell coordinate")]
    NonIntegerCoord,

    #[error("Cell out of range")]
    OutOfRange,

    #[error("Cycle")]
    Cycle,

    #[error("No value for referred cell")]
    NoFormula,

    #[error("")]
    UpstreamError,
}

#[cfg(test)]
mod tests {
    use super::ErrorKind;

    #[test]
    fn test_messages() {
        assert_eq!(ErrorKind::DivByZero.to_string(), "Divide by 0");
        assert_eq!(ErrorKind::Cycle.to_string(), "Cycle");
        assert_eq!(
            ErrorKind::SyntaxMissingParen.to_string(),
            "Syntax error: expected ')'"
        );
        assert_eq!(ErrorKind::UpstreamError.to_string(), "");
    }
}
