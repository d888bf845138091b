//! How a referred cell's failure shows up in the cell that referred to it.

use super::ErrorKind;

/// Map the error of a referred cell to the error latched by the referrer.
///
/// `NoFormula` and `Cycle` pass through unchanged: there is nothing to show
/// in the referred cell for the former, and a cycle has no single cell to
/// blame. Everything else collapses to [`ErrorKind::UpstreamError`], whose
/// message is empty, so the detailed message is only shown once.
pub fn propagate(upstream: ErrorKind) -> ErrorKind {
    match upstream {
        ErrorKind::NoFormula | ErrorKind::Cycle => upstream,
        _ => ErrorKind::UpstreamError,
    }
}
