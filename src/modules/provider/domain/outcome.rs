use crate::shared::errors::AppError;
use serde::Serialize;

/// Why a fetch produced no usable payload.
///
/// Every failure mode collapses to an empty result at the store boundary;
/// the reason is kept so tests (and diagnostics) can tell a genuinely empty
/// response apart from a failed or abandoned one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EmptyReason {
    /// The request observed its cancellation token; silent by contract.
    Cancelled,
    /// Transport-level failure (connect, timeout).
    Network,
    /// Remote answered with a non-2xx status.
    Http,
    /// Envelope or payload failed to parse.
    Decode,
}

impl EmptyReason {
    pub fn from_error(error: &AppError) -> Self {
        match error {
            AppError::Cancelled(_) => EmptyReason::Cancelled,
            AppError::ExternalServiceError(_) => EmptyReason::Network,
            AppError::SerializationError(_) => EmptyReason::Decode,
            AppError::ApiError(_)
            | AppError::NotFound(_)
            | AppError::RateLimitError(_)
            | AppError::ValidationError(_) => EmptyReason::Http,
        }
    }
}

/// Result of a list-shaped fetch: either the items (possibly zero of them)
/// or nothing, with the reason the fetch came up empty.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing<T> {
    Items(Vec<T>),
    Empty(EmptyReason),
}

impl<T> Listing<T> {
    /// Collapse to the shape presentation code renders: a plain list.
    pub fn into_items(self) -> Vec<T> {
        match self {
            Listing::Items(items) => items,
            Listing::Empty(_) => Vec::new(),
        }
    }

    /// `None` when the fetch succeeded, even with zero items.
    pub fn reason(&self) -> Option<EmptyReason> {
        match self {
            Listing::Items(_) => None,
            Listing::Empty(reason) => Some(*reason),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Listing::Empty(EmptyReason::Cancelled))
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Listing<U> {
        match self {
            Listing::Items(items) => Listing::Items(items.into_iter().map(f).collect()),
            Listing::Empty(reason) => Listing::Empty(reason),
        }
    }
}
