/// Failure taxonomy of the value and binding layer.
///
/// Every variant is raised at the point of detection and propagates to the
/// immediate caller; nothing in this crate retries or silently defaults.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Operation on an empty value, a member access on a non-struct kind, or
    /// a cursor dereference past either end.
    #[error("access error: {0}")]
    Access(String),
    /// Numeric conversion overflow / sign loss, or an out-of-bounds
    /// positional access (row, column or cursor position).
    #[error("range error: {0}")]
    Range(String),
    /// Exact-type extraction requested while the value holds another kind.
    #[error("bad cast: {0}")]
    BadCast(String),
    /// Malformed textual input (unterminated string/array/object, missing
    /// separator, unparsable literal).
    #[error("data format error: {0}")]
    DataFormat(String),
    /// No conversion rule exists for the requested (source kind, target) pair.
    #[error("not supported: {0}")]
    NotSupported(String),
    /// Structural misuse of a binding/extraction descriptor (double use
    /// without reset, empty collection, zero-size bulk buffer).
    #[error("binding error: {0}")]
    Binding(String),
    /// Arithmetic applied to an incompatible value kind.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

pub type Result<T> = std::result::Result<T, Error>;
