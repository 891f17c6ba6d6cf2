use thiserror::Error;

use crate::func::ParameterCount;

macro_rules! type_error {
    // Single string version
    ($msg:expr) => {
        crate::Error::TypeError($msg.to_string())
    };

    // Format string with arguments version
    ($fmt:expr, $($arg:tt)*) => {
        crate::Error::TypeError(format!($fmt, $($arg)*))
    };
}

/// The generic Error type, which provides coverage for all errors this library can potentially
/// return.
///
/// This enum covers all failure conditions that can occur while accessing section-backed
/// byte stores and while resolving and invoking registered functions. Each variant carries
/// the context needed by an evaluator to attribute the failure to the originating
/// expression; this crate classifies failures but does not format user-facing diagnostics
/// beyond the [`std::fmt::Display`] implementations.
///
/// # Error Categories
///
/// ## Section Access Errors
/// - [`Error::OutOfBounds`] - Address/size combination exceeds the available extent
/// - [`Error::Io`] - An underlying file operation failed
///
/// ## Function Invocation Errors
/// - [`Error::Arity`] - Supplied argument count outside the declared interval
/// - [`Error::Permission`] - Dangerous function invoked without host authorization
/// - [`Error::FunctionNotFound`] - No function registered under a qualified name
///
/// ## Value Errors
/// - [`Error::TypeError`] - Literal conversion or argument shape mismatch
/// - [`Error::Error`] - Miscellaneous failure raised by a function body
///
/// # Examples
///
/// ```rust
/// use bytepat::{Error, MemorySection, Section};
///
/// let mut section = MemorySection::new("demo", vec![0u8; 4]);
/// let mut buf = [0u8; 8];
/// match section.read_data(0, &mut buf, 8) {
///     Err(Error::OutOfBounds { address, size, available }) => {
///         eprintln!("read of {size} bytes at {address:#x} exceeds the {available} available");
///     }
///     other => panic!("expected an out of bounds error, got {other:?}"),
/// }
/// ```
#[derive(Error, Debug)]
pub enum Error {
    /// An access would have crossed the end of the addressable range.
    ///
    /// Raised when `address + size` exceeds a section's extent, when a staging
    /// buffer is too small for the requested transfer, or when a scalar decode
    /// would run past the end of its input.
    ///
    /// # Fields
    ///
    /// * `address` - The requested start address
    /// * `size` - The number of bytes requested
    /// * `available` - How many bytes the addressed range actually provides
    #[error("Out of bounds access at address {address:#x}: {size} bytes requested, {available} available")]
    OutOfBounds {
        /// The requested start address
        address: u64,
        /// The number of bytes requested
        size: u64,
        /// How many bytes the addressed range actually provides
        available: u64,
    },

    /// File I/O error.
    ///
    /// Wraps standard I/O errors surfaced by the file-backed section during
    /// open, seek, read, write or truncate operations.
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// A function was called with an argument count outside its declared interval.
    ///
    /// The count is validated before the function body runs; a callback is never
    /// invoked with an invalid number of arguments.
    ///
    /// # Fields
    ///
    /// * `expected` - The declared [`ParameterCount`] interval
    /// * `actual` - The number of arguments actually supplied
    #[error("Invalid number of arguments: expected {expected}, got {actual}")]
    Arity {
        /// The declared argument-count interval
        expected: ParameterCount,
        /// The number of arguments actually supplied
        actual: usize,
    },

    /// A dangerous function was invoked without host permission.
    ///
    /// Functions flagged as dangerous (externally observable side effects) only
    /// run after the host has granted permission on the evaluation context.
    #[error("A dangerous function was invoked without host permission")]
    Permission,

    /// No function is registered under the given qualified name.
    #[error("No function registered under '{0}'")]
    FunctionNotFound(String),

    /// A literal value had the wrong shape for the requested operation.
    ///
    /// Covers conversions between literal kinds (for example reading a string
    /// where a numeric value is required) and malformed builtin arguments.
    #[error("{0}")]
    TypeError(String),

    /// Generic error for miscellaneous failures.
    ///
    /// Used by function bodies for failures that don't fit into other
    /// categories.
    #[error("{0}")]
    Error(String),
}
