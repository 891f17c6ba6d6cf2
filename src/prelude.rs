//! # bytepat Prelude
//!
//! This module provides a convenient prelude for the most commonly used types and traits
//! from the bytepat library. Import this module to get quick access to the essential
//! types for section access and function dispatch.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all bytepat operations
pub use crate::Error;

/// The result type used throughout bytepat
pub use crate::Result;

// ================================================================================================
// Sections
// ================================================================================================

/// Linearly addressed byte stores and the trait they share
pub use crate::section::{ExternalSection, FileSection, MemorySection, Section};

/// Sentinel offset that omits one half of a region copy
pub use crate::section::SKIP;

/// Fixed-width scalar access over byte buffers
pub use crate::section::io::Scalar;

// ================================================================================================
// Values
// ================================================================================================

/// Literal values exchanged with registered functions
pub use crate::literal::{Literal, LiteralKind, PatternRef};

// ================================================================================================
// Functions
// ================================================================================================

/// Callable descriptors and their arity contract
pub use crate::func::{Function, FunctionCallback, ParameterCount};

/// Variadic argument bundles and their expansion
pub use crate::func::{expand_arguments, Argument, ParameterPack};

/// Namespace-qualified function resolution
pub use crate::func::{FunctionRegistry, NamespacePath};

/// The builtin standard library
pub use crate::func::builtins::register_all;

// ================================================================================================
// Evaluation Context
// ================================================================================================

/// Per-run evaluation state handed to function callbacks
pub use crate::context::{EvalContext, SectionId};
