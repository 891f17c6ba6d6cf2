//! Callable-function descriptors and their invocation contract.
//!
//! This module provides the runtime's function layer: every operation a
//! pattern program can call by name is represented as a [`Function`]
//! descriptor pairing a native callback with an arity contract, optional
//! trailing defaults, and a danger flag. The evaluator resolves call sites
//! through the [`registry`] and funnels every call through
//! [`Function::invoke`], so argument-count validation and permission gating
//! live in exactly one place.
//!
//! # Architecture
//!
//! The layer splits into small, independently testable pieces:
//!
//! - [`ParameterCount`] - closed-interval arity contract built from named
//!   factories
//! - [`Function`] - callback, contract, defaults, danger flag
//! - [`ParameterPack`] / [`Argument`] - variadic argument bundles and their
//!   expansion into a flat argument list
//! - [`registry`] - namespace-qualified name resolution
//! - [`builtins`] - the standard library registered by default
//!
//! # Invocation
//!
//! [`Function::invoke`] applies the following steps, in order:
//!
//! 1. Fewer arguments than the contract's minimum fail with
//!    [`Error::Arity`](crate::Error::Arity).
//! 2. More arguments than the contract's maximum fail with
//!    [`Error::Arity`](crate::Error::Arity); excess arguments are never
//!    silently dropped.
//! 3. If fewer arguments than the maximum were supplied, trailing defaults
//!    fill the gap from their own tail. The caller's values always occupy the
//!    leading positions.
//! 4. A dangerous function without host permission fails with
//!    [`Error::Permission`](crate::Error::Permission). The callback does not
//!    run.
//! 5. The callback runs; its value, "no value", or failure propagates
//!    unchanged.
//!
//! # Examples
//!
//! ```rust
//! use bytepat::{EvalContext, Function, Literal, ParameterCount};
//!
//! let double = Function::new(ParameterCount::exactly(1), |_ctx, args| {
//!     let value = args[0].as_u128()?;
//!     Ok(Some(Literal::Unsigned(value * 2)))
//! });
//!
//! let mut ctx = EvalContext::new();
//! let result = double.invoke(&mut ctx, &[Literal::Unsigned(21)])?;
//! assert_eq!(result, Some(Literal::Unsigned(42)));
//! # Ok::<(), bytepat::Error>(())
//! ```

mod arity;
mod pack;

pub mod builtins;
pub mod registry;

pub use arity::ParameterCount;
pub use pack::{expand_arguments, Argument, ParameterPack};
pub use registry::{FunctionRegistry, NamespacePath};

use std::fmt;

use crate::context::EvalContext;
use crate::literal::Literal;
use crate::{Error, Result};

/// Native callback backing a registered function.
///
/// The callback receives the evaluation context and the final argument
/// sequence (caller values plus any filled defaults). It returns `Ok(Some(_))`
/// for a value, `Ok(None)` for a void function, or an error.
pub type FunctionCallback =
    Box<dyn Fn(&mut EvalContext, &[Literal]) -> Result<Option<Literal>> + Send + Sync>;

/// A registered callable: arity contract, trailing defaults, callback body,
/// and danger flag.
///
/// Descriptors are immutable after construction. The two builder methods
/// ([`with_defaults`](Function::with_defaults) and
/// [`dangerous`](Function::dangerous)) consume and return the descriptor, so
/// registration sites read as a single expression.
///
/// # Examples
///
/// ```rust
/// use bytepat::{EvalContext, Function, Literal, ParameterCount};
///
/// // `greet(name, punctuation = "!")`
/// let greet = Function::new(ParameterCount::between(1, 2), |_ctx, args| {
///     let name = args[0].as_str()?;
///     let punctuation = args[1].as_str()?;
///     Ok(Some(Literal::String(format!("hello {name}{punctuation}"))))
/// })
/// .with_defaults(vec![Literal::String("!".into())]);
///
/// let mut ctx = EvalContext::new();
/// let out = greet.invoke(&mut ctx, &[Literal::String("world".into())])?;
/// assert_eq!(out, Some(Literal::String("hello world!".into())));
/// # Ok::<(), bytepat::Error>(())
/// ```
pub struct Function {
    parameter_count: ParameterCount,
    default_parameters: Vec<Literal>,
    callback: FunctionCallback,
    dangerous: bool,
}

impl Function {
    /// Create a descriptor from an arity contract and a callback.
    ///
    /// The new descriptor has no defaults and is not dangerous.
    pub fn new(
        parameter_count: ParameterCount,
        callback: impl Fn(&mut EvalContext, &[Literal]) -> Result<Option<Literal>>
            + Send
            + Sync
            + 'static,
    ) -> Function {
        Function {
            parameter_count,
            default_parameters: Vec::new(),
            callback: Box::new(callback),
            dangerous: false,
        }
    }

    /// Attach trailing default values.
    ///
    /// Defaults cover at most the gap between the contract's minimum and
    /// maximum; the fill always draws from the tail of this sequence.
    pub fn with_defaults(mut self, defaults: Vec<Literal>) -> Function {
        debug_assert!(
            defaults.len() as u64
                <= u64::from(self.parameter_count.max() - self.parameter_count.min()),
            "default parameters exceed the contract's optional range"
        );
        self.default_parameters = defaults;
        self
    }

    /// Mark the function as dangerous.
    ///
    /// Dangerous functions only run once the host has granted permission on
    /// the evaluation context.
    pub fn dangerous(mut self) -> Function {
        self.dangerous = true;
        self
    }

    /// The arity contract checked on every call.
    pub fn parameter_count(&self) -> ParameterCount {
        self.parameter_count
    }

    /// The trailing default values, in declaration order.
    pub fn default_parameters(&self) -> &[Literal] {
        &self.default_parameters
    }

    /// Whether invocation requires host permission.
    pub fn is_dangerous(&self) -> bool {
        self.dangerous
    }

    /// Call the function with the caller-supplied arguments.
    ///
    /// Validates the argument count against the contract, fills missing
    /// trailing arguments from the defaults, enforces the danger gate, and
    /// only then runs the callback. See the [module documentation](self) for
    /// the exact step order.
    ///
    /// # Arguments
    ///
    /// * 'ctx' - Evaluation state passed through to the callback
    /// * 'arguments' - The caller's argument values, already pack-expanded
    ///
    /// # Errors
    ///
    /// Returns [`Error::Arity`] when the supplied count falls outside the
    /// contract, [`Error::Permission`] when the function is dangerous and the
    /// context carries no grant, or whatever error the callback itself
    /// returns.
    pub fn invoke(
        &self,
        ctx: &mut EvalContext,
        arguments: &[Literal],
    ) -> Result<Option<Literal>> {
        let min = self.parameter_count.min() as usize;
        let max = match self.parameter_count.max() {
            ParameterCount::UNLIMITED => usize::MAX,
            max => max as usize,
        };
        let supplied = arguments.len();

        if supplied < min {
            return Err(Error::Arity {
                expected: self.parameter_count,
                actual: supplied,
            });
        }
        if supplied > max {
            return Err(Error::Arity {
                expected: self.parameter_count,
                actual: supplied,
            });
        }

        // The caller's values keep the leading positions; defaults only ever
        // extend the tail, and only up to the contract's maximum.
        let storage: Vec<Literal>;
        let arguments = if supplied < max && !self.default_parameters.is_empty() {
            let target = max.min(supplied + self.default_parameters.len());
            let skip = self.default_parameters.len() - (target - supplied);
            let mut filled = Vec::with_capacity(target);
            filled.extend_from_slice(arguments);
            filled.extend_from_slice(&self.default_parameters[skip..]);
            storage = filled;
            storage.as_slice()
        } else {
            arguments
        };

        if self.dangerous && !ctx.dangerous_permitted() {
            return Err(Error::Permission);
        }

        (self.callback)(ctx, arguments)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("parameter_count", &self.parameter_count)
            .field("default_parameters", &self.default_parameters)
            .field("dangerous", &self.dangerous)
            .finish_non_exhaustive()
    }
}
