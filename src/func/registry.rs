//! Namespace-qualified function resolution.
//!
//! Pattern programs call functions through dotted paths such as
//! `std::mem::size`. This module provides [`NamespacePath`], the plain data
//! type carrying such a path, and [`FunctionRegistry`], the concurrent map
//! from qualified names to [`Function`] descriptors. The registry is shared
//! state: the host populates it once (or extends it while evaluators run) and
//! every evaluator resolves through it, so both maps are lock-free structures
//! behind `&self` methods.
//!
//! # Examples
//!
//! ```rust
//! use bytepat::{
//!     EvalContext, Function, FunctionRegistry, Literal, NamespacePath, ParameterCount,
//! };
//!
//! let registry = FunctionRegistry::new();
//! let path = NamespacePath::new(["std", "math"]);
//! registry.register(&path, "answer", Function::new(ParameterCount::none(), |_ctx, _args| {
//!     Ok(Some(Literal::Unsigned(42)))
//! }));
//!
//! let mut ctx = EvalContext::new();
//! let result = registry.call(&mut ctx, "std::math::answer", &[])?;
//! assert_eq!(result, Some(Literal::Unsigned(42)));
//! # Ok::<(), bytepat::Error>(())
//! ```

use std::fmt;
use std::sync::Arc;

use crossbeam_skiplist::SkipMap;
use dashmap::DashMap;

use crate::context::EvalContext;
use crate::literal::Literal;
use crate::{Error, Result};

use super::{expand_arguments, Argument, Function};

/// Ordered namespace segments, e.g. `std::mem`.
///
/// A path is plain data: segments are opaque identifiers, carried without
/// validation. The empty path is the root namespace, whose qualified names
/// are bare function names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NamespacePath {
    segments: Vec<String>,
}

impl NamespacePath {
    /// The root namespace (no segments).
    pub fn root() -> NamespacePath {
        NamespacePath::default()
    }

    /// Build a path from its segments.
    pub fn new<I, S>(segments: I) -> NamespacePath
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        NamespacePath {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// Append a segment in place.
    pub fn push(&mut self, segment: impl Into<String>) {
        self.segments.push(segment.into());
    }

    /// The segments in order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Whether this is the root namespace.
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// The qualified name of `name` inside this namespace.
    ///
    /// Root paths qualify to the bare name.
    pub fn join(&self, name: &str) -> String {
        if self.is_root() {
            name.to_string()
        } else {
            format!("{self}::{name}")
        }
    }
}

impl fmt::Display for NamespacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("::"))
    }
}

/// Concurrent map from qualified names to function descriptors.
///
/// Descriptors are stored behind [`Arc`] so lookups hand out shareable
/// handles without cloning callbacks. Registration under an already-taken
/// name replaces the previous descriptor; later registrations win, which
/// lets hosts shadow builtins.
pub struct FunctionRegistry {
    /// Qualified name to descriptor, ordered for deterministic listings.
    functions: SkipMap<String, Arc<Function>>,
    /// Namespace display form to the qualified names registered under it.
    namespaces: DashMap<String, Vec<String>>,
}

impl FunctionRegistry {
    /// Create an empty registry.
    pub fn new() -> FunctionRegistry {
        FunctionRegistry {
            functions: SkipMap::new(),
            namespaces: DashMap::new(),
        }
    }

    /// Register `function` as `name` inside `path`.
    ///
    /// An existing descriptor under the same qualified name is replaced.
    pub fn register(&self, path: &NamespacePath, name: &str, function: Function) {
        let qualified = path.join(name);

        let mut names = self.namespaces.entry(path.to_string()).or_default();
        if !names.contains(&qualified) {
            names.push(qualified.clone());
        }
        drop(names);

        self.functions.insert(qualified, Arc::new(function));
    }

    /// Look up a descriptor by its qualified name.
    pub fn get(&self, qualified: &str) -> Option<Arc<Function>> {
        self.functions
            .get(qualified)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Look up `name` inside `path`.
    pub fn get_in(&self, path: &NamespacePath, name: &str) -> Option<Arc<Function>> {
        self.get(&path.join(name))
    }

    /// The qualified names registered under `path`, sorted.
    pub fn functions_in(&self, path: &NamespacePath) -> Vec<String> {
        let mut names = self
            .namespaces
            .get(&path.to_string())
            .map(|entry| entry.value().clone())
            .unwrap_or_default();
        names.sort_unstable();
        names
    }

    /// All registered qualified names, in lexicographic order.
    pub fn names(&self) -> Vec<String> {
        self.functions
            .iter()
            .map(|entry| entry.key().clone())
            .collect()
    }

    /// Number of registered functions.
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// Whether the registry holds no functions.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Resolve `qualified` and invoke it with `arguments`.
    ///
    /// Parameter packs among the arguments are expanded into the flat value
    /// sequence before invocation.
    ///
    /// # Errors
    ///
    /// Returns [`Error::FunctionNotFound`] when no function is registered
    /// under `qualified`, otherwise whatever [`Function::invoke`] returns.
    pub fn call(
        &self,
        ctx: &mut EvalContext,
        qualified: &str,
        arguments: &[Argument],
    ) -> Result<Option<Literal>> {
        let function = self
            .get(qualified)
            .ok_or_else(|| Error::FunctionNotFound(qualified.to_string()))?;
        let flat = expand_arguments(arguments);
        function.invoke(ctx, &flat)
    }
}

impl Default for FunctionRegistry {
    fn default() -> FunctionRegistry {
        FunctionRegistry::new()
    }
}

impl fmt::Debug for FunctionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionRegistry")
            .field("functions", &self.len())
            .finish_non_exhaustive()
    }
}
