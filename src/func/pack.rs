//! Variadic parameter packs and call-site argument expansion.
//!
//! A [`ParameterPack`] is the AST leaf behind a variadic argument group: an
//! ordered sequence of literals whose length is only known at evaluation time
//! (for example produced by a loop or a spread). Before a call is validated,
//! packs are spliced flat into the positional argument list by
//! [`expand_arguments`], so arity checking always sees the final count.

use crate::literal::Literal;

/// Immutable AST leaf wrapping a variadic group of literal values.
///
/// AST subtrees are reused across multiple instantiations of the same pattern
/// (array expansion, template instantiation), so cloning must produce a fully
/// independent copy: the derived `Clone` deep-copies the wrapped sequence,
/// including owned string payloads. No instantiation can observe mutations
/// made by another.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterPack {
    values: Vec<Literal>,
}

impl ParameterPack {
    /// Create a pack, taking ownership of its values.
    pub fn new(values: Vec<Literal>) -> ParameterPack {
        ParameterPack { values }
    }

    /// Read-only view of the wrapped sequence.
    pub fn values(&self) -> &[Literal] {
        &self.values
    }

    /// Number of values in the pack.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the pack holds no values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A call-site argument before pack expansion.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// A single positional value
    Value(Literal),
    /// A variadic group spliced flat at its position
    Pack(ParameterPack),
}

impl From<Literal> for Argument {
    fn from(value: Literal) -> Argument {
        Argument::Value(value)
    }
}

impl From<ParameterPack> for Argument {
    fn from(pack: ParameterPack) -> Argument {
        Argument::Pack(pack)
    }
}

/// Expands call-site arguments into a flat positional list.
///
/// Each [`Argument::Value`] contributes one literal; each [`Argument::Pack`]
/// contributes zero or more at its position, in pack order. The result is
/// what gets validated against a function's declared
/// [`ParameterCount`](crate::func::ParameterCount).
///
/// # Examples
///
/// ```rust
/// use bytepat::{expand_arguments, Argument, Literal, ParameterPack};
///
/// let args = [
///     Argument::Value(Literal::Unsigned(1)),
///     Argument::Pack(ParameterPack::new(vec![
///         Literal::Unsigned(2),
///         Literal::Unsigned(3),
///     ])),
///     Argument::Value(Literal::Unsigned(4)),
/// ];
///
/// let flat = expand_arguments(&args);
/// let values: Vec<u128> = flat.iter().map(|lit| lit.as_u128().unwrap()).collect();
/// assert_eq!(values, [1, 2, 3, 4]);
/// ```
pub fn expand_arguments(arguments: &[Argument]) -> Vec<Literal> {
    let mut flat = Vec::with_capacity(arguments.len());

    for argument in arguments {
        match argument {
            Argument::Value(value) => flat.push(value.clone()),
            Argument::Pack(pack) => flat.extend_from_slice(pack.values()),
        }
    }

    flat
}
