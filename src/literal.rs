//! Literal values exchanged between the evaluator and registered functions.
//!
//! A [`Literal`] is the opaque tagged value the rest of the runtime passes around:
//! function arguments, default parameters, parameter-pack contents and function
//! results are all literals. The type is value-semantic: cloning a literal
//! always produces an independent copy, which is what makes deep-cloning of
//! AST nodes such as [`ParameterPack`](crate::func::ParameterPack) sound.
//!
//! Integer literals are carried at 128-bit width so that the full range of
//! fixed-width scalars a pattern can read (up to `u128`/`i128`) round-trips
//! without loss.

use std::fmt;

use strum::{EnumCount, EnumIter};

use crate::Result;

/// An opaque handle into evaluated pattern state.
///
/// Patterns themselves (structs, arrays, bitfields) live outside this crate; a
/// literal can still refer to one as the byte region it was evaluated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternRef {
    /// Start address of the referenced region within its section
    pub offset: u64,
    /// Length of the referenced region in bytes
    pub size: u64,
}

/// A tagged literal value.
///
/// Literals are produced by the evaluator (argument expressions, defaults) and
/// consumed by function bodies. Conversions between kinds are explicit and
/// checked; see [`Literal::as_u128`] and friends.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// A boolean value
    Bool(bool),
    /// An unsigned integer, carried at full 128-bit width
    Unsigned(u128),
    /// A signed integer, carried at full 128-bit width
    Signed(i128),
    /// A floating point value
    Float(f64),
    /// A single character
    Char(char),
    /// An owned string
    String(String),
    /// A reference into evaluated pattern state
    Pattern(PatternRef),
}

/// The kind of a [`Literal`], without its payload.
///
/// Used in diagnostics when a conversion between kinds fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumCount, EnumIter)]
pub enum LiteralKind {
    /// A boolean value
    Bool,
    /// An unsigned integer
    Unsigned,
    /// A signed integer
    Signed,
    /// A floating point value
    Float,
    /// A single character
    Char,
    /// An owned string
    String,
    /// A reference into evaluated pattern state
    Pattern,
}

impl LiteralKind {
    /// The kind's name as used in diagnostics.
    pub fn name(&self) -> &'static str {
        match self {
            LiteralKind::Bool => "bool",
            LiteralKind::Unsigned => "unsigned",
            LiteralKind::Signed => "signed",
            LiteralKind::Float => "float",
            LiteralKind::Char => "char",
            LiteralKind::String => "string",
            LiteralKind::Pattern => "pattern",
        }
    }
}

impl Literal {
    /// Returns the kind of this literal.
    pub fn kind(&self) -> LiteralKind {
        match self {
            Literal::Bool(_) => LiteralKind::Bool,
            Literal::Unsigned(_) => LiteralKind::Unsigned,
            Literal::Signed(_) => LiteralKind::Signed,
            Literal::Float(_) => LiteralKind::Float,
            Literal::Char(_) => LiteralKind::Char,
            Literal::String(_) => LiteralKind::String,
            Literal::Pattern(_) => LiteralKind::Pattern,
        }
    }

    /// Converts this literal to an unsigned integer.
    ///
    /// Booleans widen to `0`/`1`, characters convert to their code point and
    /// floats convert when they are non-negative and integral. A negative value
    /// is never silently truncated into an unsigned one.
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeError`] if the value cannot be represented
    /// as an unsigned integer.
    pub fn as_u128(&self) -> Result<u128> {
        match self {
            Literal::Unsigned(value) => Ok(*value),
            Literal::Signed(value) if *value >= 0 => Ok(*value as u128),
            Literal::Signed(value) => Err(type_error!(
                "cannot convert negative value {} to unsigned",
                value
            )),
            Literal::Bool(value) => Ok(u128::from(*value)),
            Literal::Char(value) => Ok(u128::from(u32::from(*value))),
            Literal::Float(value) if *value >= 0.0 && value.fract() == 0.0 => Ok(*value as u128),
            other => Err(type_error!(
                "cannot convert {} literal to unsigned",
                other.kind().name()
            )),
        }
    }

    /// Converts this literal to a signed integer.
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeError`] if the value cannot be represented
    /// as a signed integer (including unsigned values above `i128::MAX`).
    pub fn as_i128(&self) -> Result<i128> {
        match self {
            Literal::Signed(value) => Ok(*value),
            Literal::Unsigned(value) => i128::try_from(*value).map_err(|_| {
                type_error!("unsigned value {} does not fit into a signed integer", value)
            }),
            Literal::Bool(value) => Ok(i128::from(*value)),
            Literal::Char(value) => Ok(i128::from(u32::from(*value))),
            Literal::Float(value) if value.fract() == 0.0 => Ok(*value as i128),
            other => Err(type_error!(
                "cannot convert {} literal to signed",
                other.kind().name()
            )),
        }
    }

    /// Converts this literal to a floating point value.
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeError`] for string and pattern literals.
    pub fn as_f64(&self) -> Result<f64> {
        match self {
            Literal::Float(value) => Ok(*value),
            Literal::Unsigned(value) => Ok(*value as f64),
            Literal::Signed(value) => Ok(*value as f64),
            Literal::Bool(value) => Ok(f64::from(u8::from(*value))),
            Literal::Char(value) => Ok(f64::from(u32::from(*value))),
            other => Err(type_error!(
                "cannot convert {} literal to float",
                other.kind().name()
            )),
        }
    }

    /// Converts this literal to a boolean.
    ///
    /// Numeric values convert to `value != 0`.
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeError`] for char, string and pattern literals.
    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Literal::Bool(value) => Ok(*value),
            Literal::Unsigned(value) => Ok(*value != 0),
            Literal::Signed(value) => Ok(*value != 0),
            Literal::Float(value) => Ok(*value != 0.0),
            other => Err(type_error!(
                "cannot convert {} literal to bool",
                other.kind().name()
            )),
        }
    }

    /// Borrows this literal as a string slice.
    ///
    /// # Errors
    /// Returns [`crate::Error::TypeError`] unless the literal is a string.
    pub fn as_str(&self) -> Result<&str> {
        match self {
            Literal::String(value) => Ok(value),
            other => Err(type_error!(
                "expected a string literal, got {}",
                other.kind().name()
            )),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Bool(value) => write!(f, "{value}"),
            Literal::Unsigned(value) => write!(f, "{value}"),
            Literal::Signed(value) => write!(f, "{value}"),
            Literal::Float(value) => write!(f, "{value}"),
            Literal::Char(value) => write!(f, "{value}"),
            Literal::String(value) => write!(f, "{value}"),
            Literal::Pattern(value) => {
                write!(f, "pattern at {:#x}+{}", value.offset, value.size)
            }
        }
    }
}
