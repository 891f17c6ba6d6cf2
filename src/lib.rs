// Copyright 2025 bytepat contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![allow(dead_code)]
#![allow(clippy::too_many_arguments)]

//! # bytepat
//!
//! [![Crates.io](https://img.shields.io/crates/v/bytepat.svg)](https://crates.io/crates/bytepat)
//! [![Documentation](https://docs.rs/bytepat/badge.svg)](https://docs.rs/bytepat)
//!
//! The runtime substrate for a binary pattern-description language: named, resizable byte
//! stores with interchangeable backings, and a registration framework for the native
//! functions pattern programs call. Built in pure Rust, `bytepat` gives an evaluator a
//! uniform address space over memory buffers, host callbacks, and files, plus a single
//! invocation path that validates argument counts and gates side-effecting functions
//! behind explicit host permission.
//!
//! ## Features
//!
//! - **📦 Uniform byte stores** - One [`Section`] trait over in-memory, callback-backed,
//!   and file-backed data
//! - **✂️ Region editing** - Overlap-safe copies plus byte insertion and removal on any
//!   backend, staged in fixed-size chunks
//! - **🔢 Scalar access** - Endian-explicit reads and writes of fixed-width integers and
//!   floats over byte buffers
//! - **📞 Checked invocation** - Closed-interval arity contracts, trailing defaults, and
//!   permission gating enforced before any callback runs
//! - **🗂️ Concurrent registry** - Lock-free resolution of namespace-qualified function
//!   names shared across evaluator instances
//! - **🛡️ Memory safe** - No `unsafe` code, comprehensive error handling
//!
//! ## Quick Start
//!
//! Add `bytepat` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! bytepat = "0.2"
//! ```
//!
//! ### Using the Prelude
//!
//! For convenient access to the most commonly used types, import the prelude:
//!
//! ```rust
//! use bytepat::prelude::*;
//!
//! // Attach the data under evaluation and register the builtin library.
//! let mut ctx = EvalContext::new();
//! ctx.attach_section(Box::new(MemorySection::new("data", vec![0x34, 0x12])));
//!
//! let registry = FunctionRegistry::new();
//! register_all(&registry);
//!
//! // Call a builtin the way an evaluator would.
//! let value = registry.call(
//!     &mut ctx,
//!     "std::mem::read_unsigned",
//!     &[
//!         Argument::Value(Literal::Unsigned(0)),
//!         Argument::Value(Literal::Unsigned(2)),
//!     ],
//! )?;
//! assert_eq!(value, Some(Literal::Unsigned(0x1234)));
//! # Ok::<(), bytepat::Error>(())
//! ```
//!
//! ### Working with Sections
//!
//! Every store behind the [`Section`] trait is addressed the same way. Literal bytes go
//! in through [`Section::write_bytes`]; [`Section::write_data`] is the region-copy
//! primitive, with the [`SKIP`] sentinel omitting either half:
//!
//! ```rust
//! use bytepat::{MemorySection, Section};
//!
//! let mut section = MemorySection::new("scratch", vec![0u8; 8]);
//! section.write_bytes(2, &[0xDE, 0xAD, 0xBE, 0xEF])?;
//!
//! let mut readback = [0u8; 4];
//! section.read_data(2, &mut readback, 4)?;
//! assert_eq!(readback, [0xDE, 0xAD, 0xBE, 0xEF]);
//! # Ok::<(), bytepat::Error>(())
//! ```
//!
//! ### Registering Functions
//!
//! A [`Function`] binds a native callback to an arity contract. The contract is checked
//! before the callback runs, so function bodies never see an invalid argument count:
//!
//! ```rust
//! use bytepat::{EvalContext, Function, Literal, ParameterCount};
//!
//! let add = Function::new(ParameterCount::exactly(2), |_ctx, args| {
//!     let sum = args[0].as_u128()? + args[1].as_u128()?;
//!     Ok(Some(Literal::Unsigned(sum)))
//! });
//!
//! let mut ctx = EvalContext::new();
//! let result = add.invoke(&mut ctx, &[Literal::Unsigned(2), Literal::Unsigned(3)])?;
//! assert_eq!(result, Some(Literal::Unsigned(5)));
//! # Ok::<(), bytepat::Error>(())
//! ```
//!
//! ## Architecture
//!
//! `bytepat` is organized into several key modules:
//!
//! - [`prelude`] - Convenient re-exports of commonly used types and traits
//! - [`section`] - Byte stores, region copies, scalar access, and shift editing
//! - [`func`] - Function descriptors, arity contracts, parameter packs, and the registry
//! - [`context`] - Per-run evaluation state and the dangerous-function grant
//! - [`literal`] - The value type exchanged between evaluator and functions
//! - [`Error`] and [`Result`] - Comprehensive error handling
//!
//! ### Sections
//!
//! The [`section`] module provides three backings behind one trait:
//!
//! - [`MemorySection`] - growable in-memory buffer, the default store
//! - [`ExternalSection`] - reads and writes delegated to host callbacks
//! - [`FileSection`] - direct file access without loading contents into memory
//!
//! On top of the trait sit [`section::io`] for endian-explicit scalar access and
//! [`section::shift`] for insertion, removal, and overlap-safe region moves.
//!
//! ### Functions
//!
//! The [`func`] module carries the call path from name to result: a
//! [`FunctionRegistry`] resolves qualified names such as `std::mem::size`,
//! [`expand_arguments`] flattens parameter packs, and [`Function::invoke`] validates
//! the count, fills trailing defaults, enforces the danger gate, and runs the callback.
//! The builtin library in [`func::builtins`] covers raw memory access and string
//! manipulation.
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result) with the context an evaluator
//! needs to attribute the failure:
//!
//! ```rust
//! use bytepat::{Error, MemorySection, Section};
//!
//! let mut section = MemorySection::new("data", vec![0u8; 4]);
//! let mut buf = [0u8; 8];
//! match section.read_data(0, &mut buf, 8) {
//!     Ok(()) => println!("read succeeded"),
//!     Err(Error::OutOfBounds { address, size, available }) => {
//!         println!("{size} bytes at {address:#x} exceed the {available} available");
//!     }
//!     Err(e) => println!("Error: {e}"),
//! }
//! ```
//!
//! ## Performance
//!
//! `bytepat` is designed to sit on an evaluator's hot path:
//!
//! - **Chunked staging** for region moves, bounded memory regardless of copy size
//! - **Lock-free registry** lookups shared across concurrent evaluator instances
//! - **Zero-copy scalar access** over in-memory buffers
//!
//! ## Development and Testing
//!
//! ```bash
//! cargo test
//! cargo bench  # Section throughput and invocation overhead
//! ```
#[macro_use]
pub(crate) mod error;

/// Shared functionality which is used in unit- and integration-tests
#[cfg(test)]
pub(crate) mod test;

/// Convenient re-exports of the most commonly used types and traits.
///
/// This module provides a curated selection of the most frequently used types
/// from across the bytepat library, allowing for convenient glob imports.
///
/// # Example
///
/// ```rust
/// use bytepat::prelude::*;
///
/// let mut section = MemorySection::new("data", vec![1, 2, 3]);
/// assert_eq!(section.size(), 3);
/// ```
pub mod prelude;

/// Per-run evaluation state: attached sections and the dangerous-function grant.
///
/// # Key Types
///
/// - [`EvalContext`] - Owns the sections of one evaluation run
/// - [`SectionId`] - Handle under which an attached section is addressed
pub mod context;

/// Function descriptors, arity contracts, parameter packs, and name resolution.
///
/// # Key Types
///
/// - [`Function`] - Callback plus contract, defaults, and danger flag
/// - [`ParameterCount`] - Closed-interval arity contract
/// - [`ParameterPack`] - Bundled arguments expanded at call sites
/// - [`FunctionRegistry`] - Concurrent map from qualified names to descriptors
/// - [`func::builtins`] - The standard library registered by default
pub mod func;

/// The literal value type exchanged between the evaluator and registered functions.
///
/// # Key Types
///
/// - [`Literal`] - Booleans, integers, floats, characters, strings, pattern references
/// - [`LiteralKind`] - Discriminant used in diagnostics
pub mod literal;

/// Byte stores and the operations shared by all of their backings.
///
/// # Key Types
///
/// - [`Section`] - The store trait: sized, resizable, linearly addressed
/// - [`MemorySection`], [`ExternalSection`], [`FileSection`] - The three backings
/// - [`section::io`] - Endian-explicit scalar reads and writes
/// - [`section::shift`] - Insertion, removal, and overlap-safe region moves
pub mod section;

/// `bytepat` Result type
///
/// A type alias for [`std::result::Result<T, Error>`] where the error type is always [`Error`].
/// This is used consistently throughout the crate for all fallible operations.
///
/// # Examples
///
/// ```rust
/// use bytepat::{MemorySection, Result, Section};
///
/// fn first_word(section: &mut MemorySection) -> Result<[u8; 2]> {
///     let mut buf = [0u8; 2];
///     section.read_data(0, &mut buf, 2)?;
///     Ok(buf)
/// }
///
/// let mut section = MemorySection::new("data", vec![0xEF, 0xBE]);
/// assert_eq!(first_word(&mut section)?, [0xEF, 0xBE]);
/// # Ok::<(), bytepat::Error>(())
/// ```
pub type Result<T> = std::result::Result<T, Error>;

/// `bytepat` Error type
///
/// The main error type for all operations in this crate. Covers section access
/// failures, argument-count violations, permission denials, and value conversion
/// errors.
///
/// # Examples
///
/// ```rust
/// use bytepat::{Error, MemorySection, Section};
///
/// let mut section = MemorySection::new("data", vec![0u8; 2]);
/// let mut buf = [0u8; 4];
/// match section.read_data(0, &mut buf, 4) {
///     Err(Error::OutOfBounds { available, .. }) => assert_eq!(available, 2),
///     other => panic!("expected an out of bounds error, got {other:?}"),
/// }
/// ```
pub use error::Error;

/// Evaluation state passed to every function callback.
///
/// See [`context::EvalContext`] for attachment, lookup, and the permission grant.
pub use context::{EvalContext, SectionId};

/// The function layer: descriptors, contracts, packs, and the registry.
///
/// These types carry a call from a qualified name to a result:
/// - [`Function`] and [`FunctionCallback`] - The descriptor and its callback type
/// - [`ParameterCount`] - Arity contract built from named factories
/// - [`ParameterPack`], [`Argument`], [`expand_arguments`] - Variadic bundles
/// - [`FunctionRegistry`] and [`NamespacePath`] - Name resolution
pub use func::{
    expand_arguments, Argument, Function, FunctionCallback, FunctionRegistry, NamespacePath,
    ParameterCount, ParameterPack,
};

/// Literal values and their kind discriminant.
pub use literal::{Literal, LiteralKind, PatternRef};

/// Byte stores: the trait, the three backings, and the skip sentinel.
///
/// # Example
///
/// ```rust
/// use bytepat::{MemorySection, Section};
///
/// let mut section = MemorySection::with_size("zeroed", 4);
/// section.write_bytes(0, &[1, 2])?;
/// assert_eq!(section.data(), &[1, 2, 0, 0]);
/// # Ok::<(), bytepat::Error>(())
/// ```
pub use section::{ExternalSection, FileSection, MemorySection, Section, SKIP};
