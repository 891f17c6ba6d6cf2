//! Addressable byte sections over heterogeneous backing stores.
//!
//! This module provides the [`crate::section::Section`] capability: a named, resizable,
//! linearly-addressed byte store that an evaluator reads, writes and restructures without
//! knowing where the bytes actually live. The same pattern program runs unmodified over an
//! in-memory buffer, a live external data source or a file on disk, because all byte access
//! goes through this one trait.
//!
//! # Architecture
//!
//! The module is built around the [`crate::section::Section`] trait and three backends:
//!
//! - [`crate::section::MemorySection`] - an owned, growable in-memory buffer
//! - [`crate::section::ExternalSection`] - an external byte provider reached through a pair
//!   of read/write callbacks; the referenced resource is owned elsewhere
//! - [`crate::section::FileSection`] - an exclusively owned file handle accessed through
//!   seek-based I/O
//!
//! Callers hold `Box<dyn Section>` (or a concrete backend) and never branch on the backend
//! kind; only the backends' own operation implementations differ.
//!
//! # Key Components
//!
//! ## Core Trait
//! - [`crate::section::Section`] - size/resize/read/write capability over a byte address space
//!
//! ## Backends
//! - [`crate::section::MemorySection`] - direct byte copies against a `Vec<u8>`
//! - [`crate::section::ExternalSection`] - delegates every transfer to its callbacks
//! - [`crate::section::FileSection`] - seeks then reads/writes, resize maps to truncate/extend
//!
//! ## Supporting Utilities
//! - [`crate::section::io`] - bounds-checked endian scalar decoding over section bytes
//! - [`crate::section::shift`] - insertion, deletion and relocation built on region copies
//!
//! # Region Copies and the Skip Sentinel
//!
//! [`Section::write_data`] is a generalized region copy: move `size` bytes from `src_offset`
//! to `dst_offset`, where either half may be omitted by passing [`SKIP`]. A skipped source
//! means the bytes are not-yet-determined (backends substitute zero-fill or the caller's
//! staging buffer); a skipped destination discards the read bytes and mutates nothing. This
//! one primitive covers "insert and zero-fill a gap" (`src = SKIP`) and "drop a captured
//! region" (`dst = SKIP`) without backend-specific logic in the evaluator.
//!
//! The backends deliberately differ in which inputs they consume (see [`Section::write_data`]
//! for the exact per-backend behavior). The portable calling convention that lands identical
//! bytes on every backend is: pre-fill `buffer` from the source region, then pass the true
//! `src_offset` alongside it. The helpers in [`crate::section::shift`] follow that convention.
//!
//! A host that has literal bytes to store, rather than a region to copy, uses
//! [`Section::write_bytes`]; that primitive places exactly the given bytes on every backend.
//!
//! # Examples
//!
//! ## Round-tripping bytes through a memory section
//!
//! ```rust
//! use bytepat::{MemorySection, Section};
//!
//! let mut section = MemorySection::with_size("stage", 16);
//! section.write_bytes(4, b"\xDE\xAD\xBE\xEF")?;
//!
//! let mut readback = [0u8; 4];
//! section.read_data(4, &mut readback, 4)?;
//! assert_eq!(&readback, b"\xDE\xAD\xBE\xEF");
//! # Ok::<(), bytepat::Error>(())
//! ```
//!
//! ## Zero-filling a file region
//!
//! ```rust,no_run
//! use bytepat::{FileSection, Section, SKIP};
//!
//! let mut section = FileSection::create("patch", "scratch.bin")?;
//! section.resize(10)?;
//!
//! // Source skipped: the staged buffer stays zero-initialized.
//! section.write_data(SKIP, 0, &mut [], 10)?;
//! # Ok::<(), bytepat::Error>(())
//! ```
//!
//! # Ownership
//!
//! A section is created by the host (typically a data-source manager) and attached to an
//! evaluation context for the duration of one run; this module defines no sharing or
//! synchronization. [`crate::section::FileSection`] owns its file handle and releases it on
//! drop. [`crate::section::ExternalSection`] owns only its two callbacks; keeping the
//! resource they reach alive is the caller's obligation.

pub mod io;
pub mod shift;

mod external;
mod file;
mod memory;

pub use external::ExternalSection;
pub use file::FileSection;
pub use memory::MemorySection;

use crate::Result;

/// Reserved sentinel offset meaning "omit this half of a region copy".
///
/// Passing `SKIP` as `src_offset` to [`Section::write_data`] omits the source read;
/// passing it as `dst_offset` omits the destination write. The value is all bits set
/// and is never a valid addressable offset; backends treat it as a control sentinel,
/// not a literal address.
pub const SKIP: u64 = u64::MAX;

/// A named, resizable, linearly-addressed byte store.
///
/// Addresses passed to [`Section::read_data`] and [`Section::write_data`] are absolute
/// offsets into the section's own address space, independent of how the backend stores
/// the bytes. Operations are synchronous and non-suspending; nothing is retried or
/// cached internally, and every read goes back to the backing store.
///
/// # Examples
///
/// ```rust
/// use bytepat::{MemorySection, Section};
///
/// fn tail_byte(section: &mut dyn Section) -> bytepat::Result<u8> {
///     let mut buf = [0u8; 1];
///     let last = section.size() - 1;
///     section.read_data(last, &mut buf, 1)?;
///     Ok(buf[0])
/// }
///
/// let mut section = MemorySection::new("demo", vec![1, 2, 3]);
/// assert_eq!(tail_byte(&mut section)?, 3);
/// # Ok::<(), bytepat::Error>(())
/// ```
pub trait Section {
    /// Returns the section's name.
    ///
    /// The name is a stable identifier assigned at construction; it never changes
    /// for the section's lifetime.
    fn name(&self) -> &str;

    /// Returns the current length of the backing store in bytes.
    ///
    /// Side-effect-free. Always reflects the true current length: immediately after
    /// `resize(n)`, `size()` returns `n`.
    fn size(&self) -> u64;

    /// Grows or shrinks the backing store to `new_size` bytes.
    ///
    /// Existing bytes are preserved up to `min(old, new)`. What backs newly grown
    /// bytes is backend policy: the memory backend zero-fills, the file backend
    /// extends the file (which reads back as zeros), and the external backend only
    /// updates its bookkeeping size; it never resizes the external resource.
    ///
    /// # Errors
    /// Returns [`crate::Error::Io`] if the file backend fails to truncate or extend.
    fn resize(&mut self, new_size: u64) -> Result<()>;

    /// Fills `buffer` with `size` bytes starting at `address`.
    ///
    /// `buffer` must provide at least `size` bytes. The memory backend copies
    /// directly from its buffer, the external backend delegates entirely to its read
    /// callback, and the file backend seeks then reads.
    ///
    /// # Arguments
    /// * `address` - Absolute offset into the section's address space
    /// * `buffer` - Destination for the read bytes
    /// * `size` - Number of bytes to read
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `address + size` exceeds the extent
    /// known to the backend or `buffer` is shorter than `size`, and
    /// [`crate::Error::Io`] if a file operation fails.
    fn read_data(&mut self, address: u64, buffer: &mut [u8], size: u64) -> Result<()>;

    /// Copies `size` bytes from `src_offset` to `dst_offset`, either side optional.
    ///
    /// Passing [`SKIP`] as `src_offset` omits the source read; passing it as
    /// `dst_offset` omits the destination write (nothing is mutated). Which inputs
    /// each backend consumes differs:
    ///
    /// - **Memory**: ignores `src_offset` entirely and always places `buffer` at
    ///   `dst_offset`; the caller is expected to have populated `buffer` already.
    /// - **External**: runs the read callback at `src_offset` into `buffer` (unless
    ///   skipped), then the write callback at `dst_offset` from `buffer` (unless
    ///   skipped); the caller's buffer is the staging area for both halves.
    /// - **File**: ignores the caller's buffer entirely and stages through its own
    ///   zero-initialized buffer, reading it from `src_offset` (unless skipped), then
    ///   writing it to `dst_offset` (unless skipped).
    ///
    /// To land identical bytes on every backend, pre-fill `buffer` from the source
    /// region and pass the true `src_offset` alongside it; to zero-fill, pass a
    /// zeroed `buffer` with `src_offset = SKIP`.
    ///
    /// The two halves are not atomic: if the destination write fails after the
    /// source read succeeded, the backing store is left in a backend-defined
    /// partial state.
    ///
    /// # Arguments
    /// * `src_offset` - Where to read from, or [`SKIP`] to omit the read
    /// * `dst_offset` - Where to write to, or [`SKIP`] to omit the write
    /// * `buffer` - Staging area (consulted or ignored per backend, see above)
    /// * `size` - Number of bytes to copy
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if a consulted offset/size combination
    /// exceeds the extent known to the backend or a consulted `buffer` is shorter
    /// than `size`, and [`crate::Error::Io`] if a file operation fails.
    fn write_data(
        &mut self,
        src_offset: u64,
        dst_offset: u64,
        buffer: &mut [u8],
        size: u64,
    ) -> Result<()>;

    /// Writes `data` at `address`.
    ///
    /// Unlike [`Section::write_data`], whose staging inputs differ per backend,
    /// every backend stores exactly the given bytes: the memory backend copies
    /// them into its buffer, the external backend hands them to its write
    /// callback, and the file backend seeks then writes. This is the primitive
    /// for callers that hold literal bytes rather than a region to copy.
    ///
    /// # Arguments
    /// * `address` - Absolute offset into the section's address space
    /// * `data` - The bytes to store
    ///
    /// # Errors
    /// Returns [`crate::Error::OutOfBounds`] if `address + data.len()` exceeds
    /// the extent known to the backend, and [`crate::Error::Io`] if a file
    /// operation fails.
    fn write_bytes(&mut self, address: u64, data: &[u8]) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_is_never_addressable() {
        // A section extent can never reach the sentinel, since size is a u64 too.
        assert_eq!(SKIP, u64::MAX);
        assert!(SKIP > i64::MAX as u64);
    }

    #[test]
    fn test_trait_object_dispatch() {
        let mut section: Box<dyn Section> = Box::new(MemorySection::with_size("dyn", 8));
        assert_eq!(section.name(), "dyn");
        assert_eq!(section.size(), 8);

        let mut data = [0xAA_u8; 4];
        section.write_data(SKIP, 2, &mut data, 4).unwrap();

        let mut readback = [0u8; 4];
        section.read_data(2, &mut readback, 4).unwrap();
        assert_eq!(readback, [0xAA; 4]);

        section.write_bytes(0, &[0x11, 0x22]).unwrap();
        section.read_data(0, &mut readback[..2], 2).unwrap();
        assert_eq!(&readback[..2], &[0x11, 0x22]);
    }
}
