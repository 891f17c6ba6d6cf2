//! File-backed section using seek-based I/O.
//!
//! This module provides the [`crate::section::FileSection`] backend that implements the
//! [`crate::section::Section`] trait over an exclusively owned [`std::fs::File`]. The file
//! is opened write-capable at construction and released when the section is dropped;
//! `resize` maps to truncating or extending the file on disk.
//!
//! # Architecture
//!
//! Every transfer seeks first and then reads or writes through the owned handle:
//!
//! - [`crate::section::Section::read_data`] - seek to the address, read into the caller's buffer
//! - [`crate::section::Section::write_data`] - stage through an internal zero-initialized
//!   buffer: seek and read it from the source offset (unless skipped), then seek and write
//!   it to the destination offset (unless skipped). The caller's buffer is never consulted,
//!   which is what makes a skipped source equivalent to zero-fill on this backend.
//!
//! The section caches the file length and keeps it current across `resize` and staged
//! writes; exclusive ownership of the handle is what makes the cache sound.
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use bytepat::{FileSection, Section};
//!
//! let mut section = FileSection::open("firmware", "image.bin")?;
//! println!("File size: {} bytes", section.size());
//!
//! let mut header = [0u8; 4];
//! section.read_data(0, &mut header, 4)?;
//! # Ok::<(), bytepat::Error>(())
//! ```
//!
//! # Integration
//!
//! This backend is attached to an evaluation context like any other section; the helpers
//! in [`crate::section::shift`] work unchanged on top of it because they follow the
//! portable region-copy calling convention described in [`crate::section`].

use std::fs;
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use super::{Section, SKIP};
use crate::{Error::OutOfBounds, Result};

/// Section backed by an exclusively owned file on disk.
///
/// All operations translate section addresses to file offsets one-to-one. The
/// handle is opened read+write at construction; no locking or permission
/// management happens at this layer.
///
/// # Examples
///
/// ```rust,no_run
/// use bytepat::{FileSection, Section, SKIP};
///
/// let mut section = FileSection::create("scratch", "scratch.bin")?;
/// section.resize(16)?;
///
/// // Copy the first eight bytes over the last eight, staged by the backend.
/// section.write_data(0, 8, &mut [], 8)?;
/// # Ok::<(), bytepat::Error>(())
/// ```
#[derive(Debug)]
pub struct FileSection {
    name: String,
    file: fs::File,
    size: u64,
}

impl FileSection {
    /// Open an existing file as a section.
    ///
    /// The file is opened read+write; opening fails if it does not exist.
    ///
    /// # Arguments
    /// * `name` - The section's stable identifier
    /// * `path` - Path of the file to open. Accepts `&Path`, `&str`, `String`, or `PathBuf`.
    ///
    /// # Errors
    /// Returns [`crate::Error::Io`] if the file cannot be opened or its length
    /// cannot be queried.
    pub fn open(name: impl Into<String>, path: impl AsRef<Path>) -> Result<FileSection> {
        let file = fs::OpenOptions::new().read(true).write(true).open(path)?;

        FileSection::from_file(name, file)
    }

    /// Open a file as a section, creating it empty if it does not exist.
    ///
    /// # Arguments
    /// * `name` - The section's stable identifier
    /// * `path` - Path of the file to open or create
    ///
    /// # Errors
    /// Returns [`crate::Error::Io`] if the file cannot be opened or created.
    pub fn create(name: impl Into<String>, path: impl AsRef<Path>) -> Result<FileSection> {
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;

        FileSection::from_file(name, file)
    }

    /// Wrap an already opened file handle as a section.
    ///
    /// The handle must be readable and writable; the section takes exclusive
    /// ownership and closes it on drop.
    ///
    /// # Errors
    /// Returns [`crate::Error::Io`] if the file length cannot be queried.
    pub fn from_file(name: impl Into<String>, file: fs::File) -> Result<FileSection> {
        let size = file.metadata()?.len();

        Ok(FileSection {
            name: name.into(),
            file,
            size,
        })
    }

    fn check_extent(&self, address: u64, size: u64) -> Result<()> {
        let Some(end) = address.checked_add(size) else {
            return Err(OutOfBounds {
                address,
                size,
                available: self.size,
            });
        };

        if end > self.size {
            return Err(OutOfBounds {
                address,
                size,
                available: self.size,
            });
        }

        Ok(())
    }
}

impl Section for FileSection {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    fn resize(&mut self, new_size: u64) -> Result<()> {
        self.file.set_len(new_size)?;
        self.size = new_size;
        Ok(())
    }

    fn read_data(&mut self, address: u64, buffer: &mut [u8], size: u64) -> Result<()> {
        self.check_extent(address, size)?;

        if (buffer.len() as u64) < size {
            return Err(OutOfBounds {
                address,
                size,
                available: buffer.len() as u64,
            });
        }

        self.file.seek(SeekFrom::Start(address))?;
        self.file.read_exact(&mut buffer[..size as usize])?;
        Ok(())
    }

    // The caller's buffer is never consulted; all staging happens in an owned
    // zero-initialized buffer so a skipped source turns into zero-fill.
    fn write_data(
        &mut self,
        src_offset: u64,
        dst_offset: u64,
        _buffer: &mut [u8],
        size: u64,
    ) -> Result<()> {
        if src_offset == SKIP && dst_offset == SKIP {
            return Ok(());
        }

        let Ok(len) = usize::try_from(size) else {
            return Err(OutOfBounds {
                address: if src_offset != SKIP { src_offset } else { dst_offset },
                size,
                available: usize::MAX as u64,
            });
        };

        let mut staging = vec![0u8; len];

        if src_offset != SKIP {
            self.check_extent(src_offset, size)?;
            self.file.seek(SeekFrom::Start(src_offset))?;
            self.file.read_exact(&mut staging)?;
        }

        if dst_offset != SKIP {
            self.check_extent(dst_offset, size)?;
            self.file.seek(SeekFrom::Start(dst_offset))?;
            self.file.write_all(&staging)?;
        }

        Ok(())
    }

    fn write_bytes(&mut self, address: u64, data: &[u8]) -> Result<()> {
        self.check_extent(address, data.len() as u64)?;
        self.file.seek(SeekFrom::Start(address))?;
        self.file.write_all(data)?;
        Ok(())
    }
}
