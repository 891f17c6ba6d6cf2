//! Callback-backed section over an external byte provider.
//!
//! An [`ExternalSection`] owns no bytes at all: every transfer is delegated to a
//! pair of host-supplied callbacks, one for reads and one for writes. The host
//! wires these to whatever actually holds the data (a device, another process,
//! a network stream) and must keep that resource alive for the section's
//! lifetime. Callbacks are synchronous calls from this crate's perspective; a
//! host bridging to asynchronous I/O has to block until completion.
//!
//! Because the true extent is only known to the callbacks, this backend performs
//! no extent checks of its own; [`ExternalSection::resize`] merely updates the
//! declared size that [`ExternalSection::size`] reports.

use std::fmt;

use super::{Section, SKIP};
use crate::{Error::OutOfBounds, Result};

/// Read handler: fill the span with bytes starting at the given address.
pub type ReadHandler = Box<dyn FnMut(u64, &mut [u8])>;

/// Write handler: store the span's bytes starting at the given address.
pub type WriteHandler = Box<dyn FnMut(u64, &[u8])>;

/// Section backed by an external byte provider reached through callbacks
pub struct ExternalSection {
    name: String,
    size: u64,
    read: ReadHandler,
    write: WriteHandler,
}

impl ExternalSection {
    /// Create a new callback-backed section
    ///
    /// ## Arguments
    /// * 'name' - The section's stable identifier
    /// * 'size' - The declared size of the external resource in bytes
    /// * 'read' - Invoked to fill a span with bytes starting at an address
    /// * 'write' - Invoked to store a span's bytes starting at an address
    pub fn new(
        name: impl Into<String>,
        size: u64,
        read: impl FnMut(u64, &mut [u8]) + 'static,
        write: impl FnMut(u64, &[u8]) + 'static,
    ) -> ExternalSection {
        ExternalSection {
            name: name.into(),
            size,
            read: Box::new(read),
            write: Box::new(write),
        }
    }
}

impl Section for ExternalSection {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.size
    }

    // The external resource is owned elsewhere; only the declared size changes.
    fn resize(&mut self, new_size: u64) -> Result<()> {
        self.size = new_size;
        Ok(())
    }

    fn read_data(&mut self, address: u64, buffer: &mut [u8], size: u64) -> Result<()> {
        let available = buffer.len() as u64;
        if available < size {
            return Err(OutOfBounds {
                address,
                size,
                available,
            });
        }

        (self.read)(address, &mut buffer[..size as usize]);
        Ok(())
    }

    fn write_data(
        &mut self,
        src_offset: u64,
        dst_offset: u64,
        buffer: &mut [u8],
        size: u64,
    ) -> Result<()> {
        if src_offset == SKIP && dst_offset == SKIP {
            return Ok(());
        }

        let available = buffer.len() as u64;
        if available < size {
            let address = if src_offset != SKIP {
                src_offset
            } else {
                dst_offset
            };
            return Err(OutOfBounds {
                address,
                size,
                available,
            });
        }

        let staging = &mut buffer[..size as usize];

        if src_offset != SKIP {
            (self.read)(src_offset, staging);
        }

        if dst_offset != SKIP {
            (self.write)(dst_offset, staging);
        }

        Ok(())
    }

    // Extent checks belong to the callbacks, same as the transfer paths.
    fn write_bytes(&mut self, address: u64, data: &[u8]) -> Result<()> {
        (self.write)(address, data);
        Ok(())
    }
}

impl fmt::Debug for ExternalSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExternalSection")
            .field("name", &self.name)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}
