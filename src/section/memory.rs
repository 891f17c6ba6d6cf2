use super::{Section, SKIP};
use crate::{Error::OutOfBounds, Result};

/// Section backed by an owned in-memory buffer
#[derive(Debug)]
pub struct MemorySection {
    name: String,
    data: Vec<u8>,
}

impl MemorySection {
    /// Create a new memory-backed section
    ///
    /// ## Arguments
    /// * 'name' - The section's stable identifier
    /// * 'data' - The initial buffer to consume
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> MemorySection {
        MemorySection {
            name: name.into(),
            data,
        }
    }

    /// Create a new zero-filled memory-backed section of `size` bytes
    ///
    /// ## Arguments
    /// * 'name' - The section's stable identifier
    /// * 'size' - The initial length in bytes
    pub fn with_size(name: impl Into<String>, size: usize) -> MemorySection {
        MemorySection {
            name: name.into(),
            data: vec![0; size],
        }
    }

    /// Borrow the underlying buffer
    pub fn data(&self) -> &[u8] {
        self.data.as_slice()
    }

    /// Consume the section and return its buffer
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    fn bounds(&self, address: u64, size: u64) -> Result<std::ops::Range<usize>> {
        let available = self.data.len() as u64;

        let Some(end) = address.checked_add(size) else {
            return Err(OutOfBounds {
                address,
                size,
                available,
            });
        };

        if end > available {
            return Err(OutOfBounds {
                address,
                size,
                available,
            });
        }

        Ok(address as usize..end as usize)
    }
}

impl Section for MemorySection {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> u64 {
        self.data.len() as u64
    }

    fn resize(&mut self, new_size: u64) -> Result<()> {
        let Ok(new_len) = usize::try_from(new_size) else {
            return Err(OutOfBounds {
                address: 0,
                size: new_size,
                available: usize::MAX as u64,
            });
        };

        self.data.resize(new_len, 0);
        Ok(())
    }

    fn read_data(&mut self, address: u64, buffer: &mut [u8], size: u64) -> Result<()> {
        let range = self.bounds(address, size)?;

        if (buffer.len() as u64) < size {
            return Err(OutOfBounds {
                address,
                size,
                available: buffer.len() as u64,
            });
        }

        buffer[..range.len()].copy_from_slice(&self.data[range]);
        Ok(())
    }

    // The source offset plays no part here: the caller is expected to have
    // populated `buffer` already, so only the destination half applies.
    fn write_data(
        &mut self,
        _src_offset: u64,
        dst_offset: u64,
        buffer: &mut [u8],
        size: u64,
    ) -> Result<()> {
        if dst_offset == SKIP {
            return Ok(());
        }

        let range = self.bounds(dst_offset, size)?;

        if (buffer.len() as u64) < size {
            return Err(OutOfBounds {
                address: dst_offset,
                size,
                available: buffer.len() as u64,
            });
        }

        self.data[range.clone()].copy_from_slice(&buffer[..range.len()]);
        Ok(())
    }

    fn write_bytes(&mut self, address: u64, data: &[u8]) -> Result<()> {
        let range = self.bounds(address, data.len() as u64)?;
        self.data[range].copy_from_slice(data);
        Ok(())
    }
}
