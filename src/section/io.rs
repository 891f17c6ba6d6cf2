//! Bounds-checked endian decoding and encoding of fixed-width scalars.
//!
//! Pattern programs read integers and floats of every fixed width, at either
//! endianness, out of section bytes. This module provides the safe slice-level
//! primitives for that: read a section region into a stack buffer with
//! [`crate::section::Section::read_data`], then decode scalars out of it with
//! the functions here. All operations are bounds-checked and return
//! [`crate::Error::OutOfBounds`] instead of panicking on short input.
//!
//! # Key Components
//!
//! ## Core Trait
//! - [`crate::section::io::Scalar`] - fixed-width primitives decodable at either endianness
//!
//! ## Reading Functions
//! - [`crate::section::io::read_le`] / [`crate::section::io::read_be`] - decode from the
//!   start of a buffer
//! - [`crate::section::io::read_le_at`] / [`crate::section::io::read_be_at`] - decode at an
//!   offset, advancing it past the consumed bytes
//!
//! ## Writing Functions
//! - [`crate::section::io::write_le`] / [`crate::section::io::write_be`] - encode to the
//!   start of a buffer
//! - [`crate::section::io::write_le_at`] / [`crate::section::io::write_be_at`] - encode at an
//!   offset, advancing it past the produced bytes
//!
//! ## Supported Types
//! `u8`, `i8`, `u16`, `i16`, `u32`, `i32`, `u64`, `i64`, `u128`, `i128`, `f32`, `f64`:
//! the full scalar range a pattern literal can carry.
//!
//! # Usage Examples
//!
//! ```rust
//! use bytepat::section::io::{read_le_at, read_be};
//!
//! let data = [0x01, 0x00, 0x02, 0x00];
//! let mut offset = 0;
//!
//! let first: u16 = read_le_at(&data, &mut offset)?;
//! let second: u16 = read_le_at(&data, &mut offset)?;
//! assert_eq!((first, second, offset), (1, 2, 4));
//!
//! let big: u32 = read_be(&data)?;
//! assert_eq!(big, 0x0100_0200);
//! # Ok::<(), bytepat::Error>(())
//! ```

use crate::{Error::OutOfBounds, Result};

/// Fixed-width primitive readable and writable at either endianness.
///
/// Implementations exist for all fixed-width integers up to 128 bits and for
/// both float widths. The `Bytes` associated type is the `[u8; N]` a value of
/// the type occupies; conversions go through the standard library's
/// `from_le_bytes`/`to_le_bytes` family.
pub trait Scalar: Sized {
    /// The fixed-size byte array holding one encoded value of this type.
    type Bytes: Sized + for<'a> TryFrom<&'a [u8]> + AsRef<[u8]>;

    /// Decode a value from its little-endian byte representation
    fn from_le_bytes(bytes: Self::Bytes) -> Self;
    /// Decode a value from its big-endian byte representation
    fn from_be_bytes(bytes: Self::Bytes) -> Self;

    /// Encode this value into its little-endian byte representation
    fn to_le_bytes(self) -> Self::Bytes;
    /// Encode this value into its big-endian byte representation
    fn to_be_bytes(self) -> Self::Bytes;
}

macro_rules! impl_scalar {
    ($($ty:ty => $len:expr),+ $(,)?) => {
        $(
            impl Scalar for $ty {
                type Bytes = [u8; $len];

                fn from_le_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_le_bytes(bytes)
                }

                fn from_be_bytes(bytes: Self::Bytes) -> Self {
                    <$ty>::from_be_bytes(bytes)
                }

                fn to_le_bytes(self) -> Self::Bytes {
                    <$ty>::to_le_bytes(self)
                }

                fn to_be_bytes(self) -> Self::Bytes {
                    <$ty>::to_be_bytes(self)
                }
            }
        )+
    };
}

impl_scalar!(
    u8 => 1, i8 => 1,
    u16 => 2, i16 => 2,
    u32 => 4, i32 => 4, f32 => 4,
    u64 => 8, i64 => 8, f64 => 8,
    u128 => 16, i128 => 16,
);

fn checked_span(data_len: usize, offset: usize, type_len: usize) -> Result<usize> {
    let Some(end) = offset.checked_add(type_len) else {
        return Err(OutOfBounds {
            address: offset as u64,
            size: type_len as u64,
            available: data_len as u64,
        });
    };

    if end > data_len {
        return Err(OutOfBounds {
            address: offset as u64,
            size: type_len as u64,
            available: data_len as u64,
        });
    }

    Ok(end)
}

/// Decodes a `T` in little-endian byte order from the start of `data`.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if `data` holds fewer bytes than the
/// type occupies.
pub fn read_le<T: Scalar>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_le_at(data, &mut offset)
}

/// Decodes a `T` in big-endian byte order from the start of `data`.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if `data` holds fewer bytes than the
/// type occupies.
pub fn read_be<T: Scalar>(data: &[u8]) -> Result<T> {
    let mut offset = 0_usize;
    read_be_at(data, &mut offset)
}

/// Decodes a `T` in little-endian byte order at `offset`, advancing the offset
/// past the consumed bytes.
///
/// # Arguments
/// * `data` - The byte buffer to decode from
/// * `offset` - Position to decode at; advanced by `size_of::<T>()` on success
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if fewer than `size_of::<T>()` bytes
/// remain at `offset`.
pub fn read_le_at<T: Scalar>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let end = checked_span(data.len(), *offset, type_len)?;

    let Ok(bytes) = data[*offset..end].try_into() else {
        return Err(OutOfBounds {
            address: *offset as u64,
            size: type_len as u64,
            available: data.len() as u64,
        });
    };

    *offset = end;

    Ok(T::from_le_bytes(bytes))
}

/// Decodes a `T` in big-endian byte order at `offset`, advancing the offset
/// past the consumed bytes.
///
/// # Arguments
/// * `data` - The byte buffer to decode from
/// * `offset` - Position to decode at; advanced by `size_of::<T>()` on success
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if fewer than `size_of::<T>()` bytes
/// remain at `offset`.
pub fn read_be_at<T: Scalar>(data: &[u8], offset: &mut usize) -> Result<T> {
    let type_len = std::mem::size_of::<T>();
    let end = checked_span(data.len(), *offset, type_len)?;

    let Ok(bytes) = data[*offset..end].try_into() else {
        return Err(OutOfBounds {
            address: *offset as u64,
            size: type_len as u64,
            available: data.len() as u64,
        });
    };

    *offset = end;

    Ok(T::from_be_bytes(bytes))
}

/// Encodes `value` in little-endian byte order at the start of `data`.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if `data` holds fewer bytes than the
/// type occupies.
pub fn write_le<T: Scalar>(data: &mut [u8], value: T) -> Result<()> {
    let mut offset = 0_usize;
    write_le_at(data, &mut offset, value)
}

/// Encodes `value` in big-endian byte order at the start of `data`.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if `data` holds fewer bytes than the
/// type occupies.
pub fn write_be<T: Scalar>(data: &mut [u8], value: T) -> Result<()> {
    let mut offset = 0_usize;
    write_be_at(data, &mut offset, value)
}

/// Encodes `value` in little-endian byte order at `offset`, advancing the
/// offset past the produced bytes.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if fewer than `size_of::<T>()` bytes
/// remain at `offset`.
pub fn write_le_at<T: Scalar>(data: &mut [u8], offset: &mut usize, value: T) -> Result<()> {
    let type_len = std::mem::size_of::<T>();
    let end = checked_span(data.len(), *offset, type_len)?;

    let bytes = value.to_le_bytes();
    data[*offset..end].copy_from_slice(bytes.as_ref());

    *offset = end;

    Ok(())
}

/// Encodes `value` in big-endian byte order at `offset`, advancing the offset
/// past the produced bytes.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if fewer than `size_of::<T>()` bytes
/// remain at `offset`.
pub fn write_be_at<T: Scalar>(data: &mut [u8], offset: &mut usize, value: T) -> Result<()> {
    let type_len = std::mem::size_of::<T>();
    let end = checked_span(data.len(), *offset, type_len)?;

    let bytes = value.to_be_bytes();
    data[*offset..end].copy_from_slice(bytes.as_ref());

    *offset = end;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_le() {
        let data = [0x78, 0x56, 0x34, 0x12];
        let value: u32 = read_le(&data).unwrap();
        assert_eq!(value, 0x1234_5678);

        let value: u16 = read_le(&data).unwrap();
        assert_eq!(value, 0x5678);

        let value: u8 = read_le(&data).unwrap();
        assert_eq!(value, 0x78);
    }

    #[test]
    fn test_read_be() {
        let data = [0x12, 0x34, 0x56, 0x78];
        let value: u32 = read_be(&data).unwrap();
        assert_eq!(value, 0x1234_5678);

        let value: i16 = read_be(&data).unwrap();
        assert_eq!(value, 0x1234);
    }

    #[test]
    fn test_read_at_advances_offset() {
        let data = [0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x00, 0x00];
        let mut offset = 0;

        let first: u16 = read_le_at(&data, &mut offset).unwrap();
        let second: u16 = read_le_at(&data, &mut offset).unwrap();
        let third: u32 = read_le_at(&data, &mut offset).unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(third, 3);
        assert_eq!(offset, 8);
    }

    #[test]
    fn test_read_out_of_bounds() {
        let data = [0x01, 0x02];

        assert!(read_le::<u32>(&data).is_err());
        assert!(read_be::<u64>(&data).is_err());

        let mut offset = 1;
        assert!(read_le_at::<u16>(&data, &mut offset).is_err());
        // A failed read must not advance the offset.
        assert_eq!(offset, 1);

        let mut offset = usize::MAX;
        let result = read_le_at::<u16>(&data, &mut offset);
        assert!(matches!(result.unwrap_err(), OutOfBounds { .. }));
    }

    #[test]
    fn test_write_le_roundtrip() {
        let mut data = [0u8; 8];
        let mut offset = 0;

        write_le_at(&mut data, &mut offset, 1_u16).unwrap();
        write_le_at(&mut data, &mut offset, 2_u16).unwrap();
        write_le_at(&mut data, &mut offset, 3_u32).unwrap();
        assert_eq!(offset, 8);
        assert_eq!(data, [0x01, 0x00, 0x02, 0x00, 0x03, 0x00, 0x00, 0x00]);

        let mut offset = 0;
        let first: u16 = read_le_at(&data, &mut offset).unwrap();
        let second: u16 = read_le_at(&data, &mut offset).unwrap();
        let third: u32 = read_le_at(&data, &mut offset).unwrap();
        assert_eq!((first, second, third), (1, 2, 3));
    }

    #[test]
    fn test_write_be() {
        let mut data = [0u8; 4];
        write_be(&mut data, 0x1234_5678_u32).unwrap();
        assert_eq!(data, [0x12, 0x34, 0x56, 0x78]);

        let mut short = [0u8; 2];
        assert!(write_be(&mut short, 0x1234_5678_u32).is_err());
    }

    #[test]
    fn test_wide_scalars() {
        let mut data = [0u8; 16];
        let value = 0x0102_0304_0506_0708_090A_0B0C_0D0E_0F10_u128;

        write_le(&mut data, value).unwrap();
        assert_eq!(read_le::<u128>(&data).unwrap(), value);

        write_be(&mut data, -5_i128).unwrap();
        assert_eq!(read_be::<i128>(&data).unwrap(), -5);
    }

    #[test]
    fn test_floats() {
        let mut data = [0u8; 8];

        write_le(&mut data, 1.5_f64).unwrap();
        assert_eq!(read_le::<f64>(&data).unwrap(), 1.5);

        write_be(&mut data, -0.25_f32).unwrap();
        assert_eq!(read_be::<f32>(&data).unwrap(), -0.25);
    }
}
