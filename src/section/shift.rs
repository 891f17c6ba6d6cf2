//! Insertion, deletion and relocation of byte ranges within a section.
//!
//! These helpers restructure a section's address space using nothing but the
//! [`crate::section::Section`] capability, so they work identically over every
//! backend. They follow the portable region-copy calling convention described
//! in [`crate::section`]: each staged chunk is pre-filled from the source via
//! [`crate::section::Section::read_data`] and then handed to
//! [`crate::section::Section::write_data`] together with the true source
//! offset, which lands the same bytes regardless of which inputs the backend
//! consumes.
//!
//! Moves are chunked and ordered like a `memmove`: ascending when shifting
//! down, descending when shifting up, so overlapping ranges stay correct.

use super::{Section, SKIP};
use crate::{Error::OutOfBounds, Result};

/// Staging chunk size for large moves.
const STAGING: usize = 4096;

fn check_range<S: Section + ?Sized>(section: &S, address: u64, len: u64) -> Result<()> {
    let available = section.size();

    let Some(end) = address.checked_add(len) else {
        return Err(OutOfBounds {
            address,
            size: len,
            available,
        });
    };

    if end > available {
        return Err(OutOfBounds {
            address,
            size: len,
            available,
        });
    }

    Ok(())
}

/// Copies `len` bytes from `src` to `dst` within one section, overlap-safe.
///
/// Both ranges must lie within the section's current extent. The copy is staged
/// in chunks and ordered so that overlapping source and destination ranges
/// behave like a `memmove` in either direction.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if either range exceeds the section's
/// extent, and whatever error the backend surfaces for a failing transfer.
///
/// # Examples
///
/// ```rust
/// use bytepat::{section::shift::copy_within, MemorySection, Section};
///
/// let mut section = MemorySection::new("buf", vec![1, 2, 3, 4, 5, 6]);
/// copy_within(&mut section, 0, 2, 4)?;
/// assert_eq!(section.data(), &[1, 2, 1, 2, 3, 4]);
/// # Ok::<(), bytepat::Error>(())
/// ```
pub fn copy_within<S: Section + ?Sized>(section: &mut S, src: u64, dst: u64, len: u64) -> Result<()> {
    check_range(section, src, len)?;
    check_range(section, dst, len)?;

    if len == 0 || src == dst {
        return Ok(());
    }

    let mut staging = vec![0u8; len.min(STAGING as u64) as usize];

    if dst < src {
        // Shifting down: walk the range front to back.
        let mut moved = 0_u64;
        while moved < len {
            let chunk = (len - moved).min(STAGING as u64);
            section.read_data(src + moved, &mut staging, chunk)?;
            section.write_data(src + moved, dst + moved, &mut staging, chunk)?;
            moved += chunk;
        }
    } else {
        // Shifting up: walk the range back to front.
        let mut remaining = len;
        while remaining > 0 {
            let chunk = remaining.min(STAGING as u64);
            remaining -= chunk;
            section.read_data(src + remaining, &mut staging, chunk)?;
            section.write_data(src + remaining, dst + remaining, &mut staging, chunk)?;
        }
    }

    Ok(())
}

/// Opens a zero-filled gap of `count` bytes at `offset`, growing the section.
///
/// Bytes at and beyond `offset` move up by `count`; the gap reads back as
/// zeros. `offset` may equal the current size, which appends the gap.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if `offset` lies beyond the current
/// size, and whatever error the backend surfaces for resize or transfer.
///
/// # Examples
///
/// ```rust
/// use bytepat::{section::shift::insert, MemorySection, Section};
///
/// let mut section = MemorySection::new("buf", vec![1, 2, 3, 4]);
/// insert(&mut section, 2, 3)?;
/// assert_eq!(section.data(), &[1, 2, 0, 0, 0, 3, 4]);
/// # Ok::<(), bytepat::Error>(())
/// ```
pub fn insert<S: Section + ?Sized>(section: &mut S, offset: u64, count: u64) -> Result<()> {
    let old_size = section.size();

    if offset > old_size {
        return Err(OutOfBounds {
            address: offset,
            size: count,
            available: old_size,
        });
    }

    if count == 0 {
        return Ok(());
    }

    // The grown size must stay representable before the backend is touched.
    let Some(new_size) = old_size.checked_add(count) else {
        return Err(OutOfBounds {
            address: offset,
            size: count,
            available: old_size,
        });
    };

    section.resize(new_size)?;
    copy_within(section, offset, offset + count, old_size - offset)?;

    // Zero the gap; a skipped source keeps the staging buffer zero-filled on
    // every backend.
    let mut staging = vec![0u8; count.min(STAGING as u64) as usize];
    let mut cleared = 0_u64;
    while cleared < count {
        let chunk = (count - cleared).min(STAGING as u64);
        section.write_data(SKIP, offset + cleared, &mut staging, chunk)?;
        cleared += chunk;
    }

    Ok(())
}

/// Removes `count` bytes at `offset`, shrinking the section.
///
/// Bytes beyond the removed range move down by `count`.
///
/// # Errors
/// Returns [`crate::Error::OutOfBounds`] if the removed range exceeds the
/// current size, and whatever error the backend surfaces for resize or
/// transfer.
///
/// # Examples
///
/// ```rust
/// use bytepat::{section::shift::remove, MemorySection, Section};
///
/// let mut section = MemorySection::new("buf", vec![1, 2, 3, 4, 5]);
/// remove(&mut section, 1, 2)?;
/// assert_eq!(section.data(), &[1, 4, 5]);
/// # Ok::<(), bytepat::Error>(())
/// ```
pub fn remove<S: Section + ?Sized>(section: &mut S, offset: u64, count: u64) -> Result<()> {
    let old_size = section.size();
    check_range(section, offset, count)?;

    if count == 0 {
        return Ok(());
    }

    copy_within(section, offset + count, offset, old_size - offset - count)?;
    section.resize(old_size - count)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::MemorySection;

    #[test]
    fn test_copy_within_disjoint() {
        let mut section = MemorySection::new("mem", vec![9, 8, 7, 0, 0, 0]);
        copy_within(&mut section, 0, 3, 3).unwrap();
        assert_eq!(section.data(), &[9, 8, 7, 9, 8, 7]);
    }

    #[test]
    fn test_copy_within_overlap_up() {
        let mut section = MemorySection::new("mem", vec![1, 2, 3, 4, 5, 6]);
        copy_within(&mut section, 0, 2, 4).unwrap();
        assert_eq!(section.data(), &[1, 2, 1, 2, 3, 4]);
    }

    #[test]
    fn test_copy_within_overlap_down() {
        let mut section = MemorySection::new("mem", vec![1, 2, 3, 4, 5, 6]);
        copy_within(&mut section, 2, 0, 4).unwrap();
        assert_eq!(section.data(), &[3, 4, 5, 6, 5, 6]);
    }

    #[test]
    fn test_copy_within_same_offset_is_noop() {
        let mut section = MemorySection::new("mem", vec![1, 2, 3]);
        copy_within(&mut section, 1, 1, 2).unwrap();
        assert_eq!(section.data(), &[1, 2, 3]);
    }

    #[test]
    fn test_copy_within_chunked() {
        // Spans several staging chunks to exercise the chunk loop in both
        // directions.
        let len = STAGING * 2 + 17;
        let reference = crate::test::ramp(len * 2);

        let mut section = MemorySection::new("mem", reference.clone());
        copy_within(&mut section, 0, 11, len as u64).unwrap();

        assert_eq!(&section.data()[..11], &reference[..11]);
        assert_eq!(&section.data()[11..11 + len], &reference[..len]);

        let mut section = MemorySection::new("mem", reference.clone());
        copy_within(&mut section, 11, 0, len as u64).unwrap();
        assert_eq!(&section.data()[..len], &reference[11..11 + len]);
    }

    #[test]
    fn test_copy_within_bounds() {
        let mut section = MemorySection::with_size("mem", 8);

        assert!(copy_within(&mut section, 4, 0, 8).is_err());
        assert!(copy_within(&mut section, 0, 4, 8).is_err());
        assert!(copy_within(&mut section, u64::MAX, 0, 2).is_err());
        assert!(copy_within(&mut section, 0, 0, 8).is_ok());
    }

    #[test]
    fn test_insert_opens_zeroed_gap() {
        let mut section = MemorySection::new("mem", vec![1, 2, 3, 4]);

        insert(&mut section, 2, 3).unwrap();
        assert_eq!(section.size(), 7);
        assert_eq!(section.data(), &[1, 2, 0, 0, 0, 3, 4]);
    }

    #[test]
    fn test_insert_at_end_appends() {
        let mut section = MemorySection::new("mem", vec![0xAA, 0xBB]);

        insert(&mut section, 2, 2).unwrap();
        assert_eq!(section.data(), &[0xAA, 0xBB, 0, 0]);

        assert!(insert(&mut section, 5, 1).is_err());
    }

    #[test]
    fn test_insert_zero_count() {
        let mut section = MemorySection::new("mem", vec![1, 2]);
        insert(&mut section, 1, 0).unwrap();
        assert_eq!(section.data(), &[1, 2]);
    }

    #[test]
    fn test_insert_rejects_count_overflowing_the_size() {
        let mut section = MemorySection::new("mem", vec![1, 2, 3, 4, 5, 6, 7, 8]);

        let result = insert(&mut section, 0, u64::MAX - 3);
        assert!(matches!(
            result.unwrap_err(),
            OutOfBounds { address: 0, available: 8, .. }
        ));

        // The failed insert must leave the section untouched.
        assert_eq!(section.size(), 8);
        assert_eq!(section.data(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_remove_closes_gap() {
        let mut section = MemorySection::new("mem", vec![1, 2, 3, 4, 5]);

        remove(&mut section, 1, 2).unwrap();
        assert_eq!(section.size(), 3);
        assert_eq!(section.data(), &[1, 4, 5]);
    }

    #[test]
    fn test_remove_whole_section() {
        let mut section = MemorySection::new("mem", vec![1, 2, 3]);
        remove(&mut section, 0, 3).unwrap();
        assert_eq!(section.size(), 0);
    }

    #[test]
    fn test_remove_bounds() {
        let mut section = MemorySection::new("mem", vec![1, 2, 3]);
        assert!(remove(&mut section, 2, 2).is_err());
        assert!(remove(&mut section, 4, 0).is_err());
    }

    #[test]
    fn test_insert_then_remove_roundtrip() {
        let original = vec![10, 20, 30, 40, 50, 60];
        let mut section = MemorySection::new("mem", original.clone());

        insert(&mut section, 3, 4).unwrap();
        remove(&mut section, 3, 4).unwrap();
        assert_eq!(section.data(), &original[..]);
    }
}
