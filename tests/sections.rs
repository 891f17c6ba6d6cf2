//! Cross-backend section integration tests.
//!
//! Runs the same region-copy and shift scenarios against the in-memory and
//! file backings through the public API and verifies that both end up with
//! identical bytes, then checks the callback backing against memory as well.

use std::cell::RefCell;
use std::rc::Rc;

use bytepat::prelude::*;
use bytepat::section::shift;
use tempfile::NamedTempFile;

/// Helper function to run one scenario against a memory section and a file
/// section seeded with the same bytes, asserting that both converge.
fn converge<F>(seed: &[u8], scenario: F) -> Result<()>
where
    F: Fn(&mut dyn Section) -> Result<()>,
{
    let mut memory = MemorySection::new("memory", seed.to_vec());
    scenario(&mut memory)?;

    let temp = NamedTempFile::new()?;
    std::fs::write(temp.path(), seed)?;
    let mut file = FileSection::open("file", temp.path())?;
    scenario(&mut file)?;

    assert_eq!(memory.size(), file.size(), "backends disagree on size");

    let len = memory.size();
    let mut from_memory = vec![0u8; len as usize];
    let mut from_file = vec![0u8; len as usize];
    memory.read_data(0, &mut from_memory, len)?;
    file.read_data(0, &mut from_file, len)?;
    assert_eq!(from_memory, from_file, "backends disagree on contents");

    Ok(())
}

#[test]
fn test_backends_agree_on_plain_writes() -> Result<()> {
    converge(&[0u8; 16], |section| section.write_bytes(3, b"pattern"))
}

#[test]
fn test_backends_agree_on_region_copies() -> Result<()> {
    converge(b"0123456789abcdef", |section| {
        // Pre-reading the source keeps the call valid for every backing.
        let mut staging = [0u8; 6];
        section.read_data(2, &mut staging, 6)?;
        section.write_data(2, 9, &mut staging, 6)
    })
}

#[test]
fn test_backends_agree_on_skipped_source_zero_fill() -> Result<()> {
    converge(b"xxxxxxxxxxxx", |section| {
        let mut zeroes = [0u8; 5];
        section.write_data(SKIP, 4, &mut zeroes, 5)
    })
}

#[test]
fn test_backends_agree_on_resize() -> Result<()> {
    // Growing zero-extends, shrinking truncates.
    converge(b"abcd", |section| section.resize(9))?;
    converge(b"abcdefgh", |section| section.resize(3))
}

#[test]
fn test_backends_agree_on_insert_and_remove() -> Result<()> {
    converge(b"header|payload", |section| {
        shift::insert(section, 7, 4)?;
        section.write_bytes(7, b"v2::")?;
        shift::remove(section, 0, 2)
    })
}

#[test]
fn test_backends_agree_on_overlapping_moves() -> Result<()> {
    converge(b"aabbccddeeff", |section| {
        shift::copy_within(section, 0, 4, 8)?;
        shift::copy_within(section, 6, 2, 4)
    })
}

#[test]
fn test_external_section_matches_memory() -> Result<()> {
    let seed = b"delegated bytes under test".to_vec();

    let mut memory = MemorySection::new("memory", seed.clone());

    // The callback store never resizes, so only size-preserving operations
    // run here.
    let store = Rc::new(RefCell::new(seed.clone()));
    let read_store = Rc::clone(&store);
    let write_store = Rc::clone(&store);
    let mut external = ExternalSection::new(
        "external",
        seed.len() as u64,
        move |address, buffer| {
            let store = read_store.borrow();
            let start = address as usize;
            buffer.copy_from_slice(&store[start..start + buffer.len()]);
        },
        move |address, bytes| {
            let mut store = write_store.borrow_mut();
            let start = address as usize;
            store[start..start + bytes.len()].copy_from_slice(bytes);
        },
    );

    for section in [&mut memory as &mut dyn Section, &mut external] {
        section.write_bytes(10, b"HOST")?;
        shift::copy_within(section, 10, 0, 4)?;
    }

    let len = memory.size();
    let mut from_memory = vec![0u8; len as usize];
    memory.read_data(0, &mut from_memory, len)?;
    assert_eq!(from_memory, *store.borrow());

    Ok(())
}

#[test]
fn test_file_changes_are_visible_on_disk() -> Result<()> {
    let temp = NamedTempFile::new()?;
    std::fs::write(temp.path(), b"....")?;

    let mut section = FileSection::open("file", temp.path())?;
    section.write_bytes(0, b"DATA")?;
    drop(section);

    assert_eq!(std::fs::read(temp.path())?, b"DATA");
    Ok(())
}

#[test]
fn test_out_of_bounds_reports_the_available_extent() -> Result<()> {
    let temp = NamedTempFile::new()?;
    std::fs::write(temp.path(), &[0u8; 10])?;
    let mut file = FileSection::open("file", temp.path())?;
    let mut memory = MemorySection::with_size("memory", 10);

    for section in [&mut memory as &mut dyn Section, &mut file] {
        let mut buf = [0u8; 8];
        match section.read_data(6, &mut buf, 8) {
            Err(Error::OutOfBounds {
                address,
                size,
                available,
            }) => {
                assert_eq!((address, size, available), (6, 8, 10));
            }
            other => panic!("expected an out of bounds error, got {other:?}"),
        }
    }

    Ok(())
}
