//! The builtin function library.
//!
//! These are the functions every evaluator is expected to find already
//! registered: raw memory access against the evaluation target and basic
//! string manipulation. Hosts call [`register_all`] once per registry and may
//! re-register any name afterwards to shadow a builtin.
//!
//! # Provided functions
//!
//! Under `std::mem` (all operate on the context's main section):
//!
//! - `size()` - extent of the main section in bytes
//! - `read_unsigned(address, size, endian = "little")` - zero-extended read
//!   of 1, 2, 4, 8 or 16 bytes
//! - `read_signed(address, size, endian = "little")` - sign-extended read of
//!   1, 2, 4, 8 or 16 bytes
//! - `read_string(address, size)` - raw byte read, decoded as UTF-8 with
//!   replacement characters
//! - `write_string(address, text)` - writes the UTF-8 bytes of `text`;
//!   dangerous, requires host permission
//!
//! Under `std::string` (all operate on character counts, not bytes):
//!
//! - `length(text)`
//! - `at(text, index)`
//! - `substr(text, start, count)` - `count` is clamped to the remainder of
//!   the string

use crate::context::EvalContext;
use crate::literal::Literal;
use crate::section::Section;
use crate::{Error, Result};

use super::registry::{FunctionRegistry, NamespacePath};
use super::{Function, ParameterCount};

/// Byte order accepted by the `std::mem` read functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Endian {
    Little,
    Big,
}

/// Register the complete builtin library into `registry`.
pub fn register_all(registry: &FunctionRegistry) {
    register_mem(registry);
    register_string(registry);
}

fn register_mem(registry: &FunctionRegistry) {
    let path = NamespacePath::new(["std", "mem"]);

    registry.register(
        &path,
        "size",
        Function::new(ParameterCount::none(), |ctx, _args| {
            let section = main_section(ctx)?;
            Ok(Some(Literal::Unsigned(u128::from(section.size()))))
        }),
    );

    registry.register(
        &path,
        "read_unsigned",
        Function::new(ParameterCount::between(2, 3), |ctx, args| {
            let address = to_address(&args[0])?;
            let size = to_read_size(&args[1])?;
            let endian = to_endian(&args[2])?;
            let raw = read_raw(ctx, address, size)?;
            Ok(Some(Literal::Unsigned(decode_unsigned(&raw, endian))))
        })
        .with_defaults(vec![Literal::String("little".to_string())]),
    );

    registry.register(
        &path,
        "read_signed",
        Function::new(ParameterCount::between(2, 3), |ctx, args| {
            let address = to_address(&args[0])?;
            let size = to_read_size(&args[1])?;
            let endian = to_endian(&args[2])?;
            let raw = read_raw(ctx, address, size)?;
            Ok(Some(Literal::Signed(decode_signed(&raw, endian))))
        })
        .with_defaults(vec![Literal::String("little".to_string())]),
    );

    registry.register(
        &path,
        "read_string",
        Function::new(ParameterCount::exactly(2), |ctx, args| {
            let address = to_address(&args[0])?;
            let size = to_length(&args[1])?;
            let raw = read_raw(ctx, address, size)?;
            Ok(Some(Literal::String(
                String::from_utf8_lossy(&raw).into_owned(),
            )))
        }),
    );

    registry.register(
        &path,
        "write_string",
        Function::new(ParameterCount::exactly(2), |ctx, args| {
            let address = to_address(&args[0])?;
            let bytes = args[1].as_str()?.as_bytes();
            let section = main_section(ctx)?;
            section.write_bytes(address, bytes)?;
            Ok(None)
        })
        .dangerous(),
    );
}

fn register_string(registry: &FunctionRegistry) {
    let path = NamespacePath::new(["std", "string"]);

    registry.register(
        &path,
        "length",
        Function::new(ParameterCount::exactly(1), |_ctx, args| {
            let text = args[0].as_str()?;
            Ok(Some(Literal::Unsigned(text.chars().count() as u128)))
        }),
    );

    registry.register(
        &path,
        "at",
        Function::new(ParameterCount::exactly(2), |_ctx, args| {
            let text = args[0].as_str()?;
            let index = to_length(&args[1])?;
            match text.chars().nth(index) {
                Some(ch) => Ok(Some(Literal::Char(ch))),
                None => Err(Error::OutOfBounds {
                    address: index as u64,
                    size: 1,
                    available: text.chars().count() as u64,
                }),
            }
        }),
    );

    registry.register(
        &path,
        "substr",
        Function::new(ParameterCount::exactly(3), |_ctx, args| {
            let text = args[0].as_str()?;
            let start = to_length(&args[1])?;
            let count = to_length(&args[2])?;
            let length = text.chars().count();
            if start > length {
                return Err(Error::OutOfBounds {
                    address: start as u64,
                    size: count as u64,
                    available: length as u64,
                });
            }
            let piece: String = text.chars().skip(start).take(count).collect();
            Ok(Some(Literal::String(piece)))
        }),
    );
}

fn main_section(ctx: &mut EvalContext) -> Result<&mut dyn Section> {
    ctx.main_section_mut()
        .ok_or_else(|| Error::Error("no section attached to the evaluation context".to_string()))
}

fn read_raw(ctx: &mut EvalContext, address: u64, size: usize) -> Result<Vec<u8>> {
    let section = main_section(ctx)?;

    // The requested length comes straight from the pattern program; check it
    // against the extent before sizing the staging buffer.
    let available = section.size();
    let Some(end) = address.checked_add(size as u64) else {
        return Err(Error::OutOfBounds {
            address,
            size: size as u64,
            available,
        });
    };
    if end > available {
        return Err(Error::OutOfBounds {
            address,
            size: size as u64,
            available,
        });
    }

    let mut raw = vec![0u8; size];
    section.read_data(address, &mut raw, size as u64)?;
    Ok(raw)
}

fn to_address(value: &Literal) -> Result<u64> {
    let wide = value.as_u128()?;
    u64::try_from(wide)
        .map_err(|_| type_error!("address {:#x} exceeds the addressable range", wide))
}

fn to_length(value: &Literal) -> Result<usize> {
    let wide = value.as_u128()?;
    usize::try_from(wide).map_err(|_| type_error!("length {} exceeds the addressable range", wide))
}

fn to_read_size(value: &Literal) -> Result<usize> {
    match value.as_u128()? {
        size @ (1 | 2 | 4 | 8 | 16) => Ok(size as usize),
        size => Err(type_error!(
            "unsupported read size {}, expected 1, 2, 4, 8 or 16",
            size
        )),
    }
}

fn to_endian(value: &Literal) -> Result<Endian> {
    match value.as_str()? {
        "little" => Ok(Endian::Little),
        "big" => Ok(Endian::Big),
        other => Err(type_error!(
            "unknown byte order '{}', expected 'little' or 'big'",
            other
        )),
    }
}

fn decode_unsigned(bytes: &[u8], endian: Endian) -> u128 {
    debug_assert!(bytes.len() <= 16);
    let mut value = 0u128;
    match endian {
        Endian::Little => {
            for &byte in bytes.iter().rev() {
                value = (value << 8) | u128::from(byte);
            }
        }
        Endian::Big => {
            for &byte in bytes {
                value = (value << 8) | u128::from(byte);
            }
        }
    }
    value
}

fn decode_signed(bytes: &[u8], endian: Endian) -> i128 {
    let value = decode_unsigned(bytes, endian) as i128;
    let shift = 128 - 8 * bytes.len() as u32;
    (value << shift) >> shift
}

#[cfg(test)]
mod tests {
    use super::*;

    fn environment(data: Vec<u8>) -> (FunctionRegistry, EvalContext) {
        let registry = FunctionRegistry::new();
        register_all(&registry);
        (registry, crate::test::context_with_memory(data))
    }

    fn call(
        registry: &FunctionRegistry,
        ctx: &mut EvalContext,
        name: &str,
        args: &[Literal],
    ) -> Result<Option<Literal>> {
        registry
            .get(name)
            .unwrap_or_else(|| panic!("builtin {name} not registered"))
            .invoke(ctx, args)
    }

    #[test]
    fn test_mem_size() {
        let (registry, mut ctx) = environment(vec![0u8; 24]);
        let result = call(&registry, &mut ctx, "std::mem::size", &[]).unwrap();
        assert_eq!(result, Some(Literal::Unsigned(24)));
    }

    #[test]
    fn test_read_unsigned_defaults_to_little_endian() {
        let (registry, mut ctx) = environment(vec![0x34, 0x12, 0xFF]);

        let args = [Literal::Unsigned(0), Literal::Unsigned(2)];
        let result = call(&registry, &mut ctx, "std::mem::read_unsigned", &args).unwrap();
        assert_eq!(result, Some(Literal::Unsigned(0x1234)));
    }

    #[test]
    fn test_read_unsigned_big_endian() {
        let (registry, mut ctx) = environment(vec![0x34, 0x12]);

        let args = [
            Literal::Unsigned(0),
            Literal::Unsigned(2),
            Literal::String("big".to_string()),
        ];
        let result = call(&registry, &mut ctx, "std::mem::read_unsigned", &args).unwrap();
        assert_eq!(result, Some(Literal::Unsigned(0x3412)));
    }

    #[test]
    fn test_read_signed_sign_extends() {
        let (registry, mut ctx) = environment(vec![0xFE, 0xFF, 0x7F]);

        let args = [Literal::Unsigned(0), Literal::Unsigned(2)];
        let result = call(&registry, &mut ctx, "std::mem::read_signed", &args).unwrap();
        assert_eq!(result, Some(Literal::Signed(-2)));

        let args = [Literal::Unsigned(2), Literal::Unsigned(1)];
        let result = call(&registry, &mut ctx, "std::mem::read_signed", &args).unwrap();
        assert_eq!(result, Some(Literal::Signed(0x7F)));
    }

    #[test]
    fn test_read_rejects_unsupported_size() {
        let (registry, mut ctx) = environment(vec![0u8; 8]);

        let args = [Literal::Unsigned(0), Literal::Unsigned(3)];
        let err = call(&registry, &mut ctx, "std::mem::read_unsigned", &args).unwrap_err();
        assert!(matches!(err, Error::TypeError(_)));
    }

    #[test]
    fn test_read_rejects_unknown_endian() {
        let (registry, mut ctx) = environment(vec![0u8; 8]);

        let args = [
            Literal::Unsigned(0),
            Literal::Unsigned(2),
            Literal::String("middle".to_string()),
        ];
        let err = call(&registry, &mut ctx, "std::mem::read_unsigned", &args).unwrap_err();
        assert!(matches!(err, Error::TypeError(_)));
    }

    #[test]
    fn test_read_past_the_end_is_out_of_bounds() {
        let (registry, mut ctx) = environment(vec![0u8; 4]);

        let args = [Literal::Unsigned(2), Literal::Unsigned(4)];
        let err = call(&registry, &mut ctx, "std::mem::read_unsigned", &args).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { address: 2, size: 4, available: 4 }));
    }

    #[test]
    fn test_read_string_rejects_an_oversized_length() {
        let (registry, mut ctx) = environment(vec![0u8; 8]);

        // A length near u64::MAX must fail the extent check up front, never
        // reach a buffer allocation.
        let args = [Literal::Unsigned(0), Literal::Unsigned(u64::MAX as u128)];
        let err = call(&registry, &mut ctx, "std::mem::read_string", &args).unwrap_err();
        assert!(matches!(
            err,
            Error::OutOfBounds { address: 0, size: u64::MAX, available: 8 }
        ));
    }

    #[test]
    fn test_read_string() {
        let (registry, mut ctx) = environment(b"hello world".to_vec());

        let args = [Literal::Unsigned(6), Literal::Unsigned(5)];
        let result = call(&registry, &mut ctx, "std::mem::read_string", &args).unwrap();
        assert_eq!(result, Some(Literal::String("world".to_string())));
    }

    #[test]
    fn test_write_string_is_gated_and_writes_when_permitted() {
        let (registry, mut ctx) = environment(vec![b'.'; 8]);

        let args = [
            Literal::Unsigned(2),
            Literal::String("ok".to_string()),
        ];
        let err = call(&registry, &mut ctx, "std::mem::write_string", &args).unwrap_err();
        assert!(matches!(err, Error::Permission));

        ctx.permit_dangerous();
        assert_eq!(
            call(&registry, &mut ctx, "std::mem::write_string", &args).unwrap(),
            None
        );

        let read = [Literal::Unsigned(0), Literal::Unsigned(8)];
        let result = call(&registry, &mut ctx, "std::mem::read_string", &read).unwrap();
        assert_eq!(result, Some(Literal::String("..ok....".to_string())));
    }

    #[test]
    fn test_string_length_counts_characters() {
        let (registry, mut ctx) = environment(Vec::new());

        let args = [Literal::String("héllo".to_string())];
        let result = call(&registry, &mut ctx, "std::string::length", &args).unwrap();
        assert_eq!(result, Some(Literal::Unsigned(5)));
    }

    #[test]
    fn test_string_at() {
        let (registry, mut ctx) = environment(Vec::new());

        let args = [Literal::String("héllo".to_string()), Literal::Unsigned(1)];
        let result = call(&registry, &mut ctx, "std::string::at", &args).unwrap();
        assert_eq!(result, Some(Literal::Char('é')));

        let args = [Literal::String("héllo".to_string()), Literal::Unsigned(5)];
        let err = call(&registry, &mut ctx, "std::string::at", &args).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { address: 5, available: 5, .. }));
    }

    #[test]
    fn test_string_substr_clamps_count() {
        let (registry, mut ctx) = environment(Vec::new());

        let args = [
            Literal::String("pattern".to_string()),
            Literal::Unsigned(3),
            Literal::Unsigned(100),
        ];
        let result = call(&registry, &mut ctx, "std::string::substr", &args).unwrap();
        assert_eq!(result, Some(Literal::String("tern".to_string())));

        let args = [
            Literal::String("pattern".to_string()),
            Literal::Unsigned(8),
            Literal::Unsigned(1),
        ];
        let err = call(&registry, &mut ctx, "std::string::substr", &args).unwrap_err();
        assert!(matches!(err, Error::OutOfBounds { address: 8, .. }));
    }

    #[test]
    fn test_mem_functions_need_an_attached_section() {
        let registry = FunctionRegistry::new();
        register_all(&registry);
        let mut ctx = EvalContext::new();

        let err = call(&registry, &mut ctx, "std::mem::size", &[]).unwrap_err();
        assert!(matches!(err, Error::Error(_)));
    }
}
