//! Conversion between UTF-8 byte sequences and UTF-32 code points.
//!
//! [`encode`] and [`decode`] are the two directions; both are pure and fail
//! atomically with [`Error::InvalidSource`] on the first illegal value. The
//! [`batch`] module runs many independent conversions on a thread pool, and the
//! `python` feature exposes everything as an extension module.

macro_rules! debug_println {
    ($($arg:tt)*) => {
        if cfg!(feature = "debug-utf32-internal") && std::env::var("DEBUG").is_ok() {
            eprintln!($($arg)*);
        }
    };
}

pub mod batch;
pub mod decode;
pub mod encode;
pub mod error;
pub mod tables;

#[cfg(feature = "python")]
mod python;

pub use decode::{
    decode, decode_bump, decode_char, decode_char_strict, decode_into, decode_str, decode_strict,
};
pub use encode::{encode, encode_bump, encode_char, encode_into, encode_to_string, encoded_len};
pub use error::{Error, Result};
pub use tables::Utf32;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn legal_code_point() -> impl Strategy<Value = u32> {
        prop_oneof![0u32..0xD800, 0xE000u32..=0x10FFFF]
    }

    proptest! {
        #[test]
        fn round_trip(input in prop::collection::vec(legal_code_point(), 0..64)) {
            let bytes = encode(&input)?;
            prop_assert_eq!(decode(&bytes)?, input.clone());
            prop_assert_eq!(decode_strict(&bytes)?, input);
        }

        #[test]
        fn agrees_with_std(s in any::<String>()) {
            let input: Vec<u32> = s.chars().map(|c| c as u32).collect();
            prop_assert_eq!(encode(&input)?, s.as_bytes());
            prop_assert_eq!(decode_str(&s)?, input);
        }

        #[test]
        fn strict_only_narrows(bytes in prop::collection::vec(any::<u8>(), 0..32)) {
            // whatever strict accepts, permissive accepts identically
            if let Ok(strict) = decode_strict(&bytes) {
                prop_assert_eq!(decode(&bytes)?, strict);
            }
        }

        #[test]
        fn strict_matches_std_validation(bytes in prop::collection::vec(any::<u8>(), 0..32)) {
            // std also rejects overlong forms, which the table arithmetic lets through
            if let Ok(s) = std::str::from_utf8(&bytes) {
                let expected: Vec<u32> = s.chars().map(|c| c as u32).collect();
                prop_assert_eq!(decode_strict(&bytes)?, expected);
            }
        }

        #[test]
        fn never_panics(bytes in prop::collection::vec(any::<u8>(), 0..32)) {
            let _ = decode(&bytes);
            let _ = decode_strict(&bytes);
        }

        #[test]
        fn encode_rejects_out_of_range(cp in 0x110000u32..=u32::MAX) {
            prop_assert_eq!(encode(&[cp]), Err(Error::InvalidSource));
        }

        #[test]
        fn encode_rejects_surrogates(cp in 0xD800u32..=0xDFFF) {
            prop_assert_eq!(encode(&[0x41, cp]), Err(Error::InvalidSource));
        }
    }

    #[test]
    fn round_trip_fixtures() {
        let cases = [
            ("hello world", 11, 11),
            ("éééééЈ", 12, 6),
            ("a", 1, 1),
            ("Ј", 2, 1),
            ("झ", 3, 1),
            ("𒎊", 4, 1),
        ];
        for (text, utf8_len, utf32_len) in cases {
            let utf32 = decode_str(text).unwrap();
            let utf8 = encode_to_string(&utf32).unwrap();
            assert_eq!(utf8, text);
            assert_eq!(utf8.len(), utf8_len);
            assert_eq!(utf32.len(), utf32_len);
        }
    }

    #[test]
    fn error_message() {
        assert_eq!(Error::InvalidSource.to_string(), "illegal source");
    }
}
