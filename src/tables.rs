//! Lookup tables and bound constants shared by the encoder and decoder.
//!
//! Everything here is `const`: the tables are baked into the binary and never
//! mutated, so both directions can run from any number of threads at once.

/// A single UTF-32 code unit.
pub type Utf32 = u32;

/* ===================================================================== */
/*                           Bound constants                             */
/* ===================================================================== */

/// First value of the UTF-16 surrogate range (high surrogates).
pub const SURROGATE_HIGH_START: Utf32 = 0xD800;
/// Last value of the UTF-16 surrogate range (low surrogates).
pub const SURROGATE_LOW_END: Utf32 = 0xDFFF;
/// Largest code point representable in legal UTF-32.
pub const MAX_LEGAL_UTF32: Utf32 = 0x0010_FFFF;

pub(crate) const BYTE_MASK: Utf32 = 0xBF;
pub(crate) const BYTE_MARK: Utf32 = 0x80;

/* ===================================================================== */
/*                            Lookup tables                              */
/* ===================================================================== */

/// Number of trailing bytes that follow a lead byte, indexed by that byte.
///
/// Legal UTF-8 never uses the 4 and 5 entries; they describe the 5 and 6 byte
/// forms of the pre-2003 encoding and are only reachable by decoding.
pub const TRAILING_BYTES_FOR_UTF8: [u8; 256] = [
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1,
    2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 2, 3, 3, 3, 3, 3, 3, 3, 3, 4, 4, 4, 4, 5, 5, 5, 5,
];

/// Subtracted from the accumulated value after decoding a sequence with the
/// given number of trailing bytes. Cancels the lead-byte marker and the `10`
/// prefixes that the left shifts carried into the accumulator.
pub const OFFSETS_FROM_UTF8: [Utf32; 6] = [
    0x0000_0000,
    0x0000_3080,
    0x000E_2080,
    0x03C8_2080,
    0xFA08_2080,
    0x8208_2080,
];

/// OR-ed into the lead byte, indexed by the total length of the sequence.
pub const FIRST_BYTE_MARK: [u8; 7] = [0x00, 0x00, 0xC0, 0xE0, 0xF0, 0xF8, 0xFC];

/* ===================================================================== */
/*                               Helpers                                 */
/* ===================================================================== */

#[inline(always)]
pub(crate) const fn is_surrogate(ch: Utf32) -> bool {
    ch >= SURROGATE_HIGH_START && ch <= SURROGATE_LOW_END
}

#[inline(always)]
pub(crate) const fn is_continuation_byte(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}

#[inline(always)]
pub(crate) const fn trailing_bytes(lead: u8) -> usize {
    TRAILING_BYTES_FOR_UTF8[lead as usize] as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_bytes_by_lead_class() {
        assert_eq!(trailing_bytes(0x00), 0);
        assert_eq!(trailing_bytes(0x7F), 0);
        // continuation bytes read as single-byte leads
        assert_eq!(trailing_bytes(0x80), 0);
        assert_eq!(trailing_bytes(0xBF), 0);
        assert_eq!(trailing_bytes(0xC0), 1);
        assert_eq!(trailing_bytes(0xDF), 1);
        assert_eq!(trailing_bytes(0xE0), 2);
        assert_eq!(trailing_bytes(0xEF), 2);
        assert_eq!(trailing_bytes(0xF0), 3);
        assert_eq!(trailing_bytes(0xF7), 3);
        assert_eq!(trailing_bytes(0xF8), 4);
        assert_eq!(trailing_bytes(0xFC), 5);
        assert_eq!(trailing_bytes(0xFF), 5);
    }

    #[test]
    fn offsets_cancel_markers() {
        // 'é' = C3 A9
        let acc = ((0xC3u32 << 6) + 0xA9).wrapping_sub(OFFSETS_FROM_UTF8[1]);
        assert_eq!(acc, 0xE9);
        // U+0800 = E0 A0 80
        let acc = ((((0xE0u32 << 6) + 0xA0) << 6) + 0x80).wrapping_sub(OFFSETS_FROM_UTF8[2]);
        assert_eq!(acc, 0x800);
    }

    #[test]
    fn surrogate_bounds() {
        assert!(!is_surrogate(0xD7FF));
        assert!(is_surrogate(SURROGATE_HIGH_START));
        assert!(is_surrogate(0xDBFF));
        assert!(is_surrogate(0xDC00));
        assert!(is_surrogate(SURROGATE_LOW_END));
        assert!(!is_surrogate(0xE000));
    }

    #[test]
    fn continuation_byte_pattern() {
        assert!(is_continuation_byte(0x80));
        assert!(is_continuation_byte(0xBF));
        assert!(!is_continuation_byte(0x7F));
        assert!(!is_continuation_byte(0xC0));
    }
}
