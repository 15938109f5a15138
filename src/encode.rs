//! UTF-32 → UTF-8

use crate::error::{Error, Result};
use crate::tables::{BYTE_MARK, BYTE_MASK, FIRST_BYTE_MARK, MAX_LEGAL_UTF32, Utf32, is_surrogate};

/// Code points checked at once by the ASCII fast path.
pub(crate) const ASCII_BLOCK: usize = 8;

const FAST_PATH: bool = !cfg!(feature = "disable-ascii-fast-path");

// ========================================================================== //
//                              Single code point                             //
// ========================================================================== //

/// Returns how many UTF-8 bytes `ch` needs.
///
/// Fails with [`Error::InvalidSource`] for surrogates and for anything above
/// `U+10FFFF`, which is also what keeps 5 and 6 byte sequences out of the
/// encoder's output.
#[inline]
pub fn encoded_len(ch: Utf32) -> Result<usize> {
    if is_surrogate(ch) {
        return Err(Error::InvalidSource);
    }
    match ch {
        0x0000..=0x007F => Ok(1),
        0x0080..=0x07FF => Ok(2),
        0x0800..=0xFFFF => Ok(3),
        0x1_0000..=MAX_LEGAL_UTF32 => Ok(4),
        _ => Err(Error::InvalidSource),
    }
}

/// Encodes one code point into a fixed buffer.
///
/// Returns the buffer and the number of bytes used; the lead byte is always at
/// index 0.
#[inline]
pub fn encode_char(mut ch: Utf32) -> Result<([u8; 4], usize)> {
    let len = encoded_len(ch)?;
    let mut buf = [0u8; 4];

    // Continuation bytes are filled from the back, six bits each.
    for slot in buf[1..len].iter_mut().rev() {
        *slot = ((ch | BYTE_MARK) & BYTE_MASK) as u8;
        ch >>= 6;
    }
    buf[0] = (ch | FIRST_BYTE_MARK[len] as Utf32) as u8;

    Ok((buf, len))
}

// ========================================================================== //
//                                 Sequences                                  //
// ========================================================================== //

#[inline(always)]
fn encode_with(input: &[Utf32], mut emit: impl FnMut(&[u8])) -> Result<()> {
    let mut i = 0;

    if FAST_PATH {
        while i + ASCII_BLOCK <= input.len() {
            let block = &input[i..i + ASCII_BLOCK];
            if block.iter().all(|&cp| cp < 0x80) {
                let bytes: [u8; ASCII_BLOCK] = std::array::from_fn(|j| block[j] as u8);
                emit(&bytes);
            } else {
                for &cp in block {
                    let (buf, len) = encode_char(cp)?;
                    emit(&buf[..len]);
                }
            }
            i += ASCII_BLOCK;
        }
    }

    for &cp in &input[i..] {
        let (buf, len) = encode_char(cp)?;
        emit(&buf[..len]);
    }

    Ok(())
}

/// Converts a UTF-32 slice to UTF-8.
///
/// The whole call fails on the first code point that is a surrogate or lies
/// above `U+10FFFF`; no partial output is returned.
pub fn encode(input: &[Utf32]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(input.len() * 4);
    encode_with(input, |bytes| out.extend_from_slice(bytes))?;
    Ok(out)
}

/// Appends the UTF-8 encoding of `input` to `out`.
///
/// On failure `out` is truncated back to its original length.
pub fn encode_into(input: &[Utf32], out: &mut Vec<u8>) -> Result<()> {
    let start = out.len();
    out.reserve(input.len() * 4);

    let res = encode_with(input, |bytes| out.extend_from_slice(bytes));
    if res.is_err() {
        out.truncate(start);
    }
    res
}

/// Converts a UTF-32 slice to a `String`.
pub fn encode_to_string(input: &[Utf32]) -> Result<String> {
    let bytes = encode(input)?;
    // SAFETY: the encoder emits shortest-form sequences for non-surrogate
    // values up to U+10FFFF only, which is exactly well-formed UTF-8.
    Ok(unsafe { String::from_utf8_unchecked(bytes) })
}

/// Converts a UTF-32 slice to UTF-8 inside a `bumpalo` arena.
///
/// On failure the partially written bytes stay in the arena until it is reset.
pub fn encode_bump<'a>(input: &[Utf32], bump: &'a bumpalo::Bump) -> Result<&'a [u8]> {
    let mut out = bumpalo::collections::Vec::with_capacity_in(input.len() * 4, bump);
    encode_with(input, |bytes| out.extend_from_slice(bytes))?;
    Ok(out.into_bump_slice())
}

// ========================================================================== //
//                                   Tests                                    //
// ========================================================================== //
