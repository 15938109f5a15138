//! UTF-8 → UTF-32
//!
//! Decoding is table driven: every byte of a sequence is summed into an
//! accumulator that is shifted six bits per trailing byte, and the markers
//! carried along are removed with one subtraction from
//! [`OFFSETS_FROM_UTF8`]. [`decode`] trusts the trailing bytes to carry the
//! `10xxxxxx` prefix and accepts the 5 and 6 byte leads of the table, which
//! may land on any value, small ones included; [`decode_strict`] rejects both.

use crate::error::{Error, Result};
use crate::tables::{
    MAX_LEGAL_UTF32, OFFSETS_FROM_UTF8, Utf32, is_continuation_byte, is_surrogate, trailing_bytes,
};

/// Bytes checked at once by the ASCII fast path.
pub(crate) const ASCII_BLOCK: usize = 8;

const FAST_PATH: bool = !cfg!(feature = "disable-ascii-fast-path");
const ASCII_MASK: u64 = 0x8080_8080_8080_8080;

// ========================================================================== //
//                               Single character                             //
// ========================================================================== //

#[inline(always)]
fn decode_at(input: &[u8], start: usize, strict: bool) -> Result<(Utf32, usize)> {
    let lead = *input.get(start).ok_or(Error::InvalidSource)?;
    let extra = trailing_bytes(lead);
    let last = start + extra;

    // truncated sequence
    if last >= input.len() {
        return Err(Error::InvalidSource);
    }

    if strict
        && (is_continuation_byte(lead)
            || extra > 3
            || !input[start + 1..=last].iter().all(|&b| is_continuation_byte(b)))
    {
        return Err(Error::InvalidSource);
    }

    let mut ch: Utf32 = 0;
    for &byte in &input[start..last] {
        ch = ch.wrapping_add(byte as Utf32) << 6;
    }
    ch = ch
        .wrapping_add(input[last] as Utf32)
        .wrapping_sub(OFFSETS_FROM_UTF8[extra]);

    if ch > MAX_LEGAL_UTF32 || is_surrogate(ch) {
        return Err(Error::InvalidSource);
    }

    Ok((ch, last + 1))
}

/// Decodes the character starting at `start`.
///
/// Returns the code point and the index of the next character. Fails when
/// `start` is out of bounds, when the sequence is truncated, or when it
/// decodes to a surrogate or a value above `U+10FFFF`.
#[inline]
pub fn decode_char(input: &[u8], start: usize) -> Result<(Utf32, usize)> {
    decode_at(input, start, false)
}

/// Like [`decode_char`], but also rejects trailing bytes without the
/// `10xxxxxx` prefix, a `10xxxxxx` byte in lead position, and the 5 and 6
/// byte leads `0xF8..=0xFF`.
#[inline]
pub fn decode_char_strict(input: &[u8], start: usize) -> Result<(Utf32, usize)> {
    decode_at(input, start, true)
}

// ========================================================================== //
//                                  Sequences                                 //
// ========================================================================== //

#[inline(always)]
fn decode_with(input: &[u8], strict: bool, mut emit: impl FnMut(Utf32)) -> Result<()> {
    let mut i = 0;

    while i < input.len() {
        if FAST_PATH && i + ASCII_BLOCK <= input.len() {
            let mut word = [0u8; ASCII_BLOCK];
            word.copy_from_slice(&input[i..i + ASCII_BLOCK]);
            if u64::from_ne_bytes(word) & ASCII_MASK == 0 {
                word.iter().for_each(|&b| emit(b as Utf32));
                i += ASCII_BLOCK;
                continue;
            }
        }

        let (ch, next) = decode_at(input, i, strict)?;
        emit(ch);
        i = next;
    }

    Ok(())
}

/// Converts UTF-8 bytes to UTF-32.
///
/// The whole call fails on the first truncated or out-of-range sequence; no
/// partial output is returned.
///
/// Malformed trailing bytes are not detected and may decode to a wrong but
/// legal-looking code point, and overlong 5 and 6 byte forms may decode to
/// any value, small ones included. Use [`decode_strict`] to reject them.
pub fn decode(input: &[u8]) -> Result<Vec<Utf32>> {
    let mut out = Vec::with_capacity(input.len());
    decode_with(input, false, |ch| out.push(ch))?;
    Ok(out)
}

/// Converts UTF-8 bytes to UTF-32, rejecting malformed trailing bytes and
/// the 5 and 6 byte leads.
///
/// Output for well-formed input is identical to [`decode`].
pub fn decode_strict(input: &[u8]) -> Result<Vec<Utf32>> {
    let mut out = Vec::with_capacity(input.len());
    decode_with(input, true, |ch| out.push(ch))?;
    Ok(out)
}

/// Converts a `str` to UTF-32; see [`decode`].
#[inline]
pub fn decode_str(input: &str) -> Result<Vec<Utf32>> {
    decode(input.as_bytes())
}

/// Appends the decoded code points to `out`.
///
/// On failure `out` is truncated back to its original length.
pub fn decode_into(input: &[u8], out: &mut Vec<Utf32>) -> Result<()> {
    let start = out.len();
    out.reserve(input.len());

    let res = decode_with(input, false, |ch| out.push(ch));
    if res.is_err() {
        out.truncate(start);
    }
    res
}

/// Converts UTF-8 bytes to UTF-32 inside a `bumpalo` arena.
pub fn decode_bump<'a>(input: &[u8], bump: &'a bumpalo::Bump) -> Result<&'a [Utf32]> {
    let mut out = bumpalo::collections::Vec::with_capacity_in(input.len(), bump);
    decode_with(input, false, |ch| out.push(ch))?;
    Ok(out.into_bump_slice())
}

// ========================================================================== //
//                                   Tests                                    //
// ========================================================================== //
