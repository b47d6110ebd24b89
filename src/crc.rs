//! Systematic CRC over an arbitrary generator polynomial.
//!
//! The codeword layout is `payload ‖ remainder`, where the remainder comes
//! from binary long division (XOR in place of subtraction, quotient
//! discarded) of the zero-extended payload by the key. The key is a plain
//! bit pattern of any length with a leading 1, so a session can pick its own
//! polynomial without touching this module.

use bitvec::prelude::*;

/// Modulo-2 long division, returning the remainder.
///
/// `divisor` must be no longer than `dividend` and must lead with a 1 bit;
/// the callers check both. The remainder is one bit shorter than the
/// divisor.
fn mod2div(dividend: &BitSlice<u8, Msb0>, divisor: &BitSlice<u8, Msb0>) -> BitVec<u8, Msb0> {
    let pick = divisor.len();
    let mut tmp: BitVec<u8, Msb0> = dividend[..pick].to_bitvec();

    let mut pos = pick;
    while pos < dividend.len() {
        if tmp[0] {
            for i in 0..pick {
                let bit = tmp[i] ^ divisor[i];
                tmp.set(i, bit);
            }
        }
        // leading bit of the step is now 0 either way; shift it out and
        // pull the next dividend bit down
        tmp.remove(0);
        tmp.push(dividend[pos]);
        pos += 1;
    }

    if tmp[0] {
        for i in 0..pick {
            let bit = tmp[i] ^ divisor[i];
            tmp.set(i, bit);
        }
    }
    tmp.remove(0);
    tmp
}

/// Check key/dividend preconditions shared by [`encode`] and [`check`].
fn validate_key(key: &BitSlice<u8, Msb0>, dividend_len: usize) -> Result<(), String> {
    if key.len() < 2 {
        return Err(format!("CRC key needs at least 2 bits, got {}", key.len()));
    }
    if !key[0] {
        return Err("CRC key must have a leading 1 bit".to_string());
    }
    if key.len() > dividend_len {
        return Err(format!(
            "CRC key ({} bits) longer than the bit sequence it divides ({} bits)",
            key.len(),
            dividend_len
        ));
    }
    Ok(())
}

/// Append the CRC parity tail to `payload`.
///
/// Returns a codeword of length `payload.len() + key.len() - 1`. An empty
/// payload is rejected rather than producing a parity-only codeword.
pub fn encode(
    payload: &BitSlice<u8, Msb0>,
    key: &BitSlice<u8, Msb0>,
) -> Result<BitVec<u8, Msb0>, String> {
    if payload.is_empty() {
        return Err("cannot CRC-encode an empty payload".to_string());
    }
    validate_key(key, payload.len() + key.len() - 1)?;

    let mut dividend: BitVec<u8, Msb0> = payload.to_bitvec();
    dividend.resize(payload.len() + key.len() - 1, false);

    let remainder = mod2div(&dividend, key);

    let mut codeword: BitVec<u8, Msb0> = payload.to_bitvec();
    codeword.extend_from_bitslice(&remainder);
    Ok(codeword)
}

/// Re-run the division over a full codeword.
///
/// Returns `Ok(true)` when the remainder is all zero.
pub fn check(codeword: &BitSlice<u8, Msb0>, key: &BitSlice<u8, Msb0>) -> Result<bool, String> {
    if codeword.is_empty() {
        return Err("cannot CRC-check an empty codeword".to_string());
    }
    validate_key(key, codeword.len())?;

    let remainder = mod2div(codeword, key);
    Ok(remainder.not_any())
}
