//! Modular arithmetic helpers over [`BigUint`].
//!
//! Both SM2 moduli (the field prime `p` and the group order `n`) are prime,
//! so inversion uses Fermat's little theorem and the base-field square root
//! uses the `p ≡ 3 (mod 4)` shortcut.

use crate::curve;
use num_bigint::BigUint;

/// `(a + b) mod m`. Inputs need not be reduced.
pub(crate) fn add(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a + b) % m
}

/// `(a - b) mod m`. Inputs must already be reduced below `m`.
pub(crate) fn sub(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    ((a + m) - b) % m
}

/// `(a * b) mod m`.
pub(crate) fn mul(a: &BigUint, b: &BigUint, m: &BigUint) -> BigUint {
    (a * b) % m
}

/// `a⁻¹ mod m` for prime `m`, via `a^(m-2)`.
///
/// Returns zero for `a ≡ 0`; callers guard against inverting zero.
pub(crate) fn inv(a: &BigUint, m: &BigUint) -> BigUint {
    a.modpow(&(m - 2u8), m)
}

/// Square root of `a` modulo the field prime `p`, if one exists.
///
/// Computes `a^((p+1)/4)` and checks the candidate by squaring. The other
/// root is `p - sqrt`; the caller selects by parity.
pub(crate) fn sqrt(a: &BigUint) -> Option<BigUint> {
    let p = &*curve::MODULUS;
    let candidate = a.modpow(&((p + 1u8) >> 2), p);
    if mul(&candidate, &candidate, p) == a % p {
        Some(candidate)
    } else {
        None
    }
}

/// Serialize to fixed-width big-endian bytes.
///
/// `x` must fit in `len` bytes; every field element and scalar in this
/// crate fits in [`curve::FIELD_BYTES_SIZE`].
pub(crate) fn to_padded_bytes(x: &BigUint, len: usize) -> Vec<u8> {
    let bytes = x.to_bytes_be();
    let mut out = vec![0u8; len];
    out[len - bytes.len()..].copy_from_slice(&bytes);
    out
}

/// Fixed-width 32-byte big-endian encoding of a field element or scalar.
pub(crate) fn to_element_bytes(x: &BigUint) -> [u8; curve::FIELD_BYTES_SIZE] {
    let mut out = [0u8; curve::FIELD_BYTES_SIZE];
    out.copy_from_slice(&to_padded_bytes(x, curve::FIELD_BYTES_SIZE));
    out
}

/// True iff `x` is a canonical field element, i.e. `x < p`.
pub(crate) fn is_canonical(x: &BigUint) -> bool {
    x < &*curve::MODULUS
}
