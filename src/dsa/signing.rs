//! Support for SM2DSA signing.
//!
//! ## Algorithm
//!
//! ```text
//! A1: set M~=ZA || M
//! A2: calculate e=Hv(M~)
//! A3: pick a random number k in [1, n-1] via a random number generator
//! A4: calculate the elliptic curve point (x1, y1)=[k]G
//! A5: calculate r=(e+x1) modn, return to A3 if r=0 or r+k=n
//! A6: calculate s=((1+dA)^(-1)*(k-r*dA)) modn, return to A3 if s=0
//! A7: the digital signature of M is (r, s)
//! ```

use super::{Signature, VerifyingKey};
use crate::{
    arithmetic::{field, ProjectivePoint},
    curve,
    distid::DistId,
    sm3::{Digest, Sm3},
    SecretKey,
};
use core::fmt::{self, Debug};
use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::OsRng;
use signature::{
    hazmat::{PrehashSigner, RandomizedPrehashSigner},
    rand_core::CryptoRngCore,
    Error, KeypairRef, RandomizedSigner, Result, Signer,
};

/// Retry budget for the nonce loop. The retry conditions each have
/// probability on the order of 2⁻²⁵⁶, so more than a couple of iterations
/// already indicates a broken RNG.
const SIGN_ATTEMPTS: usize = 64;

/// SM2DSA secret key used for signing messages and producing signatures.
///
/// ## Usage
///
/// The [`signature`] crate defines the following traits which are the
/// primary API for signing:
///
/// - [`Signer`]: sign a message using this key (`Z_A` preamble applied,
///   nonce drawn from the operating system RNG)
/// - [`RandomizedSigner`]: the same with a caller-supplied RNG
/// - [`PrehashSigner`]: sign the low-level raw output bytes of a message
///   digest
///
/// The `*_raw` inherent methods skip the `Z_A` preamble and interoperate
/// only with peers that also skip it.
#[derive(Clone)]
pub struct SigningKey {
    /// Secret scalar.
    secret_key: SecretKey,

    /// Verifying key for this signing key.
    verifying_key: VerifyingKey,
}

impl SigningKey {
    /// Create signing key from a signer's distinguishing identifier and
    /// secret key.
    pub fn new(distid: &DistId, secret_key: &SecretKey) -> crate::Result<Self> {
        let verifying_key = VerifyingKey::new(distid, secret_key.public_key())?;
        Ok(Self {
            secret_key: secret_key.clone(),
            verifying_key,
        })
    }

    /// Create a signing key from its two halves, checking that they belong
    /// together (`pub = [pri]·G`).
    pub fn from_parts(
        distid: &DistId,
        secret_key: &SecretKey,
        public_key: &crate::PublicKey,
    ) -> crate::Result<Self> {
        if &secret_key.public_key() != public_key {
            return Err(crate::Error::InvalidKey);
        }
        Self::new(distid, secret_key)
    }

    /// Parse signing key from a big endian-encoded byte slice containing a
    /// secret scalar value.
    pub fn from_slice(distid: &DistId, slice: &[u8]) -> crate::Result<Self> {
        Self::new(distid, &SecretKey::from_slice(slice)?)
    }

    /// Parse signing key from a hex-encoded secret scalar.
    pub fn from_hex(distid: &DistId, hex: &str) -> crate::Result<Self> {
        Self::new(distid, &SecretKey::from_hex(hex)?)
    }

    /// Serialize as bytes.
    pub fn to_bytes(&self) -> [u8; curve::FIELD_BYTES_SIZE] {
        self.secret_key.to_bytes()
    }

    /// Borrow the inner [`SecretKey`].
    pub fn as_secret_key(&self) -> &SecretKey {
        &self.secret_key
    }

    /// Get the [`VerifyingKey`] which corresponds to this [`SigningKey`].
    pub fn verifying_key(&self) -> &VerifyingKey {
        &self.verifying_key
    }

    /// Get the distinguishing identifier for this key.
    pub fn distid(&self) -> &DistId {
        self.verifying_key.distid()
    }

    /// Sign a message without the `Z_A` preamble: `e = SM3(msg)`.
    ///
    /// Uses the operating system RNG for the nonce.
    pub fn sign_raw(&self, msg: &[u8]) -> Result<Signature> {
        self.sign_raw_with_rng(&mut OsRng, msg)
    }

    /// Sign a message without the `Z_A` preamble using the given RNG.
    pub fn sign_raw_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        msg: &[u8],
    ) -> Result<Signature> {
        self.sign_prehash_with_rng(rng, &Sm3::digest(msg))
    }
}

//
// `*Signer` trait impls
//

impl PrehashSigner<Signature> for SigningKey {
    fn sign_prehash(&self, prehash: &[u8]) -> Result<Signature> {
        self.sign_prehash_with_rng(&mut OsRng, prehash)
    }
}

impl RandomizedPrehashSigner<Signature> for SigningKey {
    fn sign_prehash_with_rng(
        &self,
        rng: &mut impl CryptoRngCore,
        prehash: &[u8],
    ) -> Result<Signature> {
        sign_prehash(self.secret_key.as_biguint(), prehash, rng)
    }
}

impl RandomizedSigner<Signature> for SigningKey {
    fn try_sign_with_rng(&self, rng: &mut impl CryptoRngCore, msg: &[u8]) -> Result<Signature> {
        // A1: set M~=ZA || M
        let hash = self.verifying_key.hash_msg(msg);
        self.sign_prehash_with_rng(rng, &hash)
    }
}

impl Signer<Signature> for SigningKey {
    fn try_sign(&self, msg: &[u8]) -> Result<Signature> {
        self.try_sign_with_rng(&mut OsRng, msg)
    }
}

//
// Other trait impls
//

impl AsRef<VerifyingKey> for SigningKey {
    fn as_ref(&self) -> &VerifyingKey {
        &self.verifying_key
    }
}

impl Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningKey")
            .field("verifying_key", &self.verifying_key)
            .finish_non_exhaustive()
    }
}

impl KeypairRef for SigningKey {
    type VerifyingKey = VerifyingKey;
}

/// Compute a signature over a 32-byte message digest, drawing nonces from
/// `rng` until the retry conditions clear.
fn sign_prehash(
    secret_scalar: &BigUint,
    prehash: &[u8],
    rng: &mut impl CryptoRngCore,
) -> Result<Signature> {
    if prehash.len() != curve::FIELD_BYTES_SIZE {
        return Err(Error::new());
    }

    // A2: calculate e=Hv(M~)
    let e = BigUint::from_bytes_be(prehash) % &*curve::ORDER;

    for _ in 0..SIGN_ATTEMPTS {
        // A3: pick a random number k in [1, n-1]
        let k = random_scalar(rng);
        if let Some(signature) = sign_with_nonce(secret_scalar, &e, &k) {
            return Ok(signature);
        }
    }

    Err(Error::new())
}

/// One iteration of the signing loop: steps A4-A7 for a fixed nonce.
///
/// Returns `None` when a retry condition fires (`r = 0`, `r + k = n` or
/// `s = 0`).
fn sign_with_nonce(d: &BigUint, e: &BigUint, k: &BigUint) -> Option<Signature> {
    let n = &*curve::ORDER;

    // A4: calculate the elliptic curve point (x1, y1)=[k]G
    let point = ProjectivePoint::mul_by_generator(k).to_affine()?;

    // A5: calculate r=(e+x1) modn, return to A3 if r=0 or r+k=n
    let r = field::add(e, &(point.x() % n), n);
    if r.is_zero() || &r + k == *n {
        return None;
    }

    // A6: calculate s=((1+dA)^(-1)*(k-r*dA)) modn, return to A3 if s=0
    let d_plus_1_inv = field::inv(&field::add(d, &BigUint::from(1u8), n), n);
    let k_minus_rd = field::sub(&(k % n), &field::mul(&r, d, n), n);
    let s = field::mul(&d_plus_1_inv, &k_minus_rd, n);
    if s.is_zero() {
        return None;
    }

    // A7: the digital signature of M is (r, s)
    Signature::from_scalars(r, s).ok()
}

/// Rejection-sample a scalar in `[1, n-1]`.
fn random_scalar(rng: &mut impl CryptoRngCore) -> BigUint {
    loop {
        let mut bytes = [0u8; curve::FIELD_BYTES_SIZE];
        rng.fill_bytes(&mut bytes);
        let k = BigUint::from_bytes_be(&bytes);
        if !k.is_zero() && k < *curve::ORDER {
            return k;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distid::DEFAULT_DIST_ID;
    use hex_literal::hex;

    /// GB/T 32918.2-2016 appendix A.2: signing `"message digest"` with the
    /// standard key and fixed nonce must reproduce the published `(r, s)`.
    #[test]
    fn standard_vector_with_fixed_nonce() {
        let signing_key = SigningKey::from_slice(
            DEFAULT_DIST_ID,
            &hex!("3945208f7b2144b13f36e38ac6d39f95889393692860b51a42fb81ef4df7c5b8"),
        )
        .unwrap();

        let digest = signing_key.verifying_key().hash_msg(b"message digest");
        assert_eq!(
            digest[..],
            hex!("f0b43e94ba45accaace692ed534382eb17e6ab5a19ce7b31f4486fdfc0d28640")[..],
        );

        let e = BigUint::from_bytes_be(&digest) % &*curve::ORDER;
        let k = BigUint::from_bytes_be(&hex!(
            "59276e27d506861a16680f3ad9c02dccef3cc1fa3cdbe4ce6d54b80deac1bc21"
        ));
        let signature = sign_with_nonce(signing_key.as_secret_key().as_biguint(), &e, &k)
            .expect("standard nonce does not hit a retry condition");

        assert_eq!(
            signature.r_bytes(),
            hex!("f5a03b0648d2c4630eeac513e1bb81a15944da3827d5b74143ac7eaceee720b3"),
        );
        assert_eq!(
            signature.s_bytes(),
            hex!("b1b6aa29df212fd8763182bc0d421ca1bb9038fd1f7f42d4840b69c485bbc1aa"),
        );
    }

    #[test]
    fn prehash_length_is_enforced() {
        let signing_key = SigningKey::from_slice(DEFAULT_DIST_ID, &[0x42; 32]).unwrap();
        assert!(signing_key.sign_prehash(&[0u8; 31]).is_err());
        assert!(signing_key.sign_prehash(&[0u8; 33]).is_err());
        assert!(signing_key.sign_prehash(&[0u8; 32]).is_ok());
    }
}
