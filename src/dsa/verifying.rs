//! Support for verifying SM2DSA signatures.
//!
//! ## Algorithm
//!
//! ```text
//! B1: verify whether r' in [1,n-1], verification failed if not
//! B2: verify whether s' in [1,n-1], verification failed if not
//! B3: set M'~=ZA || M'
//! B4: calculate e'=Hv(M'~)
//! B5: calculate t = (r' + s') modn, verification failed if t=0
//! B6: calculate the point (x1', y1')=[s']G + [t]PA
//! B7: calculate R=(e'+x1') modn, verification pass if yes, otherwise failed
//! ```

use super::Signature;
use crate::{
    arithmetic::{AffinePoint, ProjectivePoint},
    curve,
    distid::{hash_z, DistId},
    encoding::PointEncoding,
    sm3::{Digest, Sm3},
    Hash, PublicKey,
};
use num_bigint::BigUint;
use num_traits::Zero;
use signature::{hazmat::PrehashVerifier, Error, Result, Verifier};

/// SM2DSA public key used for verifying signatures are valid for a given
/// message.
///
/// ## Usage
///
/// The [`signature`] crate defines the following traits which are the
/// primary API for verifying:
///
/// - [`Verifier`]: verify a message against a provided key and signature
/// - [`PrehashVerifier`]: verify the low-level raw output bytes of a
///   message digest
///
/// A signature that does not validate is reported as an [`Error`] by these
/// methods; it is indistinguishable from any other verification failure by
/// design.
#[derive(Clone, Debug)]
pub struct VerifyingKey {
    /// Signer's public key.
    public_key: PublicKey,

    /// Signer's user information hash `Z`.
    identity_hash: Hash,

    /// Distinguishing identifier used to compute `Z`.
    distid: String,
}

impl VerifyingKey {
    /// Initialize [`VerifyingKey`] from a signer's distinguishing
    /// identifier and public key.
    pub fn new(distid: &DistId, public_key: PublicKey) -> crate::Result<Self> {
        let identity_hash = hash_z(distid, &public_key)?;

        Ok(Self {
            identity_hash,
            public_key,
            distid: distid.into(),
        })
    }

    /// Initialize [`VerifyingKey`] from a SEC1-encoded public key.
    pub fn from_sec1_bytes(distid: &DistId, bytes: &[u8]) -> crate::Result<Self> {
        Self::new(distid, PublicKey::from_sec1_bytes(bytes)?)
    }

    /// Initialize [`VerifyingKey`] from a hex-encoded public key.
    pub fn from_hex(distid: &DistId, hex: &str) -> crate::Result<Self> {
        Self::new(distid, PublicKey::from_hex(hex)?)
    }

    /// Initialize [`VerifyingKey`] from an affine point.
    ///
    /// Runs the full public key validation: the point must not be the
    /// identity, must satisfy the curve equation and must have order `n`.
    pub fn from_affine(distid: &DistId, affine: AffinePoint) -> crate::Result<Self> {
        Self::new(distid, PublicKey::from_affine(affine)?)
    }

    /// Borrow the inner [`PublicKey`].
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Borrow the inner [`AffinePoint`] for this public key.
    pub fn as_affine(&self) -> &AffinePoint {
        self.public_key.as_affine()
    }

    /// Get the distinguishing identifier for this key.
    pub fn distid(&self) -> &DistId {
        self.distid.as_str()
    }

    /// Serialize this key as SEC1 bytes in the given encoding.
    pub fn to_sec1_bytes(&self, encoding: PointEncoding) -> Vec<u8> {
        self.public_key.to_sec1_bytes(encoding)
    }

    /// Serialize this key as lowercase hex in the given encoding.
    pub fn to_hex(&self, encoding: PointEncoding) -> String {
        self.public_key.to_hex(encoding)
    }

    /// Verify a signature over a message hashed without the `Z_A`
    /// preamble: `e = SM3(msg)`.
    pub fn verify_raw(&self, msg: &[u8], signature: &Signature) -> Result<()> {
        self.verify_prehash(&Sm3::digest(msg), signature)
    }

    /// Compute message hash `e = SM3(Z_A || msg)`.
    pub(crate) fn hash_msg(&self, msg: &[u8]) -> Hash {
        Sm3::new_with_prefix(self.identity_hash)
            .chain_update(msg)
            .finalize()
    }
}

//
// `*Verifier` trait impls
//

impl PrehashVerifier<Signature> for VerifyingKey {
    fn verify_prehash(&self, prehash: &[u8], signature: &Signature) -> Result<()> {
        if prehash.len() != curve::FIELD_BYTES_SIZE {
            return Err(Error::new());
        }

        let n = &*curve::ORDER;

        // B1, B2: r and s were checked against [1, n-1] when the signature
        // was parsed or assembled.
        let r = signature.r();
        let s = signature.s();

        // B4: calculate e'=Hv(M'~)
        let e = BigUint::from_bytes_be(prehash) % n;

        // B5: calculate t = (r' + s') modn, verification failed if t=0
        let t = (r + s) % n;
        if t.is_zero() {
            return Err(Error::new());
        }

        // B6: calculate the point (x1', y1')=[s']G + [t]PA
        let point = ProjectivePoint::mul_by_generator(s)
            .add(&ProjectivePoint::from_affine(self.public_key.as_affine()).mul(&t));
        let x1 = point.to_affine().ok_or_else(Error::new)?.x() % n;

        // B7: calculate R=(e'+x1') modn, verification pass if yes, otherwise failed
        if (e + x1) % n == *r {
            Ok(())
        } else {
            Err(Error::new())
        }
    }
}

impl Verifier<Signature> for VerifyingKey {
    fn verify(&self, msg: &[u8], signature: &Signature) -> Result<()> {
        // B3: set M'~=ZA || M'
        let hash = self.hash_msg(msg);
        self.verify_prehash(&hash, signature)
    }
}

//
// Other trait impls
//

impl AsRef<AffinePoint> for VerifyingKey {
    fn as_ref(&self) -> &AffinePoint {
        self.as_affine()
    }
}

impl From<VerifyingKey> for PublicKey {
    fn from(verifying_key: VerifyingKey) -> PublicKey {
        verifying_key.public_key
    }
}

impl From<&VerifyingKey> for PublicKey {
    fn from(verifying_key: &VerifyingKey) -> PublicKey {
        verifying_key.public_key.clone()
    }
}
