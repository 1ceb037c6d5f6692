//! SM2 secret keys.

use crate::{
    arithmetic::{field, ProjectivePoint},
    curve, Error, PublicKey, Result,
};
use core::{fmt, str::FromStr};
use num_bigint::BigUint;
use num_traits::Zero;
use rand_core::CryptoRngCore;

/// SM2 secret key: a scalar in `[1, n - 2]`.
///
/// The upper bound excludes `n - 1` so that `(1 + d)⁻¹ mod n`, required by
/// the signing equation, always exists.
#[derive(Clone, Eq, PartialEq)]
pub struct SecretKey {
    d: BigUint,
}

impl SecretKey {
    /// Generate a random secret key.
    ///
    /// Draws 32 bytes from the given RNG, interprets them as a big-endian
    /// scalar and rejection-samples until the scalar lies in `[1, n - 2]`.
    pub fn random(rng: &mut impl CryptoRngCore) -> Self {
        let bound = &*curve::ORDER - 2u8;
        loop {
            let mut bytes = [0u8; curve::FIELD_BYTES_SIZE];
            rng.fill_bytes(&mut bytes);
            let d = BigUint::from_bytes_be(&bytes);
            if !d.is_zero() && d <= bound {
                return Self { d };
            }
        }
    }

    /// Construct from a scalar, enforcing `1 ≤ d ≤ n - 2`.
    pub fn from_biguint(d: BigUint) -> Result<Self> {
        if d.is_zero() || d > &*curve::ORDER - 2u8 {
            return Err(Error::InvalidKey);
        }
        Ok(Self { d })
    }

    /// Parse from a 32-byte big-endian slice.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != curve::FIELD_BYTES_SIZE {
            return Err(Error::InvalidEncoding);
        }
        Self::from_biguint(BigUint::from_bytes_be(bytes))
    }

    /// Parse from a 64-character hex string.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let bytes = hex::decode(hex).map_err(|_| Error::InvalidEncoding)?;
        Self::from_slice(&bytes)
    }

    /// Borrow the secret scalar.
    ///
    /// # ⚠️ Warning
    ///
    /// This value is key material. Please treat it with the care it
    /// deserves!
    pub fn as_biguint(&self) -> &BigUint {
        &self.d
    }

    /// Serialize as fixed-width big-endian bytes.
    pub fn to_bytes(&self) -> [u8; curve::FIELD_BYTES_SIZE] {
        field::to_element_bytes(&self.d)
    }

    /// Serialize as a 64-character lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Derive the public key `[d]·G`.
    pub fn public_key(&self) -> PublicKey {
        let point = ProjectivePoint::mul_by_generator(&self.d)
            .to_affine()
            .expect("[d]G is not the identity for d in [1, n-2]");
        PublicKey::from_affine_unchecked(point)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey").finish_non_exhaustive()
    }
}

impl FromStr for SecretKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<&[u8]> for SecretKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_slice(bytes)
    }
}

impl TryFrom<BigUint> for SecretKey {
    type Error = Error;

    fn try_from(d: BigUint) -> Result<Self> {
        Self::from_biguint(d)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::One;

    #[test]
    fn rejects_out_of_range_scalars() {
        assert_eq!(
            SecretKey::from_biguint(BigUint::zero()),
            Err(Error::InvalidKey),
        );
        assert_eq!(
            SecretKey::from_biguint(&*curve::ORDER - 1u8),
            Err(Error::InvalidKey),
        );
        assert_eq!(
            SecretKey::from_biguint(curve::ORDER.clone()),
            Err(Error::InvalidKey),
        );
        assert!(SecretKey::from_biguint(BigUint::one()).is_ok());
        assert!(SecretKey::from_biguint(&*curve::ORDER - 2u8).is_ok());
    }

    #[test]
    fn hex_round_trip() {
        let sk = SecretKey::from_biguint(BigUint::from(0xdead_beefu32)).unwrap();
        let parsed = SecretKey::from_hex(&sk.to_hex()).unwrap();
        assert_eq!(parsed, sk);
    }

    #[test]
    fn debug_does_not_leak() {
        let sk = SecretKey::from_biguint(BigUint::one()).unwrap();
        let rendered = format!("{sk:?}");
        assert!(!rendered.contains('1'));
    }
}
