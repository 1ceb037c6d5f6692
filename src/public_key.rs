//! SM2 public keys.

use crate::{
    arithmetic::{AffinePoint, ProjectivePoint},
    curve,
    encoding::{EncodedPoint, PointEncoding},
    Error, Result,
};
use core::{fmt, str::FromStr};

/// SM2 public key: a validated point on the curve.
///
/// Construction guarantees the point is not the identity, satisfies the
/// curve equation, and has order `n` (`[n]·P = O`).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PublicKey {
    point: AffinePoint,
}

impl PublicKey {
    /// Construct from an affine point, running the full validation.
    pub fn from_affine(point: AffinePoint) -> Result<Self> {
        if !point.is_on_curve() {
            return Err(Error::NotOnCurve);
        }
        if !ProjectivePoint::from_affine(&point)
            .mul(&curve::ORDER)
            .is_identity()
        {
            return Err(Error::NotOnCurve);
        }
        Ok(Self { point })
    }

    /// Construct from a point already known to be valid.
    ///
    /// Only for points produced by in-crate curve arithmetic on validated
    /// inputs.
    pub(crate) fn from_affine_unchecked(point: AffinePoint) -> Self {
        Self { point }
    }

    /// Parse a SEC1-encoded point (compressed, uncompressed or hybrid).
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self> {
        Self::from_affine(EncodedPoint::from_bytes(bytes)?.decode()?)
    }

    /// Parse a hex-encoded SEC1 point.
    pub fn from_hex(hex: &str) -> Result<Self> {
        Self::from_affine(EncodedPoint::from_hex(hex)?.decode()?)
    }

    /// Borrow the inner affine point.
    pub fn as_affine(&self) -> &AffinePoint {
        &self.point
    }

    /// Serialize in the given encoding.
    pub fn to_encoded_point(&self, encoding: PointEncoding) -> EncodedPoint {
        EncodedPoint::from_affine(&self.point, encoding)
    }

    /// Serialize to SEC1 bytes in the given encoding.
    pub fn to_sec1_bytes(&self, encoding: PointEncoding) -> Vec<u8> {
        self.to_encoded_point(encoding).as_bytes().to_vec()
    }

    /// Serialize to lowercase hex in the given encoding.
    pub fn to_hex(&self, encoding: PointEncoding) -> String {
        self.to_encoded_point(encoding).to_hex()
    }
}

impl AsRef<AffinePoint> for PublicKey {
    fn as_ref(&self) -> &AffinePoint {
        &self.point
    }
}

impl TryFrom<AffinePoint> for PublicKey {
    type Error = Error;

    fn try_from(point: AffinePoint) -> Result<Self> {
        Self::from_affine(point)
    }
}

impl TryFrom<&[u8]> for PublicKey {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self> {
        Self::from_sec1_bytes(bytes)
    }
}

impl FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex(PointEncoding::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigUint;

    #[test]
    fn generator_is_a_valid_public_key() {
        let pk = PublicKey::from_affine(AffinePoint::generator()).unwrap();
        assert_eq!(pk.as_affine(), &AffinePoint::generator());
    }

    #[test]
    fn off_curve_point_is_rejected() {
        let point =
            AffinePoint::new(BigUint::from(1u8), BigUint::from(1u8)).expect("canonical coords");
        assert_eq!(PublicKey::from_affine(point), Err(Error::NotOnCurve));
    }
}
