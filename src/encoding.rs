//! Point encoding and decoding.
//!
//! Public keys use the `Elliptic-Curve-Point-to-Octet-String` format from
//! SEC 1 § 2.3.3: a tag byte, the 32-byte big-endian x-coordinate, and
//! (except for compressed form) the 32-byte big-endian y-coordinate. The
//! identity encoding (tag `0x00`) is never a valid public key and is
//! rejected on input.

use crate::{
    arithmetic::{field, AffinePoint},
    curve, Error, Result,
};
use core::fmt;
use num_bigint::BigUint;
use num_integer::Integer;

/// Tag byte leading a serialized point.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum Tag {
    /// Point at infinity. Rejected when decoding public keys.
    Identity = 0,
    /// Compressed point with even y.
    CompressedEvenY = 2,
    /// Compressed point with odd y.
    CompressedOddY = 3,
    /// Uncompressed point: `x` followed by `y`.
    Uncompressed = 4,
    /// Hybrid point with even y: both coordinates plus the parity tag.
    HybridEvenY = 6,
    /// Hybrid point with odd y.
    HybridOddY = 7,
}

impl Tag {
    /// Parse a tag byte.
    pub fn from_u8(byte: u8) -> Result<Self> {
        match byte {
            0 => Ok(Tag::Identity),
            2 => Ok(Tag::CompressedEvenY),
            3 => Ok(Tag::CompressedOddY),
            4 => Ok(Tag::Uncompressed),
            6 => Ok(Tag::HybridEvenY),
            7 => Ok(Tag::HybridOddY),
            _ => Err(Error::InvalidEncoding),
        }
    }

    /// Is this one of the compressed tags?
    pub fn is_compressed(self) -> bool {
        matches!(self, Tag::CompressedEvenY | Tag::CompressedOddY)
    }

    /// Is this one of the hybrid tags?
    pub fn is_hybrid(self) -> bool {
        matches!(self, Tag::HybridEvenY | Tag::HybridOddY)
    }

    /// Expected total message length for this tag.
    pub fn message_len(self) -> usize {
        1 + match self {
            Tag::Identity => 0,
            Tag::CompressedEvenY | Tag::CompressedOddY => curve::FIELD_BYTES_SIZE,
            _ => 2 * curve::FIELD_BYTES_SIZE,
        }
    }

    /// The y parity this tag asserts, if any.
    fn y_is_odd(self) -> Option<bool> {
        match self {
            Tag::CompressedEvenY | Tag::HybridEvenY => Some(false),
            Tag::CompressedOddY | Tag::HybridOddY => Some(true),
            _ => None,
        }
    }
}

/// Serialization mode for public keys.
///
/// These correspond to the `compress` / `nocompress` / `mix` modes of other
/// SM2 implementations. The default is uncompressed, the form SM2 key
/// material is typically exchanged in.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum PointEncoding {
    /// Tag `0x02`/`0x03` and the x-coordinate only.
    Compressed,
    /// Tag `0x04` and both coordinates.
    #[default]
    Uncompressed,
    /// Tag `0x06`/`0x07` and both coordinates.
    Hybrid,
}

/// A serialized curve point with a validated tag and length.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EncodedPoint {
    bytes: Vec<u8>,
}

impl EncodedPoint {
    /// Parse the tag and check the length. Coordinate validation happens in
    /// [`EncodedPoint::decode`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let tag = Tag::from_u8(*bytes.first().ok_or(Error::InvalidEncoding)?)?;
        if bytes.len() != tag.message_len() {
            return Err(Error::InvalidEncoding);
        }
        Ok(Self {
            bytes: bytes.to_vec(),
        })
    }

    /// Parse from lowercase or uppercase hex.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let bytes = hex::decode(hex).map_err(|_| Error::InvalidEncoding)?;
        Self::from_bytes(&bytes)
    }

    /// Serialize an affine point.
    pub fn from_affine(point: &AffinePoint, encoding: PointEncoding) -> Self {
        let tag = match encoding {
            PointEncoding::Compressed => {
                if point.y_is_odd() {
                    Tag::CompressedOddY
                } else {
                    Tag::CompressedEvenY
                }
            }
            PointEncoding::Uncompressed => Tag::Uncompressed,
            PointEncoding::Hybrid => {
                if point.y_is_odd() {
                    Tag::HybridOddY
                } else {
                    Tag::HybridEvenY
                }
            }
        };

        let mut bytes = Vec::with_capacity(tag.message_len());
        bytes.push(tag as u8);
        bytes.extend_from_slice(&point.x_bytes());
        if !tag.is_compressed() {
            bytes.extend_from_slice(&point.y_bytes());
        }
        Self { bytes }
    }

    /// The tag byte.
    pub fn tag(&self) -> Tag {
        // Validated in `from_bytes`.
        Tag::from_u8(self.bytes[0]).expect("tag was checked on construction")
    }

    /// Raw serialized bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Lowercase hex rendering of the serialized bytes.
    pub fn to_hex(&self) -> String {
        hex::encode(&self.bytes)
    }

    /// Recover the affine point.
    ///
    /// Rejects the identity encoding, coordinates at or above the field
    /// modulus, compressed points whose x has no square root, hybrid
    /// points whose y parity contradicts the tag, and any point that does
    /// not satisfy the curve equation.
    pub fn decode(&self) -> Result<AffinePoint> {
        let tag = self.tag();
        if tag == Tag::Identity {
            return Err(Error::InvalidEncoding);
        }

        let x_bytes = &self.bytes[1..1 + curve::FIELD_BYTES_SIZE];
        let x = BigUint::from_bytes_be(x_bytes);
        if !field::is_canonical(&x) {
            return Err(Error::InvalidEncoding);
        }

        let point = if tag.is_compressed() {
            let y = recover_y(&x, tag)?;
            AffinePoint::new(x, y)?
        } else {
            let y_bytes = &self.bytes[1 + curve::FIELD_BYTES_SIZE..];
            let y = BigUint::from_bytes_be(y_bytes);
            if !field::is_canonical(&y) {
                return Err(Error::InvalidEncoding);
            }
            // Hybrid encodings repeat y; its parity must agree with the tag.
            if tag.is_hybrid() && tag.y_is_odd() != Some(y.is_odd()) {
                return Err(Error::InvalidEncoding);
            }
            AffinePoint::new(x, y)?
        };

        if !point.is_on_curve() {
            return Err(Error::NotOnCurve);
        }
        Ok(point)
    }
}

impl fmt::Display for EncodedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// Solve `y² = x³ + ax + b (mod p)` for the root matching the tag parity.
fn recover_y(x: &BigUint, tag: Tag) -> Result<BigUint> {
    let p = &*curve::MODULUS;
    let x_cubed = field::mul(&field::mul(x, x, p), x, p);
    let ax = field::mul(&curve::EQUATION_A, x, p);
    let rhs = field::add(&field::add(&x_cubed, &ax, p), &curve::EQUATION_B, p);

    let root = field::sqrt(&rhs).ok_or(Error::InvalidEncoding)?;
    let tag_odd = tag.y_is_odd().ok_or(Error::InvalidEncoding)?;
    let y = if root.is_odd() == tag_odd {
        root
    } else {
        field::sub(&BigUint::from(0u8), &root, p)
    };
    // Neither root matches the tag only in the y = 0 corner case.
    if y.is_odd() != tag_odd {
        return Err(Error::InvalidEncoding);
    }
    Ok(y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tag_round_trip() {
        for byte in [0u8, 2, 3, 4, 6, 7] {
            assert_eq!(Tag::from_u8(byte).unwrap() as u8, byte);
        }
        for byte in [1u8, 5, 8, 0xff] {
            assert!(Tag::from_u8(byte).is_err());
        }
    }

    #[test]
    fn tag_predicates() {
        assert!(Tag::CompressedEvenY.is_compressed());
        assert!(Tag::CompressedOddY.is_compressed());
        assert!(Tag::HybridEvenY.is_hybrid());
        assert!(Tag::HybridOddY.is_hybrid());
        assert!(!Tag::Uncompressed.is_compressed());
        assert!(!Tag::Uncompressed.is_hybrid());
    }

    #[test]
    fn identity_is_rejected() {
        let encoded = EncodedPoint::from_bytes(&[0]).unwrap();
        assert_eq!(encoded.decode(), Err(Error::InvalidEncoding));
    }

    #[test]
    fn wrong_length_is_rejected() {
        assert_eq!(
            EncodedPoint::from_bytes(&[4; 33]),
            Err(Error::InvalidEncoding),
        );
        assert_eq!(
            EncodedPoint::from_bytes(&[2; 65]),
            Err(Error::InvalidEncoding),
        );
        assert_eq!(EncodedPoint::from_bytes(&[]), Err(Error::InvalidEncoding));
    }

    #[test]
    fn generator_compressed_round_trip() {
        let g = AffinePoint::generator();
        let encoded = EncodedPoint::from_affine(&g, PointEncoding::Compressed);
        // Gy is even, so the tag must be 0x02.
        assert_eq!(encoded.tag(), Tag::CompressedEvenY);
        assert_eq!(encoded.decode().unwrap(), g);
    }

    #[test]
    fn hybrid_parity_mismatch_is_rejected() {
        let g = AffinePoint::generator();
        let mut bytes = EncodedPoint::from_affine(&g, PointEncoding::Hybrid)
            .as_bytes()
            .to_vec();
        assert_eq!(bytes[0], 6);
        bytes[0] = 7;
        let tampered = EncodedPoint::from_bytes(&bytes).unwrap();
        assert_eq!(tampered.decode(), Err(Error::InvalidEncoding));
    }
}
