//! Elliptic curve points on the SM2 curve.
//!
//! [`AffinePoint`] is the serialization- and hashing-facing representation;
//! [`ProjectivePoint`] carries Jacobian coordinates `(X, Y, Z)` with
//! `x = X/Z²`, `y = Y/Z³` so that addition chains avoid a field inversion
//! per step. The identity is the only point with `Z = 0`.

use super::field;
use crate::curve;
use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};

/// Elliptic curve point in affine coordinates.
///
/// Values of this type always hold reduced coordinates (`x, y < p`) but are
/// not necessarily on the curve; [`AffinePoint::is_on_curve`] and the
/// decoding paths in [`crate::PublicKey`] perform that validation.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AffinePoint {
    x: BigUint,
    y: BigUint,
}

impl AffinePoint {
    /// Construct from reduced coordinates.
    ///
    /// Coordinates at or above the field modulus are rejected.
    pub fn new(x: BigUint, y: BigUint) -> crate::Result<Self> {
        if field::is_canonical(&x) && field::is_canonical(&y) {
            Ok(Self { x, y })
        } else {
            Err(crate::Error::InvalidEncoding)
        }
    }

    /// Base point `G` of the SM2 curve.
    pub fn generator() -> Self {
        Self {
            x: curve::GENERATOR_X.clone(),
            y: curve::GENERATOR_Y.clone(),
        }
    }

    /// x-coordinate.
    pub fn x(&self) -> &BigUint {
        &self.x
    }

    /// y-coordinate.
    pub fn y(&self) -> &BigUint {
        &self.y
    }

    /// Fixed-width big-endian encoding of the x-coordinate.
    pub fn x_bytes(&self) -> [u8; curve::FIELD_BYTES_SIZE] {
        field::to_element_bytes(&self.x)
    }

    /// Fixed-width big-endian encoding of the y-coordinate.
    pub fn y_bytes(&self) -> [u8; curve::FIELD_BYTES_SIZE] {
        field::to_element_bytes(&self.y)
    }

    /// True iff the y-coordinate is odd.
    pub fn y_is_odd(&self) -> bool {
        self.y.is_odd()
    }

    /// Check the curve equation `y² ≡ x³ + ax + b (mod p)`.
    pub fn is_on_curve(&self) -> bool {
        let p = &*curve::MODULUS;
        let lhs = field::mul(&self.y, &self.y, p);
        let x_cubed = field::mul(&field::mul(&self.x, &self.x, p), &self.x, p);
        let ax = field::mul(&curve::EQUATION_A, &self.x, p);
        let rhs = field::add(&field::add(&x_cubed, &ax, p), &curve::EQUATION_B, p);
        lhs == rhs
    }
}

/// Elliptic curve point in Jacobian projective coordinates.
#[derive(Clone, Debug)]
pub struct ProjectivePoint {
    x: BigUint,
    y: BigUint,
    z: BigUint,
}

impl ProjectivePoint {
    /// Additive identity (the point at infinity).
    pub fn identity() -> Self {
        Self {
            x: BigUint::one(),
            y: BigUint::one(),
            z: BigUint::zero(),
        }
    }

    /// Base point `G` in projective coordinates.
    pub fn generator() -> Self {
        Self::from_affine(&AffinePoint::generator())
    }

    /// Lift an affine point to `Z = 1`.
    pub fn from_affine(point: &AffinePoint) -> Self {
        Self {
            x: point.x.clone(),
            y: point.y.clone(),
            z: BigUint::one(),
        }
    }

    /// True iff this is the point at infinity.
    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    /// Normalize to affine coordinates; `None` for the identity.
    pub fn to_affine(&self) -> Option<AffinePoint> {
        if self.is_identity() {
            return None;
        }
        let p = &*curve::MODULUS;
        let z_inv = field::inv(&self.z, p);
        let z_inv2 = field::mul(&z_inv, &z_inv, p);
        let z_inv3 = field::mul(&z_inv2, &z_inv, p);
        Some(AffinePoint {
            x: field::mul(&self.x, &z_inv2, p),
            y: field::mul(&self.y, &z_inv3, p),
        })
    }

    /// Point doubling.
    pub fn double(&self) -> Self {
        if self.is_identity() || self.y.is_zero() {
            return Self::identity();
        }
        let p = &*curve::MODULUS;

        let xx = field::mul(&self.x, &self.x, p);
        let yy = field::mul(&self.y, &self.y, p);
        let yyyy = field::mul(&yy, &yy, p);
        let zz = field::mul(&self.z, &self.z, p);

        // S = 4·X·Y²
        let s = field::mul(&BigUint::from(4u8), &field::mul(&self.x, &yy, p), p);
        // M = 3·X² + a·Z⁴
        let m = field::add(
            &field::mul(&BigUint::from(3u8), &xx, p),
            &field::mul(&curve::EQUATION_A, &field::mul(&zz, &zz, p), p),
            p,
        );

        // X' = M² - 2·S
        let x3 = field::sub(&field::mul(&m, &m, p), &field::add(&s, &s, p), p);
        // Y' = M·(S - X') - 8·Y⁴
        let y3 = field::sub(
            &field::mul(&m, &field::sub(&s, &x3, p), p),
            &field::mul(&BigUint::from(8u8), &yyyy, p),
            p,
        );
        // Z' = 2·Y·Z
        let z3 = field::mul(&BigUint::from(2u8), &field::mul(&self.y, &self.z, p), p);

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Point addition.
    pub fn add(&self, other: &Self) -> Self {
        if self.is_identity() {
            return other.clone();
        }
        if other.is_identity() {
            return self.clone();
        }
        let p = &*curve::MODULUS;

        let z1z1 = field::mul(&self.z, &self.z, p);
        let z2z2 = field::mul(&other.z, &other.z, p);
        let u1 = field::mul(&self.x, &z2z2, p);
        let u2 = field::mul(&other.x, &z1z1, p);
        let s1 = field::mul(&self.y, &field::mul(&other.z, &z2z2, p), p);
        let s2 = field::mul(&other.y, &field::mul(&self.z, &z1z1, p), p);

        if u1 == u2 {
            return if s1 == s2 {
                self.double()
            } else {
                // P + (-P)
                Self::identity()
            };
        }

        let h = field::sub(&u2, &u1, p);
        let r = field::sub(&s2, &s1, p);
        let hh = field::mul(&h, &h, p);
        let hhh = field::mul(&h, &hh, p);
        let v = field::mul(&u1, &hh, p);

        // X3 = R² - H³ - 2·V
        let x3 = field::sub(
            &field::sub(&field::mul(&r, &r, p), &hhh, p),
            &field::add(&v, &v, p),
            p,
        );
        // Y3 = R·(V - X3) - S1·H³
        let y3 = field::sub(
            &field::mul(&r, &field::sub(&v, &x3, p), p),
            &field::mul(&s1, &hhh, p),
            p,
        );
        // Z3 = Z1·Z2·H
        let z3 = field::mul(&field::mul(&self.z, &other.z, p), &h, p);

        Self {
            x: x3,
            y: y3,
            z: z3,
        }
    }

    /// Scalar multiplication `[k]·P` by left-to-right double-and-add.
    pub fn mul(&self, k: &BigUint) -> Self {
        let mut acc = Self::identity();
        for i in (0..k.bits()).rev() {
            acc = acc.double();
            if k.bit(i) {
                acc = acc.add(self);
            }
        }
        acc
    }

    /// `[k]·G`.
    pub fn mul_by_generator(k: &BigUint) -> Self {
        Self::generator().mul(k)
    }
}

impl From<&AffinePoint> for ProjectivePoint {
    fn from(point: &AffinePoint) -> Self {
        Self::from_affine(point)
    }
}
