//! Group and field arithmetic for the SM2 curve.
//!
//! This is the vended bignum/EC collaborator: modular arithmetic over
//! [`num_bigint::BigUint`] and short-Weierstrass point operations in
//! Jacobian coordinates. It is variable-time and therefore makes no
//! side-channel claims; see the crate-level documentation.

pub(crate) mod field;
pub(crate) mod point;

pub use self::point::{AffinePoint, ProjectivePoint};
