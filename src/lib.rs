//! Pure Rust implementation of the Chinese commercial cryptography (GM/T)
//! primitives **SM3** (a 256-bit cryptographic hash function, GM/T
//! 0004-2012) and **SM2** (an elliptic curve digital signature algorithm
//! over a 256-bit prime-field curve, GB/T 32918).
//!
//! ## About SM2 signatures
//!
//! The signing equation differs from ECDSA: `r = (e + x₁) mod n` and
//! `s = (1 + d)⁻¹ · (k - r·d) mod n`, and the digest `e` is computed over
//! the message prefixed with the identity hash `Z_A`, which binds the
//! signer's distinguishing identifier, the curve parameters and the public
//! key. Both ends must agree on the identifier;
//! [`DEFAULT_DIST_ID`] is the value the standard test vectors use.
//!
//! See [`dsa`] for signing and verification, [`sm3`] for the hash.
//!
//! ## ⚠️ Security Warning
//!
//! The arithmetic in this crate is **variable-time** (arbitrary-precision
//! integers, branch-dependent point formulas) and makes no constant-time or
//! zeroization claims. Do not use it where hardened key handling is
//! required.
//!
//! ## Minimum Supported Rust Version
//!
//! Rust **1.74** or higher.

#![forbid(unsafe_code)]
#![warn(
    clippy::mod_module_files,
    clippy::cast_lossless,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::checked_conversions,
    clippy::implicit_saturating_sub,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::unwrap_used,
    missing_docs,
    rust_2018_idioms,
    unused_lifetimes,
    unused_qualifications
)]

pub mod curve;
pub mod dsa;
pub mod sm3;

mod arithmetic;
mod distid;
mod encoding;
mod error;
mod public_key;
mod secret_key;

pub use crate::{
    arithmetic::{AffinePoint, ProjectivePoint},
    distid::DEFAULT_DIST_ID,
    encoding::{EncodedPoint, PointEncoding, Tag},
    error::{Error, Result},
    public_key::PublicKey,
    secret_key::SecretKey,
};
pub use num_bigint::BigUint;

/// SM3 hash output.
type Hash = sm3::digest::Output<sm3::Sm3>;
