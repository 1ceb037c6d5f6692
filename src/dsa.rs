//! SM2 Digital Signature Algorithm (SM2DSA) as defined in GB/T 32918.2 and
//! [draft-shen-sm2-ecdsa § 5].
//!
//! ## Usage
//!
//! ```
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! use rand_core::OsRng;
//! use gmsm::{
//!     dsa::{Signature, SigningKey, signature::Signer},
//!     SecretKey, DEFAULT_DIST_ID,
//! };
//!
//! // Signing
//! let secret_key = SecretKey::random(&mut OsRng); // serialize with `::to_bytes()`
//! let signing_key = SigningKey::new(DEFAULT_DIST_ID, &secret_key)?;
//! let verifying_key_bytes = signing_key.verifying_key().to_sec1_bytes(Default::default());
//! let message = b"test message";
//! let signature: Signature = signing_key.sign(message);
//!
//! // Verifying
//! use gmsm::dsa::{VerifyingKey, signature::Verifier};
//!
//! let verifying_key = VerifyingKey::from_sec1_bytes(DEFAULT_DIST_ID, &verifying_key_bytes)?;
//! verifying_key.verify(message, &signature)?;
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! [draft-shen-sm2-ecdsa § 5]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#section-5

mod signing;
mod verifying;

pub use signature;

pub use self::{signing::SigningKey, verifying::VerifyingKey};

use crate::{arithmetic::field, curve};
use core::{fmt, str::FromStr};
use num_bigint::BigUint;
use num_traits::Zero;
use signature::{Error, Result, SignatureEncoding};

/// SM2DSA signature serialized as bytes.
pub type SignatureBytes = [u8; Signature::BYTE_SIZE];

/// SM2DSA signature.
///
/// The two scalars are held reduced; `r, s ∈ [1, n-1]` is checked at every
/// construction site, so accessors never expose out-of-range values.
#[derive(Clone, Eq, PartialEq)]
pub struct Signature {
    r: BigUint,
    s: BigUint,
}

impl Signature {
    /// Size of an encoded SM2DSA signature in bytes.
    pub const BYTE_SIZE: usize = 2 * curve::FIELD_BYTES_SIZE;

    /// Parse an SM2DSA signature from a byte array.
    pub fn from_bytes(bytes: &SignatureBytes) -> Result<Self> {
        let (r_bytes, s_bytes) = bytes.split_at(Self::BYTE_SIZE / 2);
        Self::from_scalars(
            BigUint::from_bytes_be(r_bytes),
            BigUint::from_bytes_be(s_bytes),
        )
    }

    /// Parse an SM2DSA signature from a byte slice.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        SignatureBytes::try_from(bytes)
            .map_err(|_| Error::new())?
            .try_into()
    }

    /// Create a [`Signature`] from the `r` and `s` scalar values which
    /// comprise the signature, checking both against `[1, n-1]`.
    pub fn from_scalars(r: BigUint, s: BigUint) -> Result<Self> {
        let n = &*curve::ORDER;
        if r.is_zero() || s.is_zero() || &r >= n || &s >= n {
            return Err(Error::new());
        }
        Ok(Self { r, s })
    }

    /// Parse from the 128-character hex rendering of `r || s`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let bytes = hex::decode(hex).map_err(|_| Error::new())?;
        Self::from_slice(&bytes)
    }

    /// Serialize this signature as bytes.
    pub fn to_bytes(&self) -> SignatureBytes {
        let mut ret = [0; Self::BYTE_SIZE];
        let (r_bytes, s_bytes) = ret.split_at_mut(Self::BYTE_SIZE / 2);
        r_bytes.copy_from_slice(&field::to_element_bytes(&self.r));
        s_bytes.copy_from_slice(&field::to_element_bytes(&self.s));
        ret
    }

    /// Serialize as a 128-character lowercase hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_bytes())
    }

    /// Get the `r` component of this signature.
    pub fn r(&self) -> &BigUint {
        &self.r
    }

    /// Get the `s` component of this signature.
    pub fn s(&self) -> &BigUint {
        &self.s
    }

    /// Bytes for the `r` component of a signature.
    pub fn r_bytes(&self) -> [u8; curve::FIELD_BYTES_SIZE] {
        field::to_element_bytes(&self.r)
    }

    /// Bytes for the `s` component of a signature.
    pub fn s_bytes(&self) -> [u8; curve::FIELD_BYTES_SIZE] {
        field::to_element_bytes(&self.s)
    }

    /// Convert this signature into a byte vector.
    pub fn to_vec(&self) -> Vec<u8> {
        self.to_bytes().to_vec()
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gmsm::dsa::Signature(")?;

        for byte in self.to_bytes() {
            write!(f, "{:02X}", byte)?;
        }

        write!(f, ")")
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Signature {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl From<Signature> for SignatureBytes {
    fn from(signature: Signature) -> SignatureBytes {
        signature.to_bytes()
    }
}

impl From<&Signature> for SignatureBytes {
    fn from(signature: &Signature) -> SignatureBytes {
        signature.to_bytes()
    }
}

impl SignatureEncoding for Signature {
    type Repr = SignatureBytes;

    fn to_bytes(&self) -> Self::Repr {
        self.into()
    }

    fn encoded_len(&self) -> usize {
        Self::BYTE_SIZE
    }
}

impl TryFrom<SignatureBytes> for Signature {
    type Error = Error;

    fn try_from(signature: SignatureBytes) -> Result<Signature> {
        Signature::from_bytes(&signature)
    }
}

impl TryFrom<&SignatureBytes> for Signature {
    type Error = Error;

    fn try_from(signature: &SignatureBytes) -> Result<Signature> {
        Signature::from_bytes(signature)
    }
}

impl TryFrom<&[u8]> for Signature {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Signature> {
        Signature::from_slice(bytes)
    }
}
