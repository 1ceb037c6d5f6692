//! Error types.

/// Result type with the `gmsm` crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised while decoding or validating key material.
///
/// Signing and verification report failures through the opaque
/// [`signature::Error`] type instead; a signature that does not validate is
/// not a crate-level error.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Malformed point or scalar encoding: unknown tag byte, wrong length,
    /// non-hex characters, the point-at-infinity tag, or a compressed or
    /// hybrid `y` whose parity cannot be satisfied.
    #[error("invalid point or scalar encoding")]
    InvalidEncoding,

    /// A decoded point does not satisfy the curve equation, or is not a
    /// point of order `n`.
    #[error("point is not on the curve")]
    NotOnCurve,

    /// A secret scalar outside `[1, n - 2]`, or an inconsistent key pair.
    #[error("invalid key")]
    InvalidKey,
}
