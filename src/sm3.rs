//! SM3 cryptographic hash function as defined in GM/T 0004-2012.
//!
//! SM3 is a Merkle–Damgård hash with a 256-bit state, a 512-bit block and a
//! custom compression function. This module implements it on top of the
//! [`digest`] crate's block-level API, so the hasher integrates with any
//! code written against the [`Digest`] trait.
//!
//! ## Usage
//!
//! ```
//! use gmsm::sm3::{Digest, Sm3};
//! use hex_literal::hex;
//!
//! let mut hasher = Sm3::new();
//! hasher.update(b"abc");
//! let digest = hasher.finalize();
//!
//! assert_eq!(
//!     digest[..],
//!     hex!("66c7f0f462eeedd9d1f2d46bdc10e4e24167c4875cf2f7a2297da02b8f4ba8e0")[..],
//! );
//! ```
//!
//! Streaming input is supported: any partition of the message across
//! [`Digest::update`] calls produces the same digest as hashing it in one
//! shot. [`Digest::finalize_reset`] returns the digest and restores the
//! initial state, so a single hasher can serve multiple messages.

pub use digest::{self, Digest};

use core::{fmt, slice::from_ref};
use digest::{
    HashMarker, Output,
    block_buffer::Eager,
    consts::{U32, U64},
    core_api::{
        AlgorithmName, Block, BlockSizeUser, Buffer, BufferKindUser, CoreWrapper, FixedOutputCore,
        OutputSizeUser, Reset, UpdateCore,
    },
};

mod compress;

use self::compress::compress;

/// Initialization vector from GM/T 0004-2012 § 4.1.
const IV: [u32; 8] = [
    0x7380_166f,
    0x4914_b2b9,
    0x1724_42d7,
    0xda8a_0600,
    0xa96f_30bc,
    0x1631_38aa,
    0xe38d_ee4d,
    0xb0fb_0e4e,
];

/// One-shot SM3, returning the digest as its canonical 64-character
/// lowercase hex rendering.
pub fn digest_hex(msg: impl AsRef<[u8]>) -> String {
    hex::encode(Sm3::digest(msg))
}

/// Core SM3 hasher state.
#[derive(Clone)]
pub struct Sm3Core {
    /// Number of 64-byte blocks compressed so far.
    block_len: u64,
    h: [u32; 8],
}

/// SM3 hasher.
pub type Sm3 = CoreWrapper<Sm3Core>;

impl HashMarker for Sm3Core {}

impl BlockSizeUser for Sm3Core {
    type BlockSize = U64;
}

impl BufferKindUser for Sm3Core {
    type BufferKind = Eager;
}

impl OutputSizeUser for Sm3Core {
    type OutputSize = U32;
}

impl UpdateCore for Sm3Core {
    #[inline]
    fn update_blocks(&mut self, blocks: &[Block<Self>]) {
        self.block_len += blocks.len() as u64;
        compress(&mut self.h, blocks);
    }
}

impl FixedOutputCore for Sm3Core {
    #[inline]
    fn finalize_fixed_core(&mut self, buffer: &mut Buffer<Self>, out: &mut Output<Self>) {
        let bit_len = 8 * (buffer.get_pos() as u64 + 64 * self.block_len);

        let mut h = self.h;
        buffer.len64_padding_be(bit_len, |block| compress(&mut h, from_ref(block)));

        for (chunk, v) in out.chunks_exact_mut(4).zip(h.iter()) {
            chunk.copy_from_slice(&v.to_be_bytes());
        }
    }
}

impl Default for Sm3Core {
    #[inline]
    fn default() -> Self {
        Self {
            h: IV,
            block_len: 0,
        }
    }
}

impl Reset for Sm3Core {
    #[inline]
    fn reset(&mut self) {
        *self = Default::default();
    }
}

impl AlgorithmName for Sm3Core {
    fn write_alg_name(f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Sm3")
    }
}

impl fmt::Debug for Sm3Core {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Sm3Core { ... }")
    }
}
