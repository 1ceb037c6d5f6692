//! SM3 hash function tests.

use gmsm::sm3::{Digest, Sm3};
use hex_literal::hex;
use proptest::prelude::*;

/// GM/T 0004-2012 appendix A, sample 1.
const ABC_DIGEST: [u8; 32] =
    hex!("66c7f0f462eeedd9d1f2d46bdc10e4e24167c4875cf2f7a2297da02b8f4ba8e0");

/// GM/T 0004-2012 appendix A, sample 2.
const ABCD16_DIGEST: [u8; 32] =
    hex!("debe9ff92275b8a138604889c18e5a4d6fdb70e5387e5765293dcba39c0c5732");

const EMPTY_DIGEST: [u8; 32] =
    hex!("1ab21d8355cfa17f8e61194831e81a8f22bec8c728fefb747ed035eb5082aa2b");

#[test]
fn empty_message() {
    assert_eq!(Sm3::digest(b"")[..], EMPTY_DIGEST[..]);
}

#[test]
fn abc() {
    assert_eq!(Sm3::digest(b"abc")[..], ABC_DIGEST[..]);
}

#[test]
fn one_full_block() {
    // 64 bytes of input forces the padding into a second block.
    let msg = b"abcd".repeat(16);
    assert_eq!(Sm3::digest(&msg)[..], ABCD16_DIGEST[..]);
}

#[test]
fn hex_output_is_zero_padded() {
    let rendered = gmsm::sm3::digest_hex(b"abc");
    assert_eq!(rendered.len(), 64);
    assert_eq!(
        rendered,
        "66c7f0f462eeedd9d1f2d46bdc10e4e24167c4875cf2f7a2297da02b8f4ba8e0",
    );
    assert_eq!(rendered, hex::encode(Sm3::digest(b"abc")));
}

#[test]
fn streaming_matches_one_shot() {
    let msg = b"abcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcd";

    let mut hasher = Sm3::new();
    hasher.update(&msg[..1]);
    hasher.update(&msg[1..7]);
    hasher.update(&msg[7..64]);
    assert_eq!(hasher.finalize()[..], ABCD16_DIGEST[..]);
}

#[test]
fn finalize_reset_restores_initial_state() {
    let mut hasher = Sm3::new();
    hasher.update(b"abc");
    assert_eq!(hasher.finalize_reset()[..], ABC_DIGEST[..]);

    // The same engine must now behave like a fresh one.
    hasher.update(b"abc");
    assert_eq!(hasher.finalize_reset()[..], ABC_DIGEST[..]);

    hasher.update(b"");
    assert_eq!(hasher.finalize()[..], EMPTY_DIGEST[..]);
}

proptest! {
    #[test]
    fn deterministic(msg in any::<Vec<u8>>()) {
        prop_assert_eq!(Sm3::digest(&msg), Sm3::digest(&msg));
    }

    #[test]
    fn any_partition_matches_one_shot(msg in any::<Vec<u8>>(), split in any::<prop::sample::Index>()) {
        let mid = split.index(msg.len() + 1);
        let mut hasher = Sm3::new();
        hasher.update(&msg[..mid]);
        hasher.update(&msg[mid..]);
        prop_assert_eq!(hasher.finalize(), Sm3::digest(&msg));
    }
}
