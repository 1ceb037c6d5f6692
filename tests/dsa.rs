//! SM2DSA tests.

use gmsm::{
    dsa::{
        signature::{Signer, Verifier},
        Signature, SigningKey, VerifyingKey,
    },
    BigUint, SecretKey, DEFAULT_DIST_ID,
};
use hex_literal::hex;
use proptest::prelude::*;

/// GB/T 32918.2-2016 appendix A.2 public key.
const PUBLIC_KEY: [u8; 65] = hex!(
    "0409f9df311e5421a150dd7d161e4bc5c672179fad1833fc076bb08ff356f35020ccea490ce26775a52dc6ea718cc1aa600aed05fbf35e084a6632f6072da9ad13"
);

/// GB/T 32918.2-2016 appendix A.2 signature over `"message digest"`.
const SIG: [u8; 64] = hex!(
    "f5a03b0648d2c4630eeac513e1bb81a15944da3827d5b74143ac7eaceee720b3" // r
    "b1b6aa29df212fd8763182bc0d421ca1bb9038fd1f7f42d4840b69c485bbc1aa" // s
);

const MSG: &[u8] = b"message digest";

#[test]
fn verify_standard_vector() {
    let vk = VerifyingKey::from_sec1_bytes(DEFAULT_DIST_ID, &PUBLIC_KEY).unwrap();
    let sig = Signature::from_bytes(&SIG).expect("decoded Signature failed");
    assert!(vk.verify(MSG, &sig).is_ok());
}

#[test]
fn standard_vector_fails_under_other_identifier() {
    let vk = VerifyingKey::from_sec1_bytes("someone@example.com", &PUBLIC_KEY).unwrap();
    let sig = Signature::from_bytes(&SIG).unwrap();
    assert!(vk.verify(MSG, &sig).is_err());
}

#[test]
fn signature_hex_round_trip() {
    let sig = Signature::from_bytes(&SIG).unwrap();
    let parsed: Signature = sig.to_hex().parse().expect("hex form parses");
    assert_eq!(parsed, sig);
    assert_eq!(sig.to_hex().len(), 128);
}

#[test]
fn out_of_range_signature_components_are_rejected() {
    // r = 0
    let mut bytes = SIG;
    bytes[..32].fill(0);
    assert!(Signature::from_bytes(&bytes).is_err());

    // s = n
    let mut bytes = SIG;
    bytes[32..].copy_from_slice(&hex!(
        "fffffffeffffffffffffffffffffffff7203df6b21c6052b53bbf40939d54123"
    ));
    assert!(Signature::from_bytes(&bytes).is_err());
}

#[test]
fn raw_mode_round_trip() {
    let sk = test_signing_key();
    let sig = sk.sign_raw(MSG).unwrap();
    assert!(sk.verifying_key().verify_raw(MSG, &sig).is_ok());

    // Raw signatures interoperate only with peers that skip the preamble.
    assert!(sk.verifying_key().verify(MSG, &sig).is_err());
    let with_preamble = sk.sign(MSG);
    assert!(sk.verifying_key().verify_raw(MSG, &with_preamble).is_err());
}

#[test]
fn derived_key_signs_and_verifies() {
    let secret_key = SecretKey::from_slice(&[0x42; 32]).unwrap();
    let signing_key = SigningKey::new(DEFAULT_DIST_ID, &secret_key).unwrap();
    let signature = signing_key.sign(b"deterministic key, random nonce");

    // The signature's scalars are always in [1, n-1].
    assert!(signature.r() > &BigUint::from(0u8));
    assert!(signature.s() > &BigUint::from(0u8));

    assert!(signing_key
        .verifying_key()
        .verify(b"deterministic key, random nonce", &signature)
        .is_ok());
}

#[test]
fn mismatched_key_halves_are_rejected() {
    let secret_key = SecretKey::from_slice(&[0x42; 32]).unwrap();
    let other = SecretKey::from_slice(&[0x43; 32]).unwrap();
    assert!(
        SigningKey::from_parts(DEFAULT_DIST_ID, &secret_key, &other.public_key()).is_err()
    );
    assert!(
        SigningKey::from_parts(DEFAULT_DIST_ID, &secret_key, &secret_key.public_key()).is_ok()
    );
}

fn test_signing_key() -> SigningKey {
    let secret_key = SecretKey::from_slice(&[0x42; 32]).unwrap();
    SigningKey::new(DEFAULT_DIST_ID, &secret_key).unwrap()
}

prop_compose! {
    fn signing_key()(bytes in any::<[u8; 32]>()) -> SigningKey {
        let mut bytes = bytes;
        loop {
            if let Ok(secret_key) = SecretKey::from_slice(&bytes) {
                return SigningKey::new(DEFAULT_DIST_ID, &secret_key).unwrap();
            }
            // Out of range; nudge into it.
            bytes[0] = 0;
            bytes[31] |= 1;
        }
    }
}

proptest! {
    // Point arithmetic over bignums dominates the runtime; keep the case
    // count low enough for CI.
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn sign_and_verify(sk in signing_key()) {
        let signature = sk.sign(MSG);
        prop_assert!(sk.verifying_key().verify(MSG, &signature).is_ok());
    }

    #[test]
    fn reject_invalid_signature(sk in signing_key(), byte in 0usize..32, bit in 0usize..8) {
        let mut signature_bytes = sk.sign(MSG).to_bytes();

        // tweak signature to make it invalid
        signature_bytes[byte] ^= 1 << bit;

        match Signature::from_bytes(&signature_bytes) {
            Ok(signature) => prop_assert!(sk.verifying_key().verify(MSG, &signature).is_err()),
            // The tweak may push r out of range, which is also a rejection.
            Err(_) => {}
        }
    }

    #[test]
    fn reject_tampered_message(sk in signing_key(), flip in 0usize..14) {
        let signature = sk.sign(MSG);
        let mut msg = MSG.to_vec();
        msg[flip] ^= 1;
        prop_assert!(sk.verifying_key().verify(&msg, &signature).is_err());
    }
}
