//! Distinguishing identifier support.

use crate::{
    curve,
    sm3::{Digest, Sm3},
    Error, Hash, PublicKey, Result,
};

/// Type which represents distinguishing identifiers.
pub(crate) type DistId = str;

/// Default distinguishing identifier.
///
/// This is the 16-byte ASCII identifier used by the GM/T 0003.5 test
/// vectors (`ENTL_A = 0x0080`), and the value most SM2 deployments assume
/// when no identifier was negotiated.
pub const DEFAULT_DIST_ID: &str = "1234567812345678";

/// Compute the user information hash `Z_A`:
///
/// ```text
/// ZA = H256(ENTLA || IDA || a || b || xG || yG || xA || yA)
/// ```
///
/// `ENTLA` is the bit length of the identifier as a 16-bit big-endian
/// integer, so identifiers longer than 8191 bytes are rejected.
pub(crate) fn hash_z(distid: &DistId, public_key: &PublicKey) -> Result<Hash> {
    let entla: u16 = distid
        .len()
        .checked_mul(8)
        .and_then(|l| l.try_into().ok())
        .ok_or(Error::InvalidEncoding)?;

    let point = public_key.as_affine();

    let mut sm3 = Sm3::new();
    sm3.update(entla.to_be_bytes());
    sm3.update(distid);
    sm3.update(element_bytes(&curve::EQUATION_A));
    sm3.update(element_bytes(&curve::EQUATION_B));
    sm3.update(element_bytes(&curve::GENERATOR_X));
    sm3.update(element_bytes(&curve::GENERATOR_Y));
    sm3.update(point.x_bytes());
    sm3.update(point.y_bytes());
    Ok(sm3.finalize())
}

fn element_bytes(x: &num_bigint::BigUint) -> [u8; curve::FIELD_BYTES_SIZE] {
    crate::arithmetic::field::to_element_bytes(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    /// GB/T 32918.2-2016 appendix A.2 identity hash.
    #[test]
    fn standard_vector() {
        let public_key = PublicKey::from_sec1_bytes(&hex!(
            "04"
            "09f9df311e5421a150dd7d161e4bc5c672179fad1833fc076bb08ff356f35020"
            "ccea490ce26775a52dc6ea718cc1aa600aed05fbf35e084a6632f6072da9ad13"
        ))
        .unwrap();

        let z = hash_z(DEFAULT_DIST_ID, &public_key).unwrap();
        assert_eq!(
            z[..],
            hex!("b2e14c5c79c6df5b85f4fe7ed8db7a262b9da7e07ccb0ea9f4747b8ccda8a4f3")[..],
        );
    }

    #[test]
    fn oversized_identifier_is_rejected() {
        let public_key = crate::SecretKey::from_biguint(1u8.into())
            .unwrap()
            .public_key();
        let distid = "a".repeat(8192);
        assert_eq!(
            hash_z(&distid, &public_key),
            Err(Error::InvalidEncoding),
        );
    }
}
