//! SM2 curve parameters.
//!
//! Recommended parameters from GB/T 32918.5-2017 (also reproduced in
//! [draft-shen-sm2-ecdsa Appendix D]). The curve is
//! `y² ≡ x³ + ax + b (mod p)` over the 256-bit prime `p`, with `a = p - 3`,
//! prime group order `n` and cofactor `h = 1`.
//!
//! [draft-shen-sm2-ecdsa Appendix D]: https://datatracker.ietf.org/doc/html/draft-shen-sm2-ecdsa-02#appendix-D

use num_bigint::BigUint;
use once_cell::sync::Lazy;

/// Field modulus `p` serialized as hexadecimal.
pub const MODULUS_HEX: &str = "fffffffeffffffffffffffffffffffffffffffff00000000ffffffffffffffff";

/// Group order `n` (i.e. scalar modulus) serialized as hexadecimal.
pub const ORDER_HEX: &str = "fffffffeffffffffffffffffffffffff7203df6b21c6052b53bbf40939d54123";

/// Curve coefficient `a = p - 3` serialized as hexadecimal.
pub const EQUATION_A_HEX: &str =
    "fffffffeffffffffffffffffffffffffffffffff00000000fffffffffffffffc";

/// Curve coefficient `b` serialized as hexadecimal.
pub const EQUATION_B_HEX: &str =
    "28e9fa9e9d9f5e344d5a9e4bcf6509a7f39789f515ab8f92ddbcbd414d940e93";

/// Base point x-coordinate serialized as hexadecimal.
pub const GENERATOR_X_HEX: &str =
    "32c4ae2c1f1981195f9904466a39c9948fe30bbff2660be1715a4589334c74c7";

/// Base point y-coordinate serialized as hexadecimal.
pub const GENERATOR_Y_HEX: &str =
    "bc3736a2f4f6779c59bdcee36b692153d0a9877cc62a474002df32e52139f0a0";

/// Size of a serialized field element or scalar in bytes.
pub const FIELD_BYTES_SIZE: usize = 32;

/// Field modulus `p`.
pub static MODULUS: Lazy<BigUint> = Lazy::new(|| from_hex(MODULUS_HEX));

/// Group order `n`.
pub static ORDER: Lazy<BigUint> = Lazy::new(|| from_hex(ORDER_HEX));

/// Curve coefficient `a`.
pub static EQUATION_A: Lazy<BigUint> = Lazy::new(|| from_hex(EQUATION_A_HEX));

/// Curve coefficient `b`.
pub static EQUATION_B: Lazy<BigUint> = Lazy::new(|| from_hex(EQUATION_B_HEX));

/// Base point x-coordinate.
pub static GENERATOR_X: Lazy<BigUint> = Lazy::new(|| from_hex(GENERATOR_X_HEX));

/// Base point y-coordinate.
pub static GENERATOR_Y: Lazy<BigUint> = Lazy::new(|| from_hex(GENERATOR_Y_HEX));

fn from_hex(hex: &str) -> BigUint {
    BigUint::parse_bytes(hex.as_bytes(), 16).expect("valid curve parameter literal")
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_integer::Integer;

    #[test]
    fn equation_a_is_minus_three() {
        assert_eq!(*EQUATION_A, &*MODULUS - 3u8);
    }

    #[test]
    fn modulus_is_sqrt_friendly() {
        // p ≡ 3 (mod 4) enables square roots via a single exponentiation.
        assert_eq!(MODULUS.mod_floor(&BigUint::from(4u8)), 3u8.into());
    }

    #[test]
    fn order_is_below_modulus() {
        assert!(*ORDER < *MODULUS);
        assert!(ORDER.is_odd());
    }
}
