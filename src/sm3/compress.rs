//! SM3 compression function.

use super::Sm3Core;
use digest::core_api::Block;

/// Round constant for rounds 0..16.
const T0: u32 = 0x79cc_4519;
/// Round constant for rounds 16..64.
const T1: u32 = 0x7a87_9d8a;

#[inline(always)]
fn ff0(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

#[inline(always)]
fn ff1(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (x & z) | (y & z)
}

#[inline(always)]
fn gg0(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

#[inline(always)]
fn gg1(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (!x & z)
}

#[inline(always)]
fn p0(x: u32) -> u32 {
    x ^ x.rotate_left(9) ^ x.rotate_left(17)
}

#[inline(always)]
fn p1(x: u32) -> u32 {
    x ^ x.rotate_left(15) ^ x.rotate_left(23)
}

fn compress_block(state: &mut [u32; 8], block: &Block<Sm3Core>) {
    let mut w = [0u32; 68];
    for (wi, chunk) in w.iter_mut().zip(block.chunks_exact(4)) {
        *wi = u32::from_be_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    for j in 16..68 {
        w[j] = p1(w[j - 16] ^ w[j - 9] ^ w[j - 3].rotate_left(15))
            ^ w[j - 13].rotate_left(7)
            ^ w[j - 6];
    }

    let mut w1 = [0u32; 64];
    for j in 0..64 {
        w1[j] = w[j] ^ w[j + 4];
    }

    let [mut a, mut b, mut c, mut d, mut e, mut f, mut g, mut h] = *state;

    for j in 0..64 {
        let t = if j < 16 { T0 } else { T1 };
        let ss1 = a
            .rotate_left(12)
            .wrapping_add(e)
            .wrapping_add(t.rotate_left(j as u32))
            .rotate_left(7);
        let ss2 = ss1 ^ a.rotate_left(12);
        let tt1 = if j < 16 {
            ff0(a, b, c)
        } else {
            ff1(a, b, c)
        }
        .wrapping_add(d)
        .wrapping_add(ss2)
        .wrapping_add(w1[j]);
        let tt2 = if j < 16 {
            gg0(e, f, g)
        } else {
            gg1(e, f, g)
        }
        .wrapping_add(h)
        .wrapping_add(ss1)
        .wrapping_add(w[j]);

        d = c;
        c = b.rotate_left(9);
        b = a;
        a = tt1;
        h = g;
        g = f.rotate_left(19);
        f = e;
        e = p0(tt2);
    }

    state[0] ^= a;
    state[1] ^= b;
    state[2] ^= c;
    state[3] ^= d;
    state[4] ^= e;
    state[5] ^= f;
    state[6] ^= g;
    state[7] ^= h;
}

pub(crate) fn compress(state: &mut [u32; 8], blocks: &[Block<Sm3Core>]) {
    for block in blocks {
        compress_block(state, block);
    }
}

#[cfg(test)]
mod tests {
    use crate::sm3::{Digest, Sm3};
    use hex_literal::hex;

    /// GM/T 0004-2012 appendix A, sample 2: exactly one full block plus
    /// padding, forcing a two-block compression.
    #[test]
    fn two_block_message() {
        let digest = Sm3::digest(b"abcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcdabcd");
        assert_eq!(
            digest[..],
            hex!("debe9ff92275b8a138604889c18e5a4d6fdb70e5387e5765293dcba39c0c5732")[..],
        );
    }
}
