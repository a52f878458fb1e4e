//! Portable constant-time multiplication.
//!
//! Carry-less 64x64 products are computed with integer multiplications on
//! operands whose set bits are spaced four positions apart ("holes"), the
//! technique used by BearSSL's `ghash_ctmul64`. No branch or memory access
//! depends on the operands.

use super::{FieldElement, POLY};

/// Karatsuba multiplication followed by Montgomery reduction.
///
/// The schoolbook product of `(x1,x0)*(y1,y0)` needs four 64-bit products;
/// the middle term `x1*y0 + x0*y1` is recovered as
/// `(x1+x0)*(y1+y0) + x1*y1 + x0*y0`, which saves one.
pub(super) fn mul(x: FieldElement, y: FieldElement) -> FieldElement {
    let (h1, h0) = ctmul(x.hi, y.hi);
    let (l1, l0) = ctmul(x.lo, y.lo);
    let (m1, m0) = ctmul(x.hi ^ x.lo, y.hi ^ y.lo);

    // 256-bit product [x3:x2:x1:x0].
    let x0 = l0;
    let x1 = l1 ^ m0 ^ h0 ^ l0;
    let x2 = h0 ^ m1 ^ h1 ^ l1;
    let x3 = h1;

    // [A1:A0] = X0 • POLY
    let (a1, a0) = ctmul(x0, POLY);

    // [B1:B0] = [X0 ⊕ A1 : X1 ⊕ A0]
    let b1 = x0 ^ a1;
    let b0 = x1 ^ a0;

    // [C1:C0] = B0 • POLY
    let (c1, c0) = ctmul(b0, POLY);

    // [D1:D0] = [B0 ⊕ C1 : B1 ⊕ C0]
    let d1 = b0 ^ c1;
    let d0 = b1 ^ c0;

    FieldElement {
        hi: d1 ^ x3,
        lo: d0 ^ x2,
    }
}

/// Full 128-bit carry-less product of `x` and `y`, as `(hi, lo)`.
///
/// The high half is the low half of the product of the bit-reversed
/// operands, reversed again and shifted down by one.
#[inline]
pub(super) fn ctmul(x: u64, y: u64) -> (u64, u64) {
    let lo = bmul64(x, y);
    let hi = bmul64(x.reverse_bits(), y.reverse_bits()).reverse_bits() >> 1;
    (hi, lo)
}

/// Low 64 bits of the carry-less product of `x` and `y`.
#[inline]
fn bmul64(x: u64, y: u64) -> u64 {
    const M0: u64 = 0x1111_1111_1111_1111;
    const M1: u64 = 0x2222_2222_2222_2222;
    const M2: u64 = 0x4444_4444_4444_4444;
    const M3: u64 = 0x8888_8888_8888_8888;

    let x0 = x & M0;
    let x1 = x & M1;
    let x2 = x & M2;
    let x3 = x & M3;
    let y0 = y & M0;
    let y1 = y & M1;
    let y2 = y & M2;
    let y3 = y & M3;

    let z0 = x0.wrapping_mul(y0)
        ^ x1.wrapping_mul(y3)
        ^ x2.wrapping_mul(y2)
        ^ x3.wrapping_mul(y1);
    let z1 = x0.wrapping_mul(y1)
        ^ x1.wrapping_mul(y0)
        ^ x2.wrapping_mul(y3)
        ^ x3.wrapping_mul(y2);
    let z2 = x0.wrapping_mul(y2)
        ^ x1.wrapping_mul(y1)
        ^ x2.wrapping_mul(y0)
        ^ x3.wrapping_mul(y3);
    let z3 = x0.wrapping_mul(y3)
        ^ x1.wrapping_mul(y2)
        ^ x2.wrapping_mul(y1)
        ^ x3.wrapping_mul(y0);

    (z0 & M0) | (z1 & M1) | (z2 & M2) | (z3 & M3)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Bit-by-bit reference; branches on data, test only.
    fn clmul_reference(x: u64, y: u64) -> u128 {
        let mut acc = 0u128;
        for i in 0..64 {
            if (y >> i) & 1 == 1 {
                acc ^= u128::from(x) << i;
            }
        }
        acc
    }

    #[test]
    fn ctmul_matches_reference() {
        let samples = [
            0u64,
            1,
            u64::MAX,
            POLY,
            0x8000_0000_0000_0001,
            0x1111_1111_1111_1111,
            0xdead_beef_cafe_babe,
            0x0123_4567_89ab_cdef,
        ];
        for &x in &samples {
            for &y in &samples {
                let (hi, lo) = ctmul(x, y);
                let want = clmul_reference(x, y);
                assert_eq!((u128::from(hi) << 64) | u128::from(lo), want, "{x:#x} * {y:#x}");
            }
        }
    }

    #[test]
    fn ctmul_all_ones_squares() {
        // Squaring spreads bits into even positions only.
        let (hi, lo) = ctmul(u64::MAX, u64::MAX);
        assert_eq!(hi, 0x5555_5555_5555_5555);
        assert_eq!(lo, 0x5555_5555_5555_5555);
    }
}
