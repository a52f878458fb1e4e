//! PMULL backend for AArch64.

#![allow(unsafe_op_in_unsafe_fn)]

use core::arch::aarch64::*;

use super::{FieldElement, POLY};

// PMULL is part of the "aes" extension.
cpufeatures::new!(pmull_cpuid, "aes");

pub(super) fn available() -> bool {
    pmull_cpuid::get()
}

/// Same Karatsuba and reduction schedule as the portable backend, with each
/// 64x64 carry-less product done by a single `PMULL`.
///
/// # Safety
/// Requires NEON and the AES extension.
#[target_feature(enable = "neon", enable = "aes")]
pub(super) unsafe fn mul(x: FieldElement, y: FieldElement) -> FieldElement {
    let (h1, h0) = pmull(x.hi, y.hi);
    let (l1, l0) = pmull(x.lo, y.lo);
    let (m1, m0) = pmull(x.hi ^ x.lo, y.hi ^ y.lo);

    let x0 = l0;
    let x1 = l1 ^ m0 ^ h0 ^ l0;
    let x2 = h0 ^ m1 ^ h1 ^ l1;
    let x3 = h1;

    let (a1, a0) = pmull(x0, POLY);
    let b1 = x0 ^ a1;
    let b0 = x1 ^ a0;

    let (c1, c0) = pmull(b0, POLY);
    let d1 = b0 ^ c1;
    let d0 = b1 ^ c0;

    FieldElement {
        hi: d1 ^ x3,
        lo: d0 ^ x2,
    }
}

#[target_feature(enable = "neon", enable = "aes")]
#[inline]
unsafe fn pmull(a: u64, b: u64) -> (u64, u64) {
    let product: u128 = vmull_p64(a, b);
    ((product >> 64) as u64, product as u64)
}
