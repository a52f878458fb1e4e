//! PCLMULQDQ backend for x86 and x86-64.

#![allow(unsafe_op_in_unsafe_fn)]

#[cfg(target_arch = "x86")]
use core::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use core::arch::x86_64::*;

use super::{FieldElement, POLY};

cpufeatures::new!(clmul_cpuid, "pclmulqdq", "sse2");

pub(super) fn available() -> bool {
    clmul_cpuid::get()
}

/// Karatsuba multiplication and two-step Montgomery reduction with 128-bit
/// registers; lane 0 holds the low 64 bits.
///
/// # Safety
/// Requires PCLMULQDQ and SSE2 support.
#[target_feature(enable = "pclmulqdq", enable = "sse2")]
pub(super) unsafe fn mul(x: FieldElement, y: FieldElement) -> FieldElement {
    let a = load(x);
    let b = load(y);

    let h = _mm_clmulepi64_si128(a, b, 0x11);
    let l = _mm_clmulepi64_si128(a, b, 0x00);

    // Lane 0 of each operand becomes hi ^ lo.
    let a_m = _mm_xor_si128(a, _mm_shuffle_epi32(a, 0x4e));
    let b_m = _mm_xor_si128(b, _mm_shuffle_epi32(b, 0x4e));
    let m = _mm_clmulepi64_si128(a_m, b_m, 0x00);
    let m = _mm_xor_si128(m, _mm_xor_si128(h, l));

    // [x1:x0] and [x3:x2]
    let lo = _mm_xor_si128(l, _mm_slli_si128(m, 8));
    let hi = _mm_xor_si128(h, _mm_srli_si128(m, 8));

    #[allow(clippy::cast_possible_wrap)]
    let poly = _mm_set_epi64x(0, POLY as i64);

    // [A1:A0] = X0 • POLY, then [B1:B0] = [X0 ⊕ A1 : X1 ⊕ A0]
    let t = _mm_clmulepi64_si128(lo, poly, 0x00);
    let t = _mm_xor_si128(_mm_shuffle_epi32(lo, 0x4e), t);

    // [C1:C0] = B0 • POLY, then [D1:D0] = [B0 ⊕ C1 : B1 ⊕ C0]
    let c = _mm_clmulepi64_si128(t, poly, 0x00);
    let d = _mm_xor_si128(_mm_shuffle_epi32(t, 0x4e), c);

    store(_mm_xor_si128(d, hi))
}

#[target_feature(enable = "sse2")]
#[inline]
#[allow(clippy::cast_possible_wrap)]
unsafe fn load(fe: FieldElement) -> __m128i {
    _mm_set_epi64x(fe.hi as i64, fe.lo as i64)
}

#[target_feature(enable = "sse2")]
#[inline]
unsafe fn store(reg: __m128i) -> FieldElement {
    let mut out = [0u8; 16];
    _mm_storeu_si128(out.as_mut_ptr().cast(), reg);
    FieldElement::from_bytes(&out)
}
