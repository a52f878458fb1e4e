//! Arithmetic in POLYVAL's field.
//!
//! From [RFC 8452 Section 3]: POLYVAL operates in a binary field of size
//! 2^128 defined by the irreducible polynomial x^128 + x^127 + x^126 + x^121 + 1.
//! Addition is XOR; multiplication is carry-less polynomial multiplication
//! followed by a Montgomery-style reduction, so `a * b` yields `a·b·x^-128`.
//!
//! Two interchangeable backends compute the product:
//! - a portable, constant-time software implementation, always available;
//! - a carry-less multiply instruction backend (PCLMULQDQ on x86/x86-64,
//!   PMULL on AArch64) selected at runtime by [`Backend::detect`].
//!
//! Both produce bit-identical results for every input.
//!
//! [RFC 8452 Section 3]: https://tools.ietf.org/html/rfc8452#section-3

mod soft;

#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
mod x86;
#[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
use x86 as clmul;

#[cfg(target_arch = "aarch64")]
mod armv8;
#[cfg(target_arch = "aarch64")]
use armv8 as clmul;

use core::fmt;
use core::ops::{Add, Mul};

use crate::common::{BLOCK_LENGTH, Block};

/// Reduction constant: x^63 + x^62 + x^57.
pub(crate) const POLY: u64 = 0xc200_0000_0000_0000;

/// An element of GF(2^128) as two little-endian 64-bit halves.
#[derive(Clone, Copy, Default)]
#[cfg_attr(test, derive(PartialEq, Eq))]
pub struct FieldElement {
    pub(crate) hi: u64,
    pub(crate) lo: u64,
}

impl FieldElement {
    /// The additive identity.
    pub const ZERO: Self = Self { hi: 0, lo: 0 };

    /// Load an element from its 16-byte little-endian encoding.
    #[inline]
    pub fn from_bytes(bytes: &Block) -> Self {
        let (lo, hi) = bytes.split_at(8);
        let mut lo_bytes = [0u8; 8];
        let mut hi_bytes = [0u8; 8];
        lo_bytes.copy_from_slice(lo);
        hi_bytes.copy_from_slice(hi);
        Self {
            hi: u64::from_le_bytes(hi_bytes),
            lo: u64::from_le_bytes(lo_bytes),
        }
    }

    /// Serialize as 16 little-endian bytes.
    #[inline]
    pub fn to_bytes(self) -> Block {
        let mut out = [0u8; BLOCK_LENGTH];
        out[..8].copy_from_slice(&self.lo.to_le_bytes());
        out[8..].copy_from_slice(&self.hi.to_le_bytes());
        out
    }

    /// Field addition.
    #[inline]
    pub fn xor(self, rhs: Self) -> Self {
        Self {
            hi: self.hi ^ rhs.hi,
            lo: self.lo ^ rhs.lo,
        }
    }

    /// POLYVAL multiplication using the portable backend.
    #[inline]
    pub fn multiply(self, rhs: Self) -> Self {
        soft::mul(self, rhs)
    }

    /// Multiply by `x` (`mulX_POLYVAL` from RFC 8452 Appendix A).
    ///
    /// This is a plain doubling, not a Montgomery product.
    pub fn double(self) -> Self {
        let carry = self.hi >> 63;

        let mut hi = (self.hi << 1) | (self.lo >> 63);
        let mut lo = self.lo << 1;

        // x^128 = x^127 + x^126 + x^121 + 1
        lo ^= carry;
        hi ^= carry << 63;
        hi ^= carry << 62;
        hi ^= carry << 57;

        Self { hi, lo }
    }
}

impl From<u128> for FieldElement {
    #[inline]
    fn from(x: u128) -> Self {
        Self {
            hi: (x >> 64) as u64,
            lo: x as u64,
        }
    }
}

impl From<FieldElement> for u128 {
    #[inline]
    fn from(fe: FieldElement) -> Self {
        (u128::from(fe.hi) << 64) | u128::from(fe.lo)
    }
}

impl Add for FieldElement {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.xor(rhs)
    }
}

impl Mul for FieldElement {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.multiply(rhs)
    }
}

impl fmt::Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement({:#018x}{:016x})", self.hi, self.lo)
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::Zeroize for FieldElement {
    fn zeroize(&mut self) {
        self.hi.zeroize();
        self.lo.zeroize();
    }
}

/// Field multiplication strategy.
///
/// A `Backend` that reports [`is_accelerated`](Backend::is_accelerated) can
/// only be obtained from [`Backend::detect`] on a CPU that has the required
/// instructions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Backend(Kind);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Portable,
    #[cfg(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))]
    Clmul,
}

impl Backend {
    /// The constant-time software backend.
    pub const fn portable() -> Self {
        Backend(Kind::Portable)
    }

    /// The fastest backend supported by the running CPU.
    pub fn detect() -> Self {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))]
        if clmul::available() {
            return Backend(Kind::Clmul);
        }
        Self::portable()
    }

    /// Whether this backend uses carry-less multiply instructions.
    pub fn is_accelerated(self) -> bool {
        self.0 != Kind::Portable
    }

    /// Computes `x * y` in POLYVAL's field.
    #[inline]
    pub fn mul(self, x: FieldElement, y: FieldElement) -> FieldElement {
        match self.0 {
            Kind::Portable => soft::mul(x, y),
            #[cfg(any(target_arch = "x86", target_arch = "x86_64", target_arch = "aarch64"))]
            // SAFETY: `Kind::Clmul` is only constructed after runtime detection.
            Kind::Clmul => unsafe { clmul::mul(x, y) },
        }
    }
}

impl Default for Backend {
    fn default() -> Self {
        Self::detect()
    }
}
