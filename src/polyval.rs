//! POLYVAL universal hash with snapshot/restore of the running accumulator.
//!
//! `y ← (y ⊕ X_i) · h` for every 16-byte block `X_i`, as defined in
//! [RFC 8452 Section 3]. The key `h` is fixed for the lifetime of the hash;
//! only the accumulator `y` is mutable, and it can be captured with
//! [`Polyval::snapshot`] and put back with [`Polyval::restore`] so that a
//! common prefix is hashed once and reused for several suffixes.
//!
//! [RFC 8452 Section 3]: https://tools.ietf.org/html/rfc8452#section-3

use crate::common::{BLOCK_LENGTH, Block};
use crate::field::{Backend, FieldElement};

/// POLYVAL hash state.
#[derive(Clone)]
pub struct Polyval {
    h: FieldElement,
    y: FieldElement,
    backend: Backend,
}

/// Serialized accumulator of a [`Polyval`] instance.
///
/// Holds `y` verbatim; it does not contain the key.
#[derive(Clone, Copy, Default)]
pub struct State(Block);

impl State {
    /// Encoded length in bytes.
    pub const LENGTH: usize = BLOCK_LENGTH;

    /// Restore a state from its byte encoding.
    pub fn from_bytes(bytes: Block) -> Self {
        State(bytes)
    }

    /// Byte encoding of this state.
    pub fn to_bytes(&self) -> Block {
        self.0
    }
}

impl core::fmt::Debug for State {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("State(..)")
    }
}

#[cfg(feature = "zeroize")]
impl zeroize::Zeroize for State {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Polyval {
    /// Initialize POLYVAL with the key `h`, using the fastest available
    /// field backend.
    pub fn new(key: &Block) -> Self {
        Self::with_backend(key, Backend::detect())
    }

    /// Initialize POLYVAL with an explicit field backend.
    pub fn with_backend(key: &Block, backend: Backend) -> Self {
        Self {
            h: FieldElement::from_bytes(key),
            y: FieldElement::ZERO,
            backend,
        }
    }

    /// The field backend in use.
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Absorb a single block.
    #[inline]
    pub fn update_block(&mut self, block: &Block) {
        let x = FieldElement::from_bytes(block);
        self.y = self.backend.mul(self.y.xor(x), self.h);
    }

    /// Absorb `data`, zero-padding a trailing partial block.
    ///
    /// Zero padding is not injective across calls; callers that need an
    /// injective encoding append their own marker before calling this.
    pub fn update(&mut self, data: &[u8]) {
        let (blocks, tail) = data.as_chunks::<BLOCK_LENGTH>();
        for block in blocks {
            self.update_block(block);
        }
        if !tail.is_empty() {
            let mut block = [0u8; BLOCK_LENGTH];
            block[..tail.len()].copy_from_slice(tail);
            self.update_block(&block);
        }
    }

    /// Current hash value. Does not reset the state.
    pub fn sum(&self) -> Block {
        self.y.to_bytes()
    }

    /// Reset the accumulator to zero, keeping the key.
    pub fn reset(&mut self) {
        self.y = FieldElement::ZERO;
    }

    /// Capture the accumulator.
    pub fn snapshot(&self) -> State {
        State(self.y.to_bytes())
    }

    /// Replace the accumulator with a previously captured one.
    pub fn restore(&mut self, state: &State) {
        self.y = FieldElement::from_bytes(&state.0);
    }
}

impl core::fmt::Debug for Polyval {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Polyval")
            .field("backend", &self.backend)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "zeroize")]
impl Drop for Polyval {
    fn drop(&mut self) {
        use zeroize::Zeroize;
        self.h.zeroize();
        self.y.zeroize();
    }
}
