//! Block cipher capability consumed by HCTR2.
//!
//! HCTR2 needs a 128-bit block cipher with both directions. A cipher may
//! also expose a bulk XCTR routine through [`BlockCipher::as_xctr`]; the
//! HCTR2 layer probes for it once at construction and prefers it over
//! encrypting counter blocks one at a time.

use crate::common::Block;

/// Minimal block cipher contract.
pub trait BlockCipher {
    /// Block size in bytes. HCTR2 only accepts 16.
    fn block_size(&self) -> usize;

    /// Encrypt `src` into `dst`.
    fn encrypt_block(&self, dst: &mut Block, src: &Block);

    /// Decrypt `src` into `dst`.
    fn decrypt_block(&self, dst: &mut Block, src: &Block);

    /// Encrypt a block in place.
    #[inline]
    fn encrypt_block_in_place(&self, block: &mut Block) {
        let src = *block;
        self.encrypt_block(block, &src);
    }

    /// Decrypt a block in place.
    #[inline]
    fn decrypt_block_in_place(&self, block: &mut Block) {
        let src = *block;
        self.decrypt_block(block, &src);
    }

    /// Optional accelerated XCTR capability.
    ///
    /// [`Cipher`](crate::Cipher) probes this once at construction to pick
    /// its keystream path, so the answer must not change over the lifetime
    /// of the block cipher.
    fn as_xctr(&self) -> Option<&dyn Xctr> {
        None
    }
}

/// Bulk XCTR keystream generation.
///
/// Implementations must be byte-for-byte identical to
/// [`crate::xctr::apply_keystream_generic`] for every length and nonce.
pub trait Xctr {
    /// XOR the keystream `E(bin(i) ⊕ nonce)`, `i = 1, 2, ...`, into `buf`.
    fn apply_xctr(&self, buf: &mut [u8], nonce: &Block);
}

impl<B: BlockCipher + ?Sized> BlockCipher for &B {
    #[inline]
    fn block_size(&self) -> usize {
        (**self).block_size()
    }

    #[inline]
    fn encrypt_block(&self, dst: &mut Block, src: &Block) {
        (**self).encrypt_block(dst, src)
    }

    #[inline]
    fn decrypt_block(&self, dst: &mut Block, src: &Block) {
        (**self).decrypt_block(dst, src)
    }

    fn as_xctr(&self) -> Option<&dyn Xctr> {
        (**self).as_xctr()
    }
}
