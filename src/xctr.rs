//! XCTR: the little-endian counter mode used inside HCTR2.
//!
//! Keystream block `i` (starting at 1) is `E_k(bin(i) ⊕ nonce)`, where
//! `bin(i)` is `i` as a 64-bit little-endian integer padded with zeros to a
//! full block. Counter 0 is never used. The keystream is consumed byte for
//! byte, so the final partial block only uses as many bytes as remain.
//!
//! XCTR is its own inverse.

use ::aes::cipher::{BlockEncrypt, consts::U16};

use crate::block::BlockCipher;
use crate::common::{BLOCK_LENGTH, Block, bin64, xor_block, xor_blocks, xor_partial};

/// Number of counter blocks the wide path encrypts per block cipher call.
pub const WIDE_STRIDE: usize = 4;

/// Which XCTR implementation a [`Cipher`](crate::Cipher) dispatches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeystreamPath {
    /// One block cipher call per 16-byte block.
    Generic,
    /// The block cipher's own [`Xctr`](crate::block::Xctr) hook.
    Accelerated,
}

#[inline]
fn counter_block(i: u64, nonce: &Block) -> Block {
    xor_blocks(&bin64(i), nonce)
}

/// XOR the XCTR keystream into `buf`, preferring the block cipher's
/// accelerated hook when it has one.
pub fn apply_keystream<B: BlockCipher + ?Sized>(block: &B, buf: &mut [u8], nonce: &Block) {
    match block.as_xctr() {
        Some(hook) => hook.apply_xctr(buf, nonce),
        None => apply_keystream_generic(block, buf, nonce),
    }
}

/// XOR the XCTR keystream into `buf` one block at a time.
pub fn apply_keystream_generic<B: BlockCipher + ?Sized>(
    block: &B,
    buf: &mut [u8],
    nonce: &Block,
) {
    let mut ctr = [0u8; BLOCK_LENGTH];
    generic(block, buf, nonce, &mut ctr);
}

/// Generic path writing each counter block through caller-owned scratch.
pub(crate) fn generic<B: BlockCipher + ?Sized>(
    block: &B,
    buf: &mut [u8],
    nonce: &Block,
    ctr: &mut Block,
) {
    let (blocks, tail) = buf.as_chunks_mut::<BLOCK_LENGTH>();
    let mut i: u64 = 1;

    for chunk in blocks {
        *ctr = counter_block(i, nonce);
        block.encrypt_block_in_place(ctr);
        xor_block(chunk, ctr);
        i += 1;
    }

    if !tail.is_empty() {
        *ctr = counter_block(i, nonce);
        block.encrypt_block_in_place(ctr);
        xor_partial(tail, ctr);
    }
}

/// Wide path: [`WIDE_STRIDE`] counter blocks per call to the block
/// cipher's multi-block encryption, which lets the `aes` crate pipeline
/// its rounds.
pub(crate) fn apply_wide<C>(cipher: &C, buf: &mut [u8], nonce: &Block)
where
    C: BlockEncrypt<BlockSize = U16>,
{
    let mut keystream: [::aes::Block; WIDE_STRIDE] = Default::default();
    let mut i: u64 = 1;

    for group in buf.chunks_mut(WIDE_STRIDE * BLOCK_LENGTH) {
        let n = group.len().div_ceil(BLOCK_LENGTH);
        for (j, ks) in keystream[..n].iter_mut().enumerate() {
            ks.copy_from_slice(&counter_block(i + j as u64, nonce));
        }
        cipher.encrypt_blocks(&mut keystream[..n]);

        for (chunk, ks) in group.chunks_mut(BLOCK_LENGTH).zip(&keystream) {
            for (b, k) in chunk.iter_mut().zip(ks.iter()) {
                *b ^= k;
            }
        }
        i += n as u64;
    }
}
