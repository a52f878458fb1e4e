//! Common definitions shared by the hash, keystream and cipher layers.

/// Unified error type for HCTR2 construction and calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The block cipher reports a block size other than [`BLOCK_LENGTH`].
    InvalidBlockSize(usize),
    /// An AES key is not 16, 24 or 32 bytes long.
    InvalidKeyLength(usize),
    /// Input is shorter than one block.
    InputTooShort,
    /// Output buffer is shorter than the input.
    OutputTooShort,
    /// Tweak is too long for its bit length to be encoded in the hash header.
    TweakTooLong,
}

impl Error {
    /// Returns `true` for errors caused by the arguments of an
    /// encrypt/decrypt call rather than by the supplied block cipher or key.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Error::InputTooShort | Error::OutputTooShort | Error::TweakTooLong
        )
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidBlockSize(n) => write!(f, "invalid block size: {n}"),
            Error::InvalidKeyLength(n) => write!(f, "invalid AES key length: {n}"),
            Error::InputTooShort => write!(f, "input is smaller than the block size"),
            Error::OutputTooShort => write!(f, "output is smaller than the input"),
            Error::TweakTooLong => write!(f, "tweak too long"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Block length in bytes. HCTR2 is only defined for 128-bit block ciphers.
pub const BLOCK_LENGTH: usize = 16;

/// A single 16-byte block.
pub type Block = [u8; BLOCK_LENGTH];

/// Direction of the block cipher call in the middle of HCTR2.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// XOR two 16-byte blocks, storing result in the first argument.
#[inline]
pub fn xor_block(dst: &mut Block, src: &Block) {
    for i in 0..BLOCK_LENGTH {
        dst[i] ^= src[i];
    }
}

/// XOR two 16-byte blocks, returning a new block.
#[inline]
pub fn xor_blocks(a: &Block, b: &Block) -> Block {
    let mut result = *a;
    xor_block(&mut result, b);
    result
}

/// XOR three 16-byte blocks, returning a new block.
#[inline]
pub fn xor_blocks_3(a: &Block, b: &Block, c: &Block) -> Block {
    let mut result = [0u8; BLOCK_LENGTH];
    for i in 0..BLOCK_LENGTH {
        result[i] = a[i] ^ b[i] ^ c[i];
    }
    result
}

/// XOR the first `dst.len()` bytes of `keystream` into `dst`.
#[inline]
pub fn xor_partial(dst: &mut [u8], keystream: &Block) {
    debug_assert!(dst.len() <= BLOCK_LENGTH);
    for (d, k) in dst.iter_mut().zip(keystream) {
        *d ^= k;
    }
}

/// Little-endian 128-bit encoding of a 64-bit integer, `bin64(v) || 0^64`.
#[inline]
pub fn bin64(v: u64) -> Block {
    let mut block = [0u8; BLOCK_LENGTH];
    block[..8].copy_from_slice(&v.to_le_bytes());
    block
}
