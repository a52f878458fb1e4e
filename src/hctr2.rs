//! HCTR2 (Hash-CTR-Hash) length-preserving wide-block tweakable cipher.
//!
//! HCTR2 provides full-block diffusion: any change to plaintext affects the entire ciphertext.
//! It requires no nonce or authentication tag, making it suitable for constrained environments.
//!
//! Construction uses:
//! - Single block cipher key
//! - POLYVAL universal hash function
//! - XCTR mode for wide-block encryption (counter-based)
//!
//! Security properties:
//! - Ciphertext length equals plaintext length (no expansion)
//! - Requires unique (key, tweak) pairs for security
//! - No authentication - consider AEAD if integrity protection is needed
//! - Minimum message length: 16 bytes (one block)

use crate::aes::{Aes, Aes128, Aes192, Aes256};
use crate::block::BlockCipher;
use crate::common::{BLOCK_LENGTH, Block, Direction, Error, bin64, xor_blocks, xor_blocks_3};
use crate::field::Backend;
use crate::polyval::{Polyval, State};
use crate::xctr::{self, KeystreamPath};

/// Selects the field multiplication and XCTR implementations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Acceleration {
    /// Carry-less multiply instructions when the CPU has them, and the block
    /// cipher's XCTR hook when it exposes one.
    #[default]
    Auto,
    /// Constant-time software field multiplication and one block cipher
    /// call per keystream block.
    Portable,
}

/// Hash states right after absorbing the length header, for one tweak length.
#[derive(Clone)]
struct TweakCache {
    tweak_len: usize,
    /// Trailing segment length is a multiple of the block size.
    aligned: State,
    /// Trailing segment length is not a multiple of the block size.
    unaligned: State,
}

impl TweakCache {
    fn state(&self, aligned: bool) -> State {
        if aligned { self.aligned } else { self.unaligned }
    }
}

/// HCTR2 over a 128-bit block cipher.
///
/// Encryption and decryption reuse scratch blocks and a tweak-header cache
/// stored in the instance, hence `&mut self`. Use one instance per thread,
/// or serialize access to a shared one. The block cipher itself may be
/// shared by lending a reference (`Cipher<&B>`).
pub struct Cipher<B> {
    block: B,
    hash: Polyval,
    keystream: KeystreamPath,
    /// E_k(bin(1)).
    l: Block,
    /// Output of the most recent polyhash.
    sum: Block,
    /// M ⊕ H_h(T, N).
    mm: Block,
    /// E_k(MM), or D_k(MM) when decrypting.
    uu: Block,
    /// MM ⊕ UU ⊕ L, the XCTR nonce.
    s: Block,
    /// XCTR counter block for the generic path.
    ctr: Block,
    cache: Option<TweakCache>,
}

/// HCTR2 with AES-128 encryption.
#[allow(non_camel_case_types)]
pub type Hctr2_128 = Cipher<Aes128>;

/// HCTR2 with AES-192 encryption.
#[allow(non_camel_case_types)]
pub type Hctr2_192 = Cipher<Aes192>;

/// HCTR2 with AES-256 encryption.
#[allow(non_camel_case_types)]
pub type Hctr2_256 = Cipher<Aes256>;

/// HCTR2 with the AES key size picked from the key length.
pub type Hctr2Aes = Cipher<Aes>;

impl Cipher<Aes> {
    /// Initialize HCTR2 with AES-128, AES-192 or AES-256 depending on
    /// whether `key` is 16, 24 or 32 bytes long.
    ///
    /// # Errors
    /// Returns `Error::InvalidKeyLength` for any other key length.
    pub fn new_aes(key: &[u8]) -> Result<Self, Error> {
        Self::new(Aes::new(key)?)
    }
}

impl<B: BlockCipher> Cipher<B> {
    /// Block length in bytes (always 16).
    pub const BLOCK_LENGTH: usize = BLOCK_LENGTH;

    /// Minimum input length in bytes.
    pub const MIN_INPUT_LENGTH: usize = BLOCK_LENGTH;

    /// Initialize HCTR2 over `block`, using hardware acceleration when
    /// available.
    ///
    /// # Errors
    /// Returns `Error::InvalidBlockSize` if the block cipher's block size is
    /// not 16 bytes.
    pub fn new(block: B) -> Result<Self, Error> {
        Self::with_acceleration(block, Acceleration::Auto)
    }

    /// Initialize HCTR2 with an explicit acceleration policy.
    ///
    /// # Errors
    /// Returns `Error::InvalidBlockSize` if the block cipher's block size is
    /// not 16 bytes.
    pub fn with_acceleration(block: B, acceleration: Acceleration) -> Result<Self, Error> {
        let size = block.block_size();
        if size != BLOCK_LENGTH {
            return Err(Error::InvalidBlockSize(size));
        }

        let (backend, keystream) = match acceleration {
            Acceleration::Auto => {
                let keystream = match block.as_xctr() {
                    Some(_) => KeystreamPath::Accelerated,
                    None => KeystreamPath::Generic,
                };
                (Backend::detect(), keystream)
            }
            Acceleration::Portable => (Backend::portable(), KeystreamPath::Generic),
        };

        // h ← E_k(bin(0))
        let mut h = [0u8; BLOCK_LENGTH];
        block.encrypt_block_in_place(&mut h);

        // L ← E_k(bin(1))
        let mut l = bin64(1);
        block.encrypt_block_in_place(&mut l);

        tracing::debug!(
            clmul = backend.is_accelerated(),
            keystream = ?keystream,
            "initialized HCTR2 cipher"
        );

        let hash = Polyval::with_backend(&h, backend);
        #[cfg(feature = "zeroize")]
        zeroize::Zeroize::zeroize(&mut h);

        Ok(Self {
            block,
            hash,
            keystream,
            l,
            sum: [0u8; BLOCK_LENGTH],
            mm: [0u8; BLOCK_LENGTH],
            uu: [0u8; BLOCK_LENGTH],
            s: [0u8; BLOCK_LENGTH],
            ctr: [0u8; BLOCK_LENGTH],
            cache: None,
        })
    }

    /// The underlying block cipher.
    pub fn block_cipher(&self) -> &B {
        &self.block
    }

    /// The field multiplication backend in use.
    pub fn field_backend(&self) -> Backend {
        self.hash.backend()
    }

    /// The XCTR implementation in use.
    pub fn keystream_path(&self) -> KeystreamPath {
        self.keystream
    }

    /// Encrypt `plaintext` with `tweak`, writing `plaintext.len()` bytes to
    /// the start of `ciphertext`.
    ///
    /// # Errors
    /// - `Error::InputTooShort` if plaintext is less than 16 bytes.
    /// - `Error::OutputTooShort` if ciphertext is shorter than plaintext.
    /// - `Error::TweakTooLong` if the tweak's bit length cannot be encoded.
    ///
    /// Nothing is written on error.
    pub fn encrypt(
        &mut self,
        ciphertext: &mut [u8],
        plaintext: &[u8],
        tweak: &[u8],
    ) -> Result<(), Error> {
        let buf = stage(ciphertext, plaintext, tweak)?;
        self.hctr2(buf, tweak, Direction::Encrypt)
    }

    /// Decrypt `ciphertext` with `tweak`, writing `ciphertext.len()` bytes
    /// to the start of `plaintext`.
    ///
    /// # Errors
    /// - `Error::InputTooShort` if ciphertext is less than 16 bytes.
    /// - `Error::OutputTooShort` if plaintext is shorter than ciphertext.
    /// - `Error::TweakTooLong` if the tweak's bit length cannot be encoded.
    ///
    /// Nothing is written on error.
    pub fn decrypt(
        &mut self,
        plaintext: &mut [u8],
        ciphertext: &[u8],
        tweak: &[u8],
    ) -> Result<(), Error> {
        let buf = stage(plaintext, ciphertext, tweak)?;
        self.hctr2(buf, tweak, Direction::Decrypt)
    }

    /// Encrypt `data` in place.
    ///
    /// # Errors
    /// Same as [`encrypt`](Self::encrypt), minus `OutputTooShort`.
    pub fn encrypt_in_place(&mut self, data: &mut [u8], tweak: &[u8]) -> Result<(), Error> {
        check(data, tweak)?;
        self.hctr2(data, tweak, Direction::Encrypt)
    }

    /// Decrypt `data` in place.
    ///
    /// # Errors
    /// Same as [`decrypt`](Self::decrypt), minus `OutputTooShort`.
    pub fn decrypt_in_place(&mut self, data: &mut [u8], tweak: &[u8]) -> Result<(), Error> {
        check(data, tweak)?;
        self.hctr2(data, tweak, Direction::Decrypt)
    }

    fn hctr2(&mut self, buf: &mut [u8], tweak: &[u8], direction: Direction) -> Result<(), Error> {
        // M || N ← P, |M| = n
        let Some((m, n)) = buf.split_first_chunk_mut::<BLOCK_LENGTH>() else {
            return Err(Error::InputTooShort);
        };

        self.init_tweak(tweak, n.len())?;
        // The state after the tweak is shared by both hashes.
        let after_tweak = self.hash.snapshot();

        // MM ← M ⊕ H_h(T, N)
        self.polyhash(n);
        self.mm = xor_blocks(m, &self.sum);

        // UU ← E_k(MM)
        match direction {
            Direction::Encrypt => self.block.encrypt_block(&mut self.uu, &self.mm),
            Direction::Decrypt => self.block.decrypt_block(&mut self.uu, &self.mm),
        }

        // S ← MM ⊕ UU ⊕ L
        self.s = xor_blocks_3(&self.mm, &self.uu, &self.l);

        // V ← N ⊕ XCTR_k(S)[0;|N|]
        match self.keystream {
            KeystreamPath::Generic => xctr::generic(&self.block, n, &self.s, &mut self.ctr),
            // Re-borrow of the hook found at construction. A cipher that
            // withdraws it still gets the byte-identical generic keystream.
            KeystreamPath::Accelerated => match self.block.as_xctr() {
                Some(hook) => hook.apply_xctr(n, &self.s),
                None => xctr::generic(&self.block, n, &self.s, &mut self.ctr),
            },
        }

        // U ← UU ⊕ H_h(T, V)
        self.hash.restore(&after_tweak);
        self.polyhash(n);
        *m = xor_blocks(&self.uu, &self.sum);

        Ok(())
    }

    /// Leaves the hash holding `bin(2·|T| + 2 + r) || pad(T)`, where `r`
    /// is 1 when the trailing segment is not block aligned.
    fn init_tweak(&mut self, tweak: &[u8], n: usize) -> Result<(), Error> {
        let aligned = n.is_multiple_of(BLOCK_LENGTH);

        let state = match &self.cache {
            Some(cache) if cache.tweak_len == tweak.len() => cache.state(aligned),
            _ => {
                let cache = self.header_states(tweak.len())?;
                let state = cache.state(aligned);
                self.cache = Some(cache);
                state
            }
        };

        self.hash.restore(&state);
        self.hash.update(tweak);
        Ok(())
    }

    /// The length header depends only on |T| and on whether the hashed
    /// segment is block aligned, so both variants are computed together.
    fn header_states(&mut self, tweak_len: usize) -> Result<TweakCache, Error> {
        tracing::trace!(tweak_len, "computing tweak header states");

        let l = header_length(tweak_len)?;

        self.hash.reset();
        self.hash.update_block(&bin64(l));
        let aligned = self.hash.snapshot();

        self.hash.reset();
        self.hash.update_block(&bin64(l + 1));
        let unaligned = self.hash.snapshot();

        self.hash.reset();

        Ok(TweakCache {
            tweak_len,
            aligned,
            unaligned,
        })
    }

    /// Absorbs `src` with `1 || 0*` padding on a partial last block and
    /// stores the digest in `self.sum`.
    fn polyhash(&mut self, src: &[u8]) {
        let (blocks, tail) = src.as_chunks::<BLOCK_LENGTH>();
        for block in blocks {
            self.hash.update_block(block);
        }
        if !tail.is_empty() {
            let mut block = [0u8; BLOCK_LENGTH];
            block[..tail.len()].copy_from_slice(tail);
            block[tail.len()] = 1;
            self.hash.update_block(&block);
        }
        self.sum = self.hash.sum();
    }
}

/// `2·|T|·8 + 2`, the aligned-case length header.
fn header_length(tweak_len: usize) -> Result<u64, Error> {
    u64::try_from(tweak_len)
        .ok()
        .and_then(|len| len.checked_mul(16))
        .and_then(|l| l.checked_add(2))
        .ok_or(Error::TweakTooLong)
}

fn check(input: &[u8], tweak: &[u8]) -> Result<(), Error> {
    if input.len() < BLOCK_LENGTH {
        return Err(Error::InputTooShort);
    }
    header_length(tweak.len())?;
    Ok(())
}

/// Validates an out-of-place call and copies `src` into the prefix of
/// `dst` that the in-place transform then runs over.
fn stage<'a>(dst: &'a mut [u8], src: &[u8], tweak: &[u8]) -> Result<&'a mut [u8], Error> {
    check(src, tweak)?;
    let dst = dst.get_mut(..src.len()).ok_or(Error::OutputTooShort)?;
    dst.copy_from_slice(src);
    Ok(dst)
}

impl<B: core::fmt::Debug> core::fmt::Debug for Cipher<B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Cipher")
            .field("block", &self.block)
            .field("hash", &self.hash)
            .field("keystream", &self.keystream)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "zeroize")]
impl<B> Drop for Cipher<B> {
    fn drop(&mut self) {
        use zeroize::Zeroize;
        self.l.zeroize();
        self.sum.zeroize();
        self.mm.zeroize();
        self.uu.zeroize();
        self.s.zeroize();
        self.ctr.zeroize();
        if let Some(cache) = self.cache.as_mut() {
            cache.aligned.zeroize();
            cache.unaligned.zeroize();
        }
    }
}
