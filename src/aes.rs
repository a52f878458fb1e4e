//! AES adapters for the [`BlockCipher`] capability.
//!
//! The `aes` crate picks AES-NI / ARMv8 AES rounds at runtime on its own.
//! All three key sizes additionally expose the wide XCTR hook.

use ::aes::cipher::{BlockDecrypt, BlockEncrypt, KeyInit, generic_array::GenericArray};

pub use ::aes::{Aes128, Aes192, Aes256};

use crate::block::{BlockCipher, Xctr};
use crate::common::{BLOCK_LENGTH, Block, Error};
use crate::xctr;

macro_rules! impl_aes_block_cipher {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl BlockCipher for $ty {
                #[inline]
                fn block_size(&self) -> usize {
                    BLOCK_LENGTH
                }

                #[inline]
                fn encrypt_block(&self, dst: &mut Block, src: &Block) {
                    BlockEncrypt::encrypt_block_b2b(
                        self,
                        GenericArray::from_slice(src),
                        GenericArray::from_mut_slice(dst),
                    );
                }

                #[inline]
                fn decrypt_block(&self, dst: &mut Block, src: &Block) {
                    BlockDecrypt::decrypt_block_b2b(
                        self,
                        GenericArray::from_slice(src),
                        GenericArray::from_mut_slice(dst),
                    );
                }

                fn as_xctr(&self) -> Option<&dyn Xctr> {
                    Some(self)
                }
            }

            impl Xctr for $ty {
                fn apply_xctr(&self, buf: &mut [u8], nonce: &Block) {
                    xctr::apply_wide(self, buf, nonce);
                }
            }
        )+
    };
}

impl_aes_block_cipher!(Aes128, Aes192, Aes256);

/// AES with the key size chosen at runtime from the key length.
#[derive(Clone)]
pub enum Aes {
    /// 16-byte key.
    Aes128(Aes128),
    /// 24-byte key.
    Aes192(Aes192),
    /// 32-byte key.
    Aes256(Aes256),
}

macro_rules! dispatch {
    ($aes:expr, $inner:ident => $body:expr) => {
        match $aes {
            Aes::Aes128($inner) => $body,
            Aes::Aes192($inner) => $body,
            Aes::Aes256($inner) => $body,
        }
    };
}

impl Aes {
    /// Create an AES instance from a 16, 24 or 32 byte key.
    ///
    /// # Errors
    /// Returns `Error::InvalidKeyLength` for any other key length.
    pub fn new(key: &[u8]) -> Result<Self, Error> {
        let invalid = |_| Error::InvalidKeyLength(key.len());
        match key.len() {
            16 => Ok(Aes::Aes128(Aes128::new_from_slice(key).map_err(invalid)?)),
            24 => Ok(Aes::Aes192(Aes192::new_from_slice(key).map_err(invalid)?)),
            32 => Ok(Aes::Aes256(Aes256::new_from_slice(key).map_err(invalid)?)),
            n => Err(Error::InvalidKeyLength(n)),
        }
    }

    /// Key length in bytes.
    pub fn key_length(&self) -> usize {
        match self {
            Aes::Aes128(_) => 16,
            Aes::Aes192(_) => 24,
            Aes::Aes256(_) => 32,
        }
    }
}

impl core::fmt::Debug for Aes {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Aes{}", self.key_length() * 8)
    }
}

impl BlockCipher for Aes {
    #[inline]
    fn block_size(&self) -> usize {
        BLOCK_LENGTH
    }

    #[inline]
    fn encrypt_block(&self, dst: &mut Block, src: &Block) {
        dispatch!(self, aes => BlockCipher::encrypt_block(aes, dst, src))
    }

    #[inline]
    fn decrypt_block(&self, dst: &mut Block, src: &Block) {
        dispatch!(self, aes => BlockCipher::decrypt_block(aes, dst, src))
    }

    fn as_xctr(&self) -> Option<&dyn Xctr> {
        Some(self)
    }
}

impl Xctr for Aes {
    fn apply_xctr(&self, buf: &mut [u8], nonce: &Block) {
        dispatch!(self, aes => xctr::apply_wide(aes, buf, nonce))
    }
}
