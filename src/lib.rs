//! HCTR2 length-preserving encryption library.
//!
//! This crate implements the HCTR2 wide-block tweakable cipher over any
//! 128-bit block cipher, together with the two primitives it is built from:
//! the POLYVAL universal hash and the XCTR counter mode.
//!
//! # Overview
//!
//! HCTR2 is a length-preserving encryption mode suitable for applications like:
//! - Full-disk encryption
//! - Filename encryption
//! - Database field encryption
//!
//! # Layout
//!
//! - [`field`]: GF(2^128) arithmetic in the POLYVAL convention, with a
//!   constant-time software multiplier and carry-less multiply backends
//!   for x86/x86_64 and aarch64
//! - [`polyval`]: POLYVAL with snapshot/restore of its accumulator
//! - [`block`]: the block cipher capability, with an optional bulk XCTR hook
//! - [`aes`]: AES-128/192/256 adapters
//! - [`xctr`]: XCTR keystream generation
//! - [`hctr2`]: the HCTR2 cipher
//!
//! # Quick Start
//!
//! ```rust
//! use hctr2::Hctr2Aes;
//!
//! let key = [0u8; 16];
//! let mut cipher = Hctr2Aes::new_aes(&key).unwrap();
//!
//! let plaintext = b"Hello, HCTR2 World!";
//! let tweak = b"unique tweak";
//!
//! let mut ciphertext = vec![0u8; plaintext.len()];
//! cipher.encrypt(&mut ciphertext, plaintext, tweak).unwrap();
//!
//! let mut decrypted = vec![0u8; plaintext.len()];
//! cipher.decrypt(&mut decrypted, &ciphertext, tweak).unwrap();
//! assert_eq!(plaintext.as_slice(), decrypted.as_slice());
//! ```
//!
//! A fixed key size can be chosen at the type level, and the acceleration
//! policy can be pinned:
//!
//! ```rust
//! use aes::cipher::KeyInit;
//! use hctr2::{Acceleration, Aes256, Cipher, Hctr2_256};
//!
//! let aes = Aes256::new_from_slice(&[7u8; 32]).unwrap();
//! let mut cipher: Hctr2_256 = Cipher::with_acceleration(aes, Acceleration::Portable).unwrap();
//!
//! let mut sector = [0x42u8; 512];
//! cipher.encrypt_in_place(&mut sector, &7u64.to_le_bytes()).unwrap();
//! cipher.decrypt_in_place(&mut sector, &7u64.to_le_bytes()).unwrap();
//! assert_eq!(sector, [0x42u8; 512]);
//! ```
//!
//! Source and destination either coincide (the `_in_place` methods) or do
//! not overlap at all. A partially overlapping pair of slices cannot be
//! expressed:
//!
//! ```compile_fail
//! let mut cipher = hctr2::Hctr2Aes::new_aes(&[0u8; 16]).unwrap();
//! let mut buf = [0u8; 48];
//! cipher.encrypt(&mut buf[16..], &buf[..32], b"").unwrap();
//! ```
//!
//! # Security Considerations
//!
//! - **Never reuse (key, tweak) pairs**: Equal plaintexts under the same key and tweak
//!   produce equal ciphertexts
//! - **No authentication**: HCTR2 is encryption-only; use AEAD for integrity
//! - **Minimum message length**: 16 bytes
//!
//! # Feature Flags
//!
//! - `std` (default): Enable standard library support
//! - `zeroize`: Wipe key-derived material when ciphers and hash states are dropped
//! - When `std` is disabled, the crate is `no_std` compatible

#![cfg_attr(not(feature = "std"), no_std)]

pub mod aes;
pub mod block;
pub mod common;
pub mod field;
pub mod hctr2;
pub mod polyval;
pub mod xctr;

#[cfg(test)]
mod cross_check;

pub use crate::aes::{Aes, Aes128, Aes192, Aes256};
pub use crate::block::{BlockCipher, Xctr};
pub use crate::common::{BLOCK_LENGTH, Block, Error};
pub use crate::field::Backend;
pub use crate::hctr2::{Acceleration, Cipher, Hctr2_128, Hctr2_192, Hctr2_256, Hctr2Aes};
pub use crate::polyval::Polyval;
pub use crate::xctr::KeystreamPath;
