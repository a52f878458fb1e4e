//! Cross-check tests against independent implementations.
//!
//! POLYVAL is compared with the RustCrypto `polyval` crate. HCTR2 is compared
//! with a straight-line rendition of the construction that uses that crate
//! for hashing and the `aes` crate directly for the block cipher, with no
//! tweak caching, no snapshots and no XCTR hook.

#[cfg(test)]
mod tests {
    use ::aes::cipher::{
        BlockDecrypt, BlockEncrypt, KeyInit, consts::U16, generic_array::GenericArray,
    };
    use ::polyval::Polyval as RefPolyval;
    use ::polyval::universal_hash::UniversalHash;
    use proptest::prelude::*;
    use rand::{Rng, SeedableRng, rngs::StdRng};

    use crate::common::Direction;
    use crate::field::Backend;
    use crate::{Acceleration, Aes, Aes128, Aes192, Aes256, Cipher, Polyval};

    /// Helper to format bytes as hex string for output.
    fn hex(data: &[u8]) -> String {
        data.iter().map(|b| format!("{:02x}", b)).collect()
    }

    fn ref_polyval(key: &[u8; 16], data: &[u8]) -> [u8; 16] {
        let mut poly = RefPolyval::new(&GenericArray::from(*key));
        poly.update_padded(data);
        poly.finalize().into()
    }

    fn ref_hash(h: &[u8; 16], tweak: &[u8], data: &[u8]) -> [u8; 16] {
        let partial = !data.len().is_multiple_of(16);
        let mut header = [0u8; 16];
        let l = tweak.len() as u64 * 16 + 2 + partial as u64;
        header[..8].copy_from_slice(&l.to_le_bytes());

        let mut poly = RefPolyval::new(&GenericArray::from(*h));
        poly.update(&[GenericArray::from(header)]);
        poly.update_padded(tweak);

        let mut padded = data.to_vec();
        if partial {
            padded.push(1);
        }
        poly.update_padded(&padded);
        poly.finalize().into()
    }

    fn ref_hctr2<C>(cipher: &C, tweak: &[u8], input: &[u8], direction: Direction) -> Vec<u8>
    where
        C: BlockEncrypt<BlockSize = U16> + BlockDecrypt,
    {
        let encrypt = |b: [u8; 16]| -> [u8; 16] {
            let mut block = GenericArray::from(b);
            cipher.encrypt_block(&mut block);
            block.into()
        };
        let xor = |a: [u8; 16], b: [u8; 16]| -> [u8; 16] { core::array::from_fn(|i| a[i] ^ b[i]) };

        let h = encrypt([0u8; 16]);
        let mut one = [0u8; 16];
        one[0] = 1;
        let l = encrypt(one);

        let m: [u8; 16] = input[..16].try_into().unwrap();
        let n = &input[16..];

        let mm = xor(m, ref_hash(&h, tweak, n));
        let mut uu = GenericArray::from(mm);
        match direction {
            Direction::Encrypt => cipher.encrypt_block(&mut uu),
            Direction::Decrypt => cipher.decrypt_block(&mut uu),
        }
        let uu: [u8; 16] = uu.into();
        let s = xor(xor(mm, uu), l);

        let mut v = n.to_vec();
        for (i, chunk) in v.chunks_mut(16).enumerate() {
            let mut ctr = [0u8; 16];
            ctr[..8].copy_from_slice(&(i as u64 + 1).to_le_bytes());
            let ks = encrypt(xor(ctr, s));
            for (b, k) in chunk.iter_mut().zip(ks) {
                *b ^= k;
            }
        }

        let u = xor(uu, ref_hash(&h, tweak, &v));
        let mut out = u.to_vec();
        out.extend_from_slice(&v);
        out
    }

    fn ref_hctr2_for_key(key: &[u8], tweak: &[u8], input: &[u8], direction: Direction) -> Vec<u8> {
        match key.len() {
            16 => ref_hctr2(&Aes128::new_from_slice(key).unwrap(), tweak, input, direction),
            24 => ref_hctr2(&Aes192::new_from_slice(key).unwrap(), tweak, input, direction),
            32 => ref_hctr2(&Aes256::new_from_slice(key).unwrap(), tweak, input, direction),
            n => panic!("unsupported key length {n}"),
        }
    }

    #[test]
    fn cross_check_polyval_random() {
        let mut rng = StdRng::seed_from_u64(0x504f_4c59);
        for backend in [Backend::portable(), Backend::detect()] {
            for len in 0..200 {
                let key: [u8; 16] = rng.r#gen();
                let mut data = vec![0u8; len];
                rng.fill(&mut data[..]);

                let mut ours = Polyval::with_backend(&key, backend);
                ours.update(&data);
                assert_eq!(ours.sum(), ref_polyval(&key, &data), "len={len}");
            }
        }
    }

    #[test]
    fn cross_check_polyval_snapshot_continuation() {
        let mut rng = StdRng::seed_from_u64(7);
        let key: [u8; 16] = rng.r#gen();
        let mut prefix = [0u8; 48];
        let mut suffix_a = [0u8; 32];
        let mut suffix_b = [0u8; 64];
        rng.fill(&mut prefix[..]);
        rng.fill(&mut suffix_a[..]);
        rng.fill(&mut suffix_b[..]);

        let mut ours = Polyval::new(&key);
        ours.update(&prefix);
        let state = ours.snapshot();

        for suffix in [&suffix_a[..], &suffix_b[..]] {
            ours.restore(&state);
            ours.update(suffix);
            let whole = [&prefix[..], suffix].concat();
            assert_eq!(ours.sum(), ref_polyval(&key, &whole));
        }
    }

    #[test]
    fn cross_check_hctr2_random() {
        let mut rng = StdRng::seed_from_u64(0x4843_5452_32);
        for acceleration in [Acceleration::Portable, Acceleration::Auto] {
            for _ in 0..200 {
                let key_len = [16, 24, 32][rng.gen_range(0..3)];
                let mut key = vec![0u8; key_len];
                rng.fill(&mut key[..]);
                let mut tweak = vec![0u8; rng.gen_range(0..40)];
                rng.fill(&mut tweak[..]);
                let mut plaintext = vec![0u8; rng.gen_range(16..300)];
                rng.fill(&mut plaintext[..]);

                let mut cipher =
                    Cipher::with_acceleration(Aes::new(&key).unwrap(), acceleration).unwrap();

                let mut ciphertext = vec![0u8; plaintext.len()];
                cipher.encrypt(&mut ciphertext, &plaintext, &tweak).unwrap();
                let expected = ref_hctr2_for_key(&key, &tweak, &plaintext, Direction::Encrypt);
                assert_eq!(
                    ciphertext,
                    expected,
                    "key={} tweak={} len={}",
                    hex(&key),
                    hex(&tweak),
                    plaintext.len()
                );

                let mut decrypted = vec![0u8; ciphertext.len()];
                cipher.decrypt(&mut decrypted, &ciphertext, &tweak).unwrap();
                assert_eq!(decrypted, plaintext);
                assert_eq!(
                    ref_hctr2_for_key(&key, &tweak, &ciphertext, Direction::Decrypt),
                    plaintext
                );
            }
        }
    }

    #[test]
    fn cross_check_hctr2_128_basic() {
        let key = [0x01u8; 16];
        let plaintext = b"Hello, this is a test message that is longer than one block!";
        let tweak = b"test tweak data";
        let expected = ref_hctr2_for_key(&key, tweak, plaintext, Direction::Encrypt);

        println!("HCTR2-128 Basic Test:");
        println!("  Key:        {}", hex(&key));
        println!("  Tweak:      {}", hex(tweak));
        println!("  Plaintext:  {}", hex(plaintext));
        println!("  Ciphertext: {}", hex(&expected));

        for acceleration in [Acceleration::Portable, Acceleration::Auto] {
            let mut cipher =
                Cipher::with_acceleration(Aes::new(&key).unwrap(), acceleration).unwrap();

            let mut ciphertext = vec![0u8; plaintext.len()];
            cipher.encrypt(&mut ciphertext, plaintext, tweak).unwrap();
            assert_eq!(ciphertext, expected, "{acceleration:?}");
        }
    }

    #[test]
    fn cross_check_hctr2_256_basic() {
        let key = [0x02u8; 32];
        let plaintext = b"This is another test message for HCTR2-256 with a longer key size!";
        let tweak = b"another test tweak";
        let expected = ref_hctr2_for_key(&key, tweak, plaintext, Direction::Encrypt);

        println!("HCTR2-256 Basic Test:");
        println!("  Key:        {}", hex(&key));
        println!("  Tweak:      {}", hex(tweak));
        println!("  Plaintext:  {}", hex(plaintext));
        println!("  Ciphertext: {}", hex(&expected));

        for acceleration in [Acceleration::Portable, Acceleration::Auto] {
            let mut cipher =
                Cipher::with_acceleration(Aes::new(&key).unwrap(), acceleration).unwrap();

            let mut ciphertext = vec![0u8; plaintext.len()];
            cipher.encrypt(&mut ciphertext, plaintext, tweak).unwrap();
            assert_eq!(ciphertext, expected, "{acceleration:?}");
        }
    }

    proptest! {
        #[test]
        fn prop_hctr2_roundtrip(
            key in any::<[u8; 32]>(),
            tweak in proptest::collection::vec(any::<u8>(), 0..64),
            plaintext in proptest::collection::vec(any::<u8>(), 16..512),
            acceleration in proptest::sample::select(vec![Acceleration::Portable, Acceleration::Auto]),
        ) {
            let mut cipher = Cipher::with_acceleration(Aes::new(&key).unwrap(), acceleration).unwrap();
            let mut buf = plaintext.clone();
            cipher.encrypt_in_place(&mut buf, &tweak).unwrap();
            prop_assert_eq!(buf.len(), plaintext.len());
            cipher.decrypt_in_place(&mut buf, &tweak).unwrap();
            prop_assert_eq!(buf, plaintext);
        }

        #[test]
        fn prop_hctr2_paths_agree(
            key in any::<[u8; 16]>(),
            tweak in proptest::collection::vec(any::<u8>(), 0..40),
            plaintext in proptest::collection::vec(any::<u8>(), 16..300),
        ) {
            let aes = Aes::new(&key).unwrap();
            let mut portable = Cipher::with_acceleration(&aes, Acceleration::Portable).unwrap();
            let mut auto = Cipher::with_acceleration(&aes, Acceleration::Auto).unwrap();

            let mut a = vec![0u8; plaintext.len()];
            let mut b = vec![0u8; plaintext.len()];
            portable.encrypt(&mut a, &plaintext, &tweak).unwrap();
            auto.encrypt(&mut b, &plaintext, &tweak).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
