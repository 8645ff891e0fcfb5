//! Block cipher and mode adapter.
//!
//! A [`CipherSuite`] pairs an AES key size with a chaining mode and exposes
//! plain `encrypt`/`decrypt` over byte slices. Everything upstream is
//! generic over the selector enums; the concrete RustCrypto types never
//! escape this module.
//!
//! Mode compatibility: CBC requires block-aligned input in both directions
//! (the envelope layer pads), CFB and CTR accept arbitrary lengths.

use aes::{Aes128, Aes192, Aes256};
use cbc::cipher::{
    AsyncStreamCipher, BlockDecryptMut, BlockEncryptMut, KeyIvInit, StreamCipher,
    block_padding::NoPadding,
};

use crate::error::CryptoError;

type Aes128CbcEnc = cbc::Encryptor<Aes128>;
type Aes128CbcDec = cbc::Decryptor<Aes128>;
type Aes192CbcEnc = cbc::Encryptor<Aes192>;
type Aes192CbcDec = cbc::Decryptor<Aes192>;
type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

type Aes128CfbEnc = cfb_mode::Encryptor<Aes128>;
type Aes128CfbDec = cfb_mode::Decryptor<Aes128>;
type Aes192CfbEnc = cfb_mode::Encryptor<Aes192>;
type Aes192CfbDec = cfb_mode::Decryptor<Aes192>;
type Aes256CfbEnc = cfb_mode::Encryptor<Aes256>;
type Aes256CfbDec = cfb_mode::Decryptor<Aes256>;

type Aes128Ctr = ctr::Ctr128BE<Aes128>;
type Aes192Ctr = ctr::Ctr128BE<Aes192>;
type Aes256Ctr = ctr::Ctr128BE<Aes256>;

/// Block cipher selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockCipher {
    /// AES with a 128-bit key
    Aes128,
    /// AES with a 192-bit key
    Aes192,
    /// AES with a 256-bit key
    Aes256,
}

impl BlockCipher {
    /// Key length in bytes.
    pub fn key_len(self) -> usize {
        match self {
            Self::Aes128 => 16,
            Self::Aes192 => 24,
            Self::Aes256 => 32,
        }
    }
}

/// Cipher chaining mode selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CipherMode {
    /// Cipher block chaining; input must be block-aligned
    Cbc,
    /// Cipher feedback (full-block); arbitrary input length
    Cfb,
    /// Counter mode (128-bit big-endian counter); arbitrary input length
    Ctr,
}

/// A (block cipher, mode) pair providing symmetric encryption.
///
/// Round-trip invariant: for any key and IV of the required lengths and any
/// mode-compatible input, `decrypt(key, iv, encrypt(key, iv, m)) == m`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CipherSuite {
    /// Selected block cipher
    pub cipher: BlockCipher,
    /// Selected chaining mode
    pub mode: CipherMode,
}

impl CipherSuite {
    /// AES block size in bytes, shared by all supported ciphers.
    pub const BLOCK_SIZE: usize = 16;

    /// Pair a cipher with a mode.
    pub fn new(cipher: BlockCipher, mode: CipherMode) -> Self {
        Self { cipher, mode }
    }

    /// Key length the suite requires, in bytes.
    pub fn key_len(self) -> usize {
        self.cipher.key_len()
    }

    /// IV length the suite requires, in bytes (one block).
    pub fn iv_len(self) -> usize {
        Self::BLOCK_SIZE
    }

    /// Encrypt `plaintext` under `key` with the per-operation `iv`.
    pub fn encrypt(self, key: &[u8], iv: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.check_inputs(key, iv, plaintext.len())?;

        let out = match (self.cipher, self.mode) {
            (BlockCipher::Aes128, CipherMode::Cbc) => cbc_encrypt::<Aes128CbcEnc>(key, iv, plaintext),
            (BlockCipher::Aes192, CipherMode::Cbc) => cbc_encrypt::<Aes192CbcEnc>(key, iv, plaintext),
            (BlockCipher::Aes256, CipherMode::Cbc) => cbc_encrypt::<Aes256CbcEnc>(key, iv, plaintext),
            (BlockCipher::Aes128, CipherMode::Cfb) => cfb_encrypt::<Aes128CfbEnc>(key, iv, plaintext),
            (BlockCipher::Aes192, CipherMode::Cfb) => cfb_encrypt::<Aes192CfbEnc>(key, iv, plaintext),
            (BlockCipher::Aes256, CipherMode::Cfb) => cfb_encrypt::<Aes256CfbEnc>(key, iv, plaintext),
            (BlockCipher::Aes128, CipherMode::Ctr) => ctr_apply::<Aes128Ctr>(key, iv, plaintext),
            (BlockCipher::Aes192, CipherMode::Ctr) => ctr_apply::<Aes192Ctr>(key, iv, plaintext),
            (BlockCipher::Aes256, CipherMode::Ctr) => ctr_apply::<Aes256Ctr>(key, iv, plaintext),
        };

        Ok(out)
    }

    /// Decrypt `ciphertext` under `key` with the IV used at encrypt time.
    pub fn decrypt(self, key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        self.check_inputs(key, iv, ciphertext.len())?;

        match (self.cipher, self.mode) {
            (BlockCipher::Aes128, CipherMode::Cbc) => cbc_decrypt::<Aes128CbcDec>(key, iv, ciphertext),
            (BlockCipher::Aes192, CipherMode::Cbc) => cbc_decrypt::<Aes192CbcDec>(key, iv, ciphertext),
            (BlockCipher::Aes256, CipherMode::Cbc) => cbc_decrypt::<Aes256CbcDec>(key, iv, ciphertext),
            (BlockCipher::Aes128, CipherMode::Cfb) => Ok(cfb_decrypt::<Aes128CfbDec>(key, iv, ciphertext)),
            (BlockCipher::Aes192, CipherMode::Cfb) => Ok(cfb_decrypt::<Aes192CfbDec>(key, iv, ciphertext)),
            (BlockCipher::Aes256, CipherMode::Cfb) => Ok(cfb_decrypt::<Aes256CfbDec>(key, iv, ciphertext)),
            (BlockCipher::Aes128, CipherMode::Ctr) => Ok(ctr_apply::<Aes128Ctr>(key, iv, ciphertext)),
            (BlockCipher::Aes192, CipherMode::Ctr) => Ok(ctr_apply::<Aes192Ctr>(key, iv, ciphertext)),
            (BlockCipher::Aes256, CipherMode::Ctr) => Ok(ctr_apply::<Aes256Ctr>(key, iv, ciphertext)),
        }
    }

    /// Validate key length, IV length, and (for CBC) block alignment before
    /// touching any cipher state.
    fn check_inputs(self, key: &[u8], iv: &[u8], data_len: usize) -> Result<(), CryptoError> {
        if key.len() != self.key_len() {
            return Err(CryptoError::InvalidKeyLength {
                expected: self.key_len(),
                actual: key.len(),
            });
        }

        if iv.len() != self.iv_len() {
            return Err(CryptoError::InvalidIvLength { expected: self.iv_len(), actual: iv.len() });
        }

        if self.mode == CipherMode::Cbc && data_len % Self::BLOCK_SIZE != 0 {
            return Err(CryptoError::NotBlockAligned { len: data_len, block: Self::BLOCK_SIZE });
        }

        Ok(())
    }
}

fn cbc_encrypt<E>(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Vec<u8>
where
    E: BlockEncryptMut + KeyIvInit,
{
    let Ok(enc) = E::new_from_slices(key, iv) else {
        unreachable!("key and IV lengths validated by check_inputs");
    };
    enc.encrypt_padded_vec_mut::<NoPadding>(plaintext)
}

fn cbc_decrypt<D>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>, CryptoError>
where
    D: BlockDecryptMut + KeyIvInit,
{
    let Ok(dec) = D::new_from_slices(key, iv) else {
        unreachable!("key and IV lengths validated by check_inputs");
    };
    dec.decrypt_padded_vec_mut::<NoPadding>(ciphertext).map_err(|_| {
        CryptoError::NotBlockAligned { len: ciphertext.len(), block: CipherSuite::BLOCK_SIZE }
    })
}

fn cfb_encrypt<E>(key: &[u8], iv: &[u8], plaintext: &[u8]) -> Vec<u8>
where
    E: AsyncStreamCipher + BlockEncryptMut + KeyIvInit,
{
    let Ok(enc) = E::new_from_slices(key, iv) else {
        unreachable!("key and IV lengths validated by check_inputs");
    };
    let mut buf = plaintext.to_vec();
    enc.encrypt(&mut buf);
    buf
}

fn cfb_decrypt<D>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Vec<u8>
where
    D: AsyncStreamCipher + BlockDecryptMut + KeyIvInit,
{
    let Ok(dec) = D::new_from_slices(key, iv) else {
        unreachable!("key and IV lengths validated by check_inputs");
    };
    let mut buf = ciphertext.to_vec();
    dec.decrypt(&mut buf);
    buf
}

/// CTR is its own inverse: the same keystream application encrypts and
/// decrypts.
fn ctr_apply<C>(key: &[u8], iv: &[u8], data: &[u8]) -> Vec<u8>
where
    C: StreamCipher + KeyIvInit,
{
    let Ok(mut cipher) = C::new_from_slices(key, iv) else {
        unreachable!("key and IV lengths validated by check_inputs");
    };
    let mut buf = data.to_vec();
    cipher.apply_keystream(&mut buf);
    buf
}
