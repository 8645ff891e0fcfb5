//! Fuzz target for the full open pipeline
//!
//! Runs arbitrary cookie text through base64 decoding, decryption, envelope
//! parsing, and MAC verification. The pipeline must reject everything a
//! fuzzer can produce (it does not hold the key) and must never panic.

#![no_main]

use libfuzzer_sys::fuzz_target;
use wafer_core::{Key, PersistentKeySet, SessionError, Settings, open_session};
use wafer_crypto::{BlockCipher, CipherMode, HashAlgorithm};
use wafer_proto::SealedCookie;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let set = PersistentKeySet::new(Key::new(vec![0x42; 16]));

    for mode in [CipherMode::Cbc, CipherMode::Cfb, CipherMode::Ctr] {
        let settings = Settings::new(HashAlgorithm::Sha256, BlockCipher::Aes128, mode);
        let result = open_session::<u64>(&settings, &set, &SealedCookie::from(text));

        // Without the key, every input must fail, and fail opaquely
        assert_eq!(result.unwrap_err(), SessionError::Deserialization);
    }
});
