//! End-to-end tests for the seal/open pipeline: the round-trip, tamper,
//! forgery, rotation, and expiry contract.
//!
//! The algorithm matrix is enumerated as a runtime table; each scenario
//! runs against every (hash, cipher, mode) combination where the behavior
//! under test depends on the suite.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use wafer_core::{
    Key, PersistentKeySet, RotatingKeySet, SessionError, Settings, Stamped, open_session,
    seal_session,
};
use wafer_crypto::{BlockCipher, CipherMode, CipherSuite, HashAlgorithm, RandomSource};
use wafer_proto::{Envelope, SealedCookie, envelope::auth_bytes};

/// A recursively-structured session value, exercising nested payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
enum Tree {
    Leaf(i64),
    Node(Box<Tree>, Box<Tree>),
}

fn sample_trees() -> Vec<Tree> {
    vec![
        Tree::Leaf(0),
        Tree::Leaf(-1),
        Tree::Leaf(i64::MAX),
        Tree::Node(Box::new(Tree::Leaf(1)), Box::new(Tree::Leaf(2))),
        Tree::Node(
            Box::new(Tree::Node(Box::new(Tree::Leaf(3)), Box::new(Tree::Leaf(4)))),
            Box::new(Tree::Leaf(5)),
        ),
    ]
}

fn settings_matrix() -> Vec<Settings> {
    let hashes = [HashAlgorithm::Sha256, HashAlgorithm::Sha384, HashAlgorithm::Sha512];
    let ciphers = [BlockCipher::Aes128, BlockCipher::Aes192, BlockCipher::Aes256];
    let modes = [CipherMode::Cbc, CipherMode::Cfb, CipherMode::Ctr];

    let mut matrix = Vec::with_capacity(27);
    for hash in hashes {
        for cipher in ciphers {
            for mode in modes {
                matrix.push(Settings::new(hash, cipher, mode));
            }
        }
    }
    matrix
}

fn key_for(settings: &Settings) -> Key {
    let len = settings.suite().key_len();
    Key::new((0..len).map(|i| (i as u8).wrapping_mul(7).wrapping_add(3)).collect())
}

fn random() -> RandomSource {
    RandomSource::from_rng(ChaCha20Rng::from_entropy(), RandomSource::DEFAULT_BUDGET)
}

fn unix_now() -> u64 {
    SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |d| d.as_secs())
}

/// Seal an attacker-chosen payload the way a key-holder would: pad to
/// block alignment, MAC under `key`, encrypt with the given IV.
fn forge_cookie(settings: &Settings, key: &Key, payload: Vec<u8>, iv: &[u8]) -> SealedCookie {
    let block = CipherSuite::BLOCK_SIZE;
    let unpadded = 12 + payload.len() + settings.hash().digest_len();
    let pad_len = (block - unpadded % block) % block;
    let padding = vec![0x5Au8; pad_len];

    let mac = settings.hash().mac(key.as_bytes(), &auth_bytes(&payload, &padding));
    let plaintext = Envelope::new(payload, padding, mac).encode();
    let ciphertext = settings.suite().encrypt(key.as_bytes(), iv, &plaintext).unwrap();
    SealedCookie::from_parts(iv, &ciphertext)
}

fn cbor(value: &impl Serialize) -> Vec<u8> {
    let mut out = Vec::new();
    ciborium::ser::into_writer(value, &mut out).unwrap();
    out
}

#[test]
fn round_trip_across_full_matrix() {
    for settings in settings_matrix() {
        let set = PersistentKeySet::new(key_for(&settings));
        for tree in sample_trees() {
            let cookie = seal_session(&settings, random(), &set, &tree).unwrap();
            let opened: Tree = open_session(&settings, &set, &cookie).unwrap();
            assert_eq!(opened, tree, "round-trip failed for {settings:?}");
        }
    }
}

#[test]
fn concrete_scenario_sha256_aes128_ctr() {
    let settings = Settings::new(HashAlgorithm::Sha256, BlockCipher::Aes128, CipherMode::Ctr);
    let set = PersistentKeySet::new(key_for(&settings));

    let cookie = seal_session(&settings, random(), &set, &Tree::Leaf(42)).unwrap();
    let opened: Tree = open_session(&settings, &set, &cookie).unwrap();
    assert_eq!(opened, Tree::Leaf(42));

    // Flip one character of the cookie text
    let mut chars: Vec<char> = cookie.as_str().chars().collect();
    chars[0] = if chars[0] == 'A' { 'B' } else { 'A' };
    let tampered = SealedCookie::from(chars.into_iter().collect::<String>());

    let result = open_session::<Tree>(&settings, &set, &tampered);
    assert_eq!(result.unwrap_err(), SessionError::Deserialization);
}

#[test]
fn identity_transform_preserves_round_trip() {
    for settings in settings_matrix() {
        let set = PersistentKeySet::new(key_for(&settings));
        let tree = Tree::Node(Box::new(Tree::Leaf(9)), Box::new(Tree::Leaf(10)));

        let cookie = seal_session(&settings, random(), &set, &tree).unwrap();
        let copied = SealedCookie::from(cookie.as_str());

        let opened: Tree = open_session(&settings, &set, &copied).unwrap();
        assert_eq!(opened, tree);
    }
}

#[test]
fn mutating_any_character_fails() {
    // One suite per mode; the detection path differs (CBC framing vs
    // stream-mode MAC) but the observed failure must not.
    for mode in [CipherMode::Cbc, CipherMode::Cfb, CipherMode::Ctr] {
        let settings = Settings::new(HashAlgorithm::Sha256, BlockCipher::Aes128, mode);
        let set = PersistentKeySet::new(key_for(&settings));
        let cookie = seal_session(&settings, random(), &set, &Tree::Leaf(7)).unwrap();

        let text = cookie.as_str();
        for i in 0..text.len() {
            let mut chars: Vec<char> = text.chars().collect();
            chars[i] = if chars[i] == 'A' { 'B' } else { 'A' };
            let tampered = SealedCookie::from(chars.into_iter().collect::<String>());

            let result = open_session::<Tree>(&settings, &set, &tampered);
            assert_eq!(
                result.unwrap_err(),
                SessionError::Deserialization,
                "flip at position {i} under {mode:?} must fail opaquely"
            );
        }
    }
}

#[test]
fn zeroed_payload_without_mac_recompute_fails() {
    for settings in settings_matrix() {
        let key = key_for(&settings);
        let set = PersistentKeySet::new(key.clone());
        let suite = settings.suite();

        let cookie = seal_session(&settings, random(), &set, &Tree::Leaf(1234)).unwrap();

        // An actor with the key decrypts, zeroes the payload, and re-encrypts
        // without recomputing the MAC.
        let (iv, ciphertext) = cookie.decode_parts(suite.iv_len()).unwrap();
        let plaintext = suite.decrypt(key.as_bytes(), &iv, &ciphertext).unwrap();
        let mut envelope = Envelope::decode(&plaintext).unwrap();
        envelope.payload = vec![0u8; envelope.payload.len()];

        let reencrypted = suite.encrypt(key.as_bytes(), &iv, &envelope.encode()).unwrap();
        let tampered = SealedCookie::from_parts(&iv, &reencrypted);

        let result = open_session::<Tree>(&settings, &set, &tampered);
        assert_eq!(result.unwrap_err(), SessionError::Deserialization, "under {settings:?}");
    }
}

#[test]
fn forged_cookie_with_key_access_opens() {
    // Integrity is scoped to "no one without the key": a key-holder can
    // always mint a validly-MAC'd cookie with a chosen payload.
    for settings in settings_matrix() {
        let key = key_for(&settings);
        let set = PersistentKeySet::new(key.clone());

        let forged_value = Tree::Leaf(-777);
        let payload = cbor(&Stamped { issued_at: unix_now(), value: forged_value.clone() });
        let cookie = forge_cookie(&settings, &key, payload, &[0xD4u8; 16]);

        let opened: Tree = open_session(&settings, &set, &cookie).unwrap();
        assert_eq!(opened, forged_value, "forgery must verify under {settings:?}");
    }
}

#[test]
fn rotation_keeps_old_cookies_until_retired() {
    let settings = Settings::new(HashAlgorithm::Sha256, BlockCipher::Aes256, CipherMode::Cbc);
    let set = RotatingKeySet::new(Key::new(vec![0x01; 32]));

    let cookie = seal_session(&settings, random(), &set, &Tree::Leaf(11)).unwrap();

    // Rotate twice; the sealing key is still on the validation list
    set.rotate(Key::new(vec![0x02; 32])).unwrap();
    set.rotate(Key::new(vec![0x03; 32])).unwrap();

    let opened: Tree = open_session(&settings, &set, &cookie).unwrap();
    assert_eq!(opened, Tree::Leaf(11));

    // New cookies seal under the newest key and open too
    let fresh = seal_session(&settings, random(), &set, &Tree::Leaf(12)).unwrap();
    let opened: Tree = open_session(&settings, &set, &fresh).unwrap();
    assert_eq!(opened, Tree::Leaf(12));

    // Fully retiring the original key invalidates the old cookie
    set.retire(2).unwrap();
    let result = open_session::<Tree>(&settings, &set, &cookie);
    assert_eq!(result.unwrap_err(), SessionError::Deserialization);

    // The fresh cookie is unaffected
    let opened: Tree = open_session(&settings, &set, &fresh).unwrap();
    assert_eq!(opened, Tree::Leaf(12));
}

#[test]
fn wrong_key_set_fails_opaquely() {
    let settings = Settings::new(HashAlgorithm::Sha512, BlockCipher::Aes192, CipherMode::Cfb);
    let sealer = PersistentKeySet::new(Key::new(vec![0xAA; 24]));
    let opener = PersistentKeySet::new(Key::new(vec![0xBB; 24]));

    let cookie = seal_session(&settings, random(), &sealer, &Tree::Leaf(5)).unwrap();
    let result = open_session::<Tree>(&settings, &opener, &cookie);
    assert_eq!(result.unwrap_err(), SessionError::Deserialization);
}

#[test]
fn cookie_does_not_open_under_different_settings() {
    let sealed_with = Settings::new(HashAlgorithm::Sha256, BlockCipher::Aes128, CipherMode::Ctr);
    let opened_with = Settings::new(HashAlgorithm::Sha384, BlockCipher::Aes128, CipherMode::Ctr);
    let set = PersistentKeySet::new(Key::new(vec![0x42; 16]));

    let cookie = seal_session(&sealed_with, random(), &set, &Tree::Leaf(6)).unwrap();
    let result = open_session::<Tree>(&opened_with, &set, &cookie);
    assert_eq!(result.unwrap_err(), SessionError::Deserialization);
}

#[test]
fn expired_cookie_fails_opaquely() {
    let settings = Settings::new(HashAlgorithm::Sha256, BlockCipher::Aes128, CipherMode::Ctr)
        .with_max_age(Duration::from_secs(60));
    let key = Key::new(vec![0x42; 16]);
    let set = PersistentKeySet::new(key.clone());

    // Mint a cookie stamped an hour ago
    let stale = Stamped { issued_at: unix_now().saturating_sub(3600), value: Tree::Leaf(1) };
    let cookie = forge_cookie(&settings, &key, cbor(&stale), &[0x11u8; 16]);

    let result = open_session::<Tree>(&settings, &set, &cookie);
    assert_eq!(result.unwrap_err(), SessionError::Deserialization);
}

#[test]
fn fresh_cookie_passes_expiry_check() {
    let settings = Settings::new(HashAlgorithm::Sha256, BlockCipher::Aes128, CipherMode::Ctr)
        .with_max_age(Duration::from_secs(3600));
    let set = PersistentKeySet::new(Key::new(vec![0x42; 16]));

    let cookie = seal_session(&settings, random(), &set, &Tree::Leaf(2)).unwrap();
    let opened: Tree = open_session(&settings, &set, &cookie).unwrap();
    assert_eq!(opened, Tree::Leaf(2));
}

#[test]
fn cookie_sealed_without_expiry_opens_once_policy_is_added() {
    // The stamp is always written, so enabling max_age later still works
    // for cookies within the window.
    let without = Settings::new(HashAlgorithm::Sha256, BlockCipher::Aes128, CipherMode::Cbc);
    let with = without.with_max_age(Duration::from_secs(3600));
    let set = PersistentKeySet::new(Key::new(vec![0x42; 16]));

    let cookie = seal_session(&without, random(), &set, &Tree::Leaf(3)).unwrap();
    let opened: Tree = open_session(&with, &set, &cookie).unwrap();
    assert_eq!(opened, Tree::Leaf(3));
}
