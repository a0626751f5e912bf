//! Symmetric encryption of entry payloads.
//!
//! AES-128 in ECB mode with PKCS#7 padding, base64-encoded on disk. The
//! scheme is deterministic and unauthenticated: no IV, no salt, no tag.
//! Existing record files decrypt only under this exact construction, so the
//! on-disk format cannot change without orphaning them.

use aes::Aes128;
use aes::cipher::block_padding::{Pkcs7, UnpadError};
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyInit};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

type EcbEnc = ecb::Encryptor<Aes128>;
type EcbDec = ecb::Decryptor<Aes128>;

/// Hardcoded key passphrase, padded/truncated to the 16-byte AES-128 key.
const PASSPHRASE: &str = "MySuperSecretKey";

/// Error type for decryption
#[derive(Debug, thiserror::Error)]
pub enum CipherError {
    /// Input fails the base64-alphabet pre-check; the payload was never
    /// ciphertext to begin with.
    #[error("payload is not ciphertext")]
    NotEncrypted,
    #[error("base64 decode failed: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("block decrypt failed: bad length or padding")]
    BadBlock,
}

impl From<UnpadError> for CipherError {
    fn from(_: UnpadError) -> CipherError {
        CipherError::BadBlock
    }
}

/// The fixed process-wide key material: the passphrase padded on the right
/// with ASCII spaces and truncated to exactly 16 bytes.
fn key_material() -> [u8; 16] {
    let mut key = [b' '; 16];
    for (slot, byte) in key.iter_mut().zip(PASSPHRASE.bytes()) {
        *slot = byte;
    }
    key
}

/// Encrypt a payload to its textual on-disk form.
pub fn encrypt(plaintext: &[u8]) -> String {
    let key = key_material();
    let ciphertext = EcbEnc::new(&key.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext);
    BASE64.encode(ciphertext)
}

/// Decrypt the textual on-disk form back into payload bytes.
///
/// Fails with `NotEncrypted`, without touching the cipher, when the input
/// contains anything outside the base64 alphabet. Callers use that as the
/// legacy-plaintext fast path.
pub fn decrypt(text: &str) -> Result<Vec<u8>, CipherError> {
    if !looks_like_ciphertext(text) {
        return Err(CipherError::NotEncrypted);
    }
    let ciphertext = BASE64.decode(text)?;
    let key = key_material();
    let plaintext = EcbDec::new(&key.into()).decrypt_padded_vec_mut::<Pkcs7>(&ciphertext)?;
    Ok(plaintext)
}

/// Pre-check: non-empty and drawn entirely from the base64 alphabet.
fn looks_like_ciphertext(text: &str) -> bool {
    !text.is_empty()
        && text
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'/' | b'='))
}
