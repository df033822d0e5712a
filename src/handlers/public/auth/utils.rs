use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::validation::UploadedFile;

/// Hash a password with a fresh 16-byte salt, stored as
/// `<salt-hex>$<digest-hex>`
pub fn hash_password(password: &str) -> String {
    let mut salt = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt);
    let salt_hex = hex(&salt);
    let digest = digest_hex(&salt_hex, password);
    format!("{}${}", salt_hex, digest)
}

/// Verify a password against a stored `<salt>$<digest>` hash
pub fn verify_password(password: &str, stored: &str) -> bool {
    match stored.split_once('$') {
        Some((salt, digest)) => digest_hex(salt, password) == digest,
        None => false,
    }
}

fn digest_hex(salt: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn hex(bytes: &[u8]) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        let _ = write!(out, "{:02x}", b);
    }
    out
}

/// Check an uploaded file's extension and size against the configured limits
pub fn validate_upload(
    file: &UploadedFile,
    accepted_types: &[String],
    max_size: usize,
) -> Result<(), String> {
    if file.size() > max_size {
        return Err(format!("file size exceeds {} bytes", max_size));
    }

    let ext = file.extension().unwrap_or_default();
    if !accepted_types.iter().any(|t| *t == ext) {
        return Err(format!("invalid file type, allowed: {}", accepted_types.join(", ")));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;

    fn upload(file_name: &str, len: usize) -> UploadedFile {
        UploadedFile {
            field: "image".to_string(),
            file_name: file_name.to_string(),
            content_type: None,
            bytes: Bytes::from(vec![0u8; len]),
        }
    }

    fn image_types() -> Vec<String> {
        vec!["jpg".to_string(), "jpeg".to_string(), "png".to_string()]
    }

    #[test]
    fn password_hashes_verify() {
        let hash = hash_password("hunter2secret");
        assert!(verify_password("hunter2secret", &hash));
        assert!(!verify_password("wrong-password", &hash));
        // fresh salt per call
        assert_ne!(hash, hash_password("hunter2secret"));
    }

    #[test]
    fn garbage_hashes_never_verify() {
        assert!(!verify_password("anything", "no-separator"));
        assert!(!verify_password("anything", ""));
    }

    #[test]
    fn upload_checks_extension_and_size() {
        assert!(validate_upload(&upload("me.png", 100), &image_types(), 1024).is_ok());
        // extension match is case-insensitive
        assert!(validate_upload(&upload("me.JPG", 100), &image_types(), 1024).is_ok());

        assert!(validate_upload(&upload("me.gif", 100), &image_types(), 1024).is_err());
        assert!(validate_upload(&upload("noext", 100), &image_types(), 1024).is_err());
        assert!(validate_upload(&upload("me.png", 2048), &image_types(), 1024).is_err());
    }
}
