//! SHA-256 digests over complete file contents.

use std::path::Path;

use amdil_core::Digest;
use sha2::{Digest as _, Sha256};

use crate::GoldenError;

/// Computes the SHA-256 digest of `bytes`.
///
/// # Complexity
/// O(n) in the length of `bytes`.
#[must_use]
pub fn digest_bytes(bytes: &[u8]) -> Digest {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    Digest::new(hasher.finalize().into())
}

/// Reads `path` in full and returns its digest.
///
/// # Errors
/// Returns [`GoldenError::FileRead`] if the file cannot be read.
pub async fn digest_file(path: &Path) -> Result<Digest, GoldenError> {
    let bytes = tokio::fs::read(path).await.map_err(|source| GoldenError::FileRead {
        path: path.to_owned(),
        source,
    })?;
    tracing::trace!(path = %path.display(), bytes = bytes.len(), "hashing file");
    Ok(digest_bytes(&bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_deterministic() {
        let listing = b"dx11_ps\nil_ps_2_0\nend\n";
        assert_eq!(digest_bytes(listing), digest_bytes(listing), "same input must produce same digest");
    }

    #[test]
    fn digest_differs_for_one_flipped_byte() {
        let a = b"mov r0 v0\n".to_vec();
        let mut b = a.clone();
        b[4] ^= 0x01;
        assert_ne!(digest_bytes(&a), digest_bytes(&b));
    }

    #[test]
    fn digest_of_empty_input_is_known_value() {
        // SHA-256("") = e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855
        assert_eq!(
            digest_bytes(b"").to_string(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[tokio::test]
    async fn digest_file_ignores_name_and_location() {
        let dir = tempfile::tempdir().expect("tempdir");
        let a = dir.path().join("il_a_out.txt");
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).expect("mkdir");
        let b = nested.join("completely-different.name");
        std::fs::write(&a, b"end\n").expect("write a");
        std::fs::write(&b, b"end\n").expect("write b");

        let da = digest_file(&a).await.expect("digest a");
        let db = digest_file(&b).await.expect("digest b");
        assert_eq!(da, db, "identical bytes must give identical digests");
        assert_eq!(da, digest_bytes(b"end\n"));
    }

    #[tokio::test]
    async fn digest_file_missing_is_file_read_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("absent.txt");
        match digest_file(&missing).await {
            Err(GoldenError::FileRead { path, .. }) => assert_eq!(path, missing),
            other => panic!("expected FileRead, got {other:?}"),
        }
    }

    proptest::proptest! {
        #[test]
        fn proptest_digest_hex_always_64_chars(
            bytes in proptest::collection::vec(proptest::prelude::any::<u8>(), 0..1024usize),
        ) {
            let hex = digest_bytes(&bytes).to_string();
            proptest::prop_assert_eq!(hex.len(), 64);
            proptest::prop_assert!(hex.chars().all(|c| c.is_ascii_hexdigit()));
        }
    }
}
