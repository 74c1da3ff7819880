use gatefetch_verify::{AnyHasher, Checksum, Hasher, VerificationError};

/// Decision of the integrity gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    /// No digest was expected; the payload is accepted as is.
    Skipped,
    /// The digest matched.
    Verified { digest: String },
    /// A digest was expected but nothing arrived.
    Empty,
    Mismatch { expected: String, actual: String },
}

impl Verdict {
    /// Returns `true` if the payload may be committed.
    #[must_use]
    pub fn passed(&self) -> bool { matches!(self, Verdict::Skipped | Verdict::Verified { .. }) }
}

/// Judge a received payload.
///
/// `hasher` holds the incremental state fed with every received block; it is
/// only consulted when a checksum is expected.
pub fn evaluate(expected: Option<&Checksum>, downloaded: u64, hasher: Option<AnyHasher>) -> Verdict {
    let Some(checksum) = expected else {
        return Verdict::Skipped;
    };
    if downloaded == 0 {
        return Verdict::Empty;
    }

    let hasher = hasher.unwrap_or_else(|| checksum.hasher());
    match checksum.verify_digest(&hasher.finalize()) {
        Ok(digest) => Verdict::Verified { digest },
        Err(VerificationError::Mismatch { expected, actual }) => Verdict::Mismatch { expected, actual },
        Err(other) => Verdict::Mismatch {
            expected: checksum.expected().to_string(),
            actual: other.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatefetch_verify::HashAlgorithm;

    fn fed(checksum: &Checksum, data: &[u8]) -> AnyHasher {
        let mut hasher = checksum.hasher();
        hasher.update(data);
        hasher
    }

    #[test]
    fn test_no_expected_digest_skips() {
        assert_eq!(evaluate(None, 0, None), Verdict::Skipped);
        assert_eq!(evaluate(None, 10, None), Verdict::Skipped);
        assert!(Verdict::Skipped.passed());
    }

    #[test]
    fn test_empty_payload_fails() {
        let checksum = Checksum::new(HashAlgorithm::Md5, "d41d8cd98f00b204e9800998ecf8427e");
        let verdict = evaluate(Some(&checksum), 0, Some(checksum.hasher()));
        assert_eq!(verdict, Verdict::Empty);
        assert!(!verdict.passed());
    }

    #[test]
    fn test_matching_digest_verifies() {
        let checksum = Checksum::new(HashAlgorithm::Md5, "5eb63bbbe01eeed093cb22bb8f5acdc3");
        let verdict = evaluate(Some(&checksum), 11, Some(fed(&checksum, b"hello world")));
        assert_eq!(
            verdict,
            Verdict::Verified {
                digest: "5eb63bbbe01eeed093cb22bb8f5acdc3".into()
            }
        );
    }

    #[test]
    fn test_verified_digest_is_lowercase_hex() {
        let checksum = Checksum::new(HashAlgorithm::Md5, "5EB63BBBE01EEED093CB22BB8F5ACDC3");
        let verdict = evaluate(Some(&checksum), 11, Some(fed(&checksum, b"hello world")));
        assert_eq!(
            verdict,
            Verdict::Verified {
                digest: "5eb63bbbe01eeed093cb22bb8f5acdc3".into()
            }
        );
    }

    #[test]
    fn test_mismatch_reports_both_digests() {
        let checksum = Checksum::new(HashAlgorithm::Md5, "wrongvalue");
        let verdict = evaluate(Some(&checksum), 11, Some(fed(&checksum, b"hello world")));
        assert_eq!(
            verdict,
            Verdict::Mismatch {
                expected: "wrongvalue".into(),
                actual: "5eb63bbbe01eeed093cb22bb8f5acdc3".into(),
            }
        );
    }
}
