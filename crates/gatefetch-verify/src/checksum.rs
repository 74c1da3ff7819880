use crate::{AnyHasher, HashAlgorithm, Result, VerificationError};

/// An expected digest together with the algorithm that produced it.
///
/// The expected value is kept as given; comparisons trim it and ignore
/// ASCII case, since digests are rendered as lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checksum {
    algorithm: HashAlgorithm,
    expected:  String,
}

impl Checksum {
    pub fn new(algorithm: HashAlgorithm, expected: impl Into<String>) -> Self {
        Self {
            algorithm,
            expected: expected.into(),
        }
    }

    pub fn algorithm(&self) -> HashAlgorithm { self.algorithm }

    pub fn expected(&self) -> &str { &self.expected }

    /// Fresh incremental hasher for this checksum's algorithm.
    pub fn hasher(&self) -> AnyHasher { AnyHasher::new(self.algorithm) }

    /// Returns `true` if `actual_hex` names the same digest.
    pub fn matches(&self, actual_hex: &str) -> bool {
        self.expected.trim().eq_ignore_ascii_case(actual_hex.trim())
    }

    /// Compare an already computed digest, returning it as lowercase hex.
    pub fn verify_digest(&self, actual: &[u8]) -> Result<String> {
        let actual = hex::encode(actual);
        if self.matches(&actual) {
            Ok(actual)
        } else {
            Err(VerificationError::Mismatch {
                expected: self.expected.clone(),
                actual,
            })
        }
    }
}
