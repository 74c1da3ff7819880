//! Digest algorithms and checksum verification for downloaded payloads.
//!
//! Hashing is incremental so a fetcher can feed each block as it arrives and
//! compare once the stream ends, without holding the payload in memory.
//!
//! # Example
//!
//! ```
//! use gatefetch_verify::{Checksum, HashAlgorithm, Hasher};
//!
//! let checksum = Checksum::new(HashAlgorithm::Md5, "5eb63bbbe01eeed093cb22bb8f5acdc3");
//!
//! let mut hasher = checksum.hasher();
//! hasher.update(b"hello ");
//! hasher.update(b"world");
//!
//! checksum.verify_digest(&hasher.finalize()).unwrap();
//! ```

pub use self::algorithm::HashAlgorithm;
pub use self::checksum::Checksum;
pub use self::error::{Result, VerificationError};
pub use self::hasher::{
    AnyHasher, DigestHasher, Hasher, Md5Hasher, Sha1Hasher, Sha256Hasher, Sha512Hasher,
};

#[cfg(feature = "blake3")]
pub use self::hasher::Blake3Hasher;

mod algorithm;
mod checksum;
mod error;
mod hasher;
