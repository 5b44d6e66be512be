// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Incremental digest over the to-be-signed bytes.
//!
//! The verifier feeds the Sig_structure to the digest piecewise, so the
//! hasher exposes the usual init/update/finalize shape rather than a
//! one-shot function. The finalized digest lands in a fixed-size buffer
//! sized for the largest supported hash.

use sha2::{Digest as _, Sha256, Sha384, Sha512};

use crate::algorithms::{CoseAlgorithm, HashAlgorithm};

/// Largest digest any supported algorithm produces (SHA-512).
pub const MAX_HASH_LEN: usize = 64;

/// A finalized TBS digest.
#[derive(Debug, Clone, Copy)]
pub struct HashOutput {
    buf: [u8; MAX_HASH_LEN],
    len: usize,
}

impl HashOutput {
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl AsRef<[u8]> for HashOutput {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Running digest over the Sig_structure bytes.
pub enum TbsHasher {
    Sha256(Sha256),
    Sha384(Sha384),
    Sha512(Sha512),
}

impl TbsHasher {
    pub fn new(alg: CoseAlgorithm) -> Self {
        match alg.hash_algorithm() {
            HashAlgorithm::Sha256 => Self::Sha256(Sha256::new()),
            HashAlgorithm::Sha384 => Self::Sha384(Sha384::new()),
            HashAlgorithm::Sha512 => Self::Sha512(Sha512::new()),
        }
    }

    pub fn update(&mut self, bytes: &[u8]) {
        match self {
            Self::Sha256(h) => h.update(bytes),
            Self::Sha384(h) => h.update(bytes),
            Self::Sha512(h) => h.update(bytes),
        }
    }

    pub fn finalize(self) -> HashOutput {
        let mut buf = [0u8; MAX_HASH_LEN];
        let len = match self {
            Self::Sha256(h) => {
                let digest = h.finalize();
                buf[..32].copy_from_slice(&digest);
                32
            }
            Self::Sha384(h) => {
                let digest = h.finalize();
                buf[..48].copy_from_slice(&digest);
                48
            }
            Self::Sha512(h) => {
                let digest = h.finalize();
                buf[..64].copy_from_slice(&digest);
                64
            }
        };
        HashOutput { buf, len }
    }
}
