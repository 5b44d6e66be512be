// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::CryptoError;

/// Supported COSE algorithms (IANA COSE Algorithms registry).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[repr(i32)]
pub enum CoseAlgorithm {
    /// ECDSA w/ SHA-256 over P-256.
    ES256 = -7,
    /// ECDSA w/ SHA-384 over P-384.
    ES384 = -35,
    /// ECDSA w/ SHA-512 over P-521.
    ES512 = -36,
    /// RSASSA-PSS w/ SHA-256.
    PS256 = -37,
    /// RSASSA-PKCS1v1.5 w/ SHA-256.
    RS256 = -257,
}

impl CoseAlgorithm {
    /// Map a COSE algorithm id to a supported algorithm.
    pub fn from_id(id: i32) -> Result<Self, CryptoError> {
        match id {
            -7 => Ok(Self::ES256),
            -35 => Ok(Self::ES384),
            -36 => Ok(Self::ES512),
            -37 => Ok(Self::PS256),
            -257 => Ok(Self::RS256),
            other => Err(CryptoError::UnsupportedSigningAlg(i64::from(other))),
        }
    }

    pub fn id(self) -> i32 {
        self as i32
    }

    /// Digest run over the Sig_structure for this algorithm.
    pub fn hash_algorithm(self) -> HashAlgorithm {
        match self {
            Self::ES256 | Self::PS256 | Self::RS256 => HashAlgorithm::Sha256,
            Self::ES384 => HashAlgorithm::Sha384,
            Self::ES512 => HashAlgorithm::Sha512,
        }
    }
}

/// Digests used for TBS hashing.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    pub fn output_len(self) -> usize {
        match self {
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}
