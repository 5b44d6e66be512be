// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use cosesign1_crypto::CryptoError;

/// Why a COSE_Sign1 message failed to verify.
///
/// The first error encountered terminates the pipeline; callers never see a
/// payload alongside one of these.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    /// The CBOR decoder rejected the input.
    #[error("input is not well-formed CBOR")]
    CborNotWellFormed,

    /// Well-formed CBOR, but not shaped like a COSE_Sign1.
    #[error("input is not a valid COSE_Sign1")]
    Sign1Format,

    /// A header label or value has a type this implementation cannot accept.
    #[error("unacceptable CBOR type for a header label or value")]
    CborStructure,

    /// The signing algorithm id is missing, reserved, out of range, or
    /// unknown.
    #[error("missing or unsupported signing algorithm")]
    UnsupportedSigningAlg,

    /// A header map carries more labels than the fixed lists can track.
    #[error("too many header parameters")]
    TooManyHeaders,

    /// A label listed in `crit` is one this implementation does not handle.
    #[error("unhandled header parameter is listed as critical")]
    UnknownCriticalHeader,

    /// `require_kid` was set and the unprotected headers carry no kid.
    #[error("kid header parameter is required but absent")]
    NoKid,

    /// The message carries the short-circuit kid but the caller did not
    /// allow short-circuit verification.
    #[error("short-circuit signature not allowed")]
    ShortCircuitSig,

    /// The cryptographic signature check failed.
    #[error("signature verification failed")]
    SigVerify,

    /// The supplied public key could not be decoded for the message's
    /// algorithm.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// The hash collaborator failed.
    #[error("TBS hashing failed")]
    HashFail,
}

impl From<CryptoError> for VerifyError {
    fn from(e: CryptoError) -> Self {
        match e {
            CryptoError::UnsupportedSigningAlg(_) => Self::UnsupportedSigningAlg,
            CryptoError::InvalidPublicKey(msg) => Self::InvalidPublicKey(msg),
            CryptoError::SigVerify => Self::SigVerify,
        }
    }
}
