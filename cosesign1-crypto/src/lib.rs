// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Cryptographic collaborators for COSE_Sign1 verification.
//!
//! This crate keeps the primitives behind a small, stable surface so the
//! verification pipeline never touches a curve or digest type directly:
//! - [`CoseAlgorithm`]: the supported subset of the IANA COSE registry.
//! - [`TbsHasher`]/[`HashOutput`]: incremental digest over the Sig_structure.
//! - [`pub_key_verify`]: signature verification over a precomputed digest.
//! - [`short_circuit_kid`]: the well-known kid marking self-test signatures
//!   (behind the `short-circuit` feature).

pub mod algorithms;
pub mod hash;
pub mod pubkey;
#[cfg(feature = "short-circuit")]
mod short_circuit;

pub use algorithms::{CoseAlgorithm, HashAlgorithm};
pub use hash::{HashOutput, TbsHasher, MAX_HASH_LEN};
pub use pubkey::{pub_key_verify, PublicKey};
#[cfg(feature = "short-circuit")]
pub use short_circuit::short_circuit_kid;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CryptoError {
    #[error("unsupported COSE signing algorithm: {0}")]
    UnsupportedSigningAlg(i64),

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("signature verification failed")]
    SigVerify,
}
