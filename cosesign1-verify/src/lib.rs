// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Single-pass COSE_Sign1 verification (RFC 8152 §4.2).
//!
//! Given a byte sequence, verification options, and a public key, [`verify`]
//! decides whether the bytes are a well-formed, correctly signed COSE_Sign1
//! and, if so, exposes the enclosed payload:
//!
//! - The envelope, both header maps, the payload, and the signature are
//!   decoded in one forward pass; every parsed slice borrows from the input.
//! - The critical-parameters (`crit`) rule is enforced: a message naming an
//!   unhandled label as critical is rejected.
//! - The Sig_structure is hashed incrementally and never materialized.
//! - Signatures verify against the caller's key (ECDSA or RSA), or via the
//!   short-circuit self-test scheme when both the `short-circuit` feature
//!   and [`VerifyOptions::allow_short_circuit`] permit it.
//!
//! Verification is synchronous, allocation-light, and safe to run
//! concurrently on distinct inputs.

pub mod envelope;
pub mod error;
pub mod headers;
pub mod options;
mod tbs;
mod verify;

pub use envelope::{parse_cose_sign1, ParsedCoseSign1, COSE_SIGN1_TAG};
pub use error::VerifyError;
pub use headers::{ContentType, HeaderSet, HEADER_LIST_MAX};
pub use options::VerifyOptions;
pub use verify::verify;

pub use cosesign1_crypto::{CoseAlgorithm, PublicKey};

#[cfg(feature = "short-circuit")]
pub use cosesign1_crypto::short_circuit_kid;
