// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The verification entry point and signature dispatch.

use cosesign1_crypto::{pub_key_verify, CoseAlgorithm, PublicKey};

#[cfg(feature = "short-circuit")]
use cosesign1_crypto::short_circuit_kid;

use crate::envelope::parse_cose_sign1;
use crate::error::VerifyError;
use crate::options::VerifyOptions;
use crate::tbs::tbs_hash;

/// Verify a COSE_Sign1 message and surface its payload.
///
/// The pipeline runs once, forward, over `cose_sign1`: envelope decode,
/// header parsing (critical-parameters rule included), Sig_structure
/// hashing, then signature verification against `key`. On success the
/// returned slice is the enclosed payload, borrowed from `cose_sign1`; on
/// failure no payload is observable.
///
/// The signing algorithm is taken from the protected headers only. An `alg`
/// in the unprotected map is parsed but never trusted, since those bytes are
/// not covered by the signature.
pub fn verify<'a>(
    options: VerifyOptions,
    key: PublicKey<'_>,
    cose_sign1: &'a [u8],
) -> Result<&'a [u8], VerifyError> {
    let parsed = parse_cose_sign1(cose_sign1)?;

    if options.require_kid && parsed.unprotected.kid.is_none() {
        return Err(VerifyError::NoKid);
    }

    let alg_id = parsed
        .protected
        .alg_id
        .ok_or(VerifyError::UnsupportedSigningAlg)?;
    let alg = CoseAlgorithm::from_id(alg_id)?;

    let hash = tbs_hash(alg, parsed.protected_bytes, parsed.payload)?;

    #[cfg(feature = "short-circuit")]
    if parsed.unprotected.kid == Some(short_circuit_kid()) {
        if !options.allow_short_circuit {
            return Err(VerifyError::ShortCircuitSig);
        }
        short_circuit_verify(hash.as_bytes(), parsed.signature)?;
        return Ok(parsed.payload);
    }

    pub_key_verify(
        alg,
        key,
        parsed.unprotected.kid,
        hash.as_bytes(),
        parsed.signature,
    )?;

    Ok(parsed.payload)
}

/// Check a short-circuit signature: its leading bytes must equal the TBS
/// digest. Integrity only; no authenticity.
#[cfg(feature = "short-circuit")]
fn short_circuit_verify(tbs_hash: &[u8], signature: &[u8]) -> Result<(), VerifyError> {
    if tbs_hash.is_empty() || signature.len() < tbs_hash.len() {
        return Err(VerifyError::SigVerify);
    }
    if &signature[..tbs_hash.len()] != tbs_hash {
        return Err(VerifyError::SigVerify);
    }
    Ok(())
}
