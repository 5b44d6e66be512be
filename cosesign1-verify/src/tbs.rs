// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! To-be-signed canonicalization and hashing.
//!
//! The bytes covered by a COSE_Sign1 signature are the definite-length CBOR
//! encoding of the Sig_structure
//! `["Signature1", body_protected, external_aad, payload]` with an empty
//! `external_aad`. The structure is never materialized: the encoder writes
//! straight into the running digest, so large payloads cost no extra memory.

use cosesign1_crypto::{CoseAlgorithm, HashOutput, TbsHasher};
use minicbor::Encoder;

use crate::error::VerifyError;

const SIG_STRUCTURE_CONTEXT_SIGNATURE1: &str = "Signature1";

/// Feeds encoder output into the running digest.
struct DigestWrite<'a>(&'a mut TbsHasher);

impl minicbor::encode::Write for DigestWrite<'_> {
    type Error = core::convert::Infallible;

    fn write_all(&mut self, buf: &[u8]) -> Result<(), Self::Error> {
        self.0.update(buf);
        Ok(())
    }
}

/// Hash the Sig_structure for `alg`.
///
/// `protected` must be the protected header bytes exactly as transmitted;
/// re-encoding them would silently break every signature over a map whose
/// original encoding was not canonical.
pub(crate) fn tbs_hash(
    alg: CoseAlgorithm,
    protected: &[u8],
    payload: &[u8],
) -> Result<HashOutput, VerifyError> {
    let mut hasher = TbsHasher::new(alg);
    {
        let mut enc = Encoder::new(DigestWrite(&mut hasher));
        enc.array(4)
            .and_then(|e| e.str(SIG_STRUCTURE_CONTEXT_SIGNATURE1))
            .and_then(|e| e.bytes(protected))
            .and_then(|e| e.bytes(&[])) // external_aad: empty bstr
            .and_then(|e| e.bytes(payload))
            .map_err(|_| VerifyError::HashFail)?;
    }
    Ok(hasher.finalize())
}
