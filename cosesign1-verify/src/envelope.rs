// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! COSE_Sign1 envelope decoding.
//!
//! A COSE_Sign1 message is the tagged four-element array
//! `18([protected : bstr, unprotected : map, payload : bstr, signature : bstr])`.
//! Decoding yields a borrowed view of the four fields with both header maps
//! parsed; the protected map additionally keeps its transmitted bytes, which
//! are covered by the signature and must never be re-encoded.
//!
//! Known limitations, by design: the outer array must be definite-length,
//! the tag is mandatory, and detached (null) payloads are rejected.

use minicbor::data::{Tag, Type};
use minicbor::Decoder;

use crate::error::VerifyError;
use crate::headers::{expect_bytes, parse_header_map, parse_protected_headers, HeaderSet};

/// CBOR tag marking a COSE_Sign1 message (RFC 8152).
pub const COSE_SIGN1_TAG: u64 = 18;

/// Decoded view of one COSE_Sign1 message. All slices borrow from the input.
#[derive(Debug, Clone, Copy)]
pub struct ParsedCoseSign1<'a> {
    /// Protected header map exactly as transmitted (bstr contents).
    pub protected_bytes: &'a [u8],
    /// Parsed protected header parameters.
    pub protected: HeaderSet<'a>,
    /// Parsed unprotected header parameters.
    pub unprotected: HeaderSet<'a>,
    /// The enclosed payload. Unverified until the signature check passes.
    pub payload: &'a [u8],
    /// Signature bytes; length and contents are algorithm-dependent.
    pub signature: &'a [u8],
}

/// Decode a COSE_Sign1 message into its four fields, parsing both header
/// maps along the way.
pub fn parse_cose_sign1(input: &[u8]) -> Result<ParsedCoseSign1<'_>, VerifyError> {
    let mut dec = Decoder::new(input);

    match dec.datatype().map_err(|_| VerifyError::CborNotWellFormed)? {
        Type::Tag => {
            let tag = dec.tag().map_err(|_| VerifyError::CborNotWellFormed)?;
            if tag != Tag::new(COSE_SIGN1_TAG) {
                return Err(VerifyError::Sign1Format);
            }
        }
        // Untagged input is rejected; the tag is what says this is a
        // COSE_Sign1 and not some other COSE structure.
        _ => return Err(VerifyError::Sign1Format),
    }

    match dec.datatype().map_err(|_| VerifyError::CborNotWellFormed)? {
        Type::Array => {}
        _ => return Err(VerifyError::Sign1Format),
    }
    let len = dec.array().map_err(|_| VerifyError::CborNotWellFormed)?;
    if len != Some(4) {
        return Err(VerifyError::Sign1Format);
    }

    let protected_bytes = expect_bytes(&mut dec)?;
    let protected = parse_protected_headers(protected_bytes)?;

    let unprotected = parse_header_map(&mut dec)?;

    let payload = expect_bytes(&mut dec)?;
    let signature = expect_bytes(&mut dec)?;

    if dec.position() != input.len() {
        return Err(VerifyError::Sign1Format);
    }

    Ok(ParsedCoseSign1 {
        protected_bytes,
        protected,
        unprotected,
        payload,
        signature,
    })
}
