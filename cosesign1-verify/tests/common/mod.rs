// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Shared helpers for `cosesign1-verify` integration tests.
//!
//! Messages are assembled from pre-encoded pieces so individual tests can
//! substitute arbitrary bytes for any field (malformed unprotected maps,
//! truncated signatures, and so on) without fighting an encoder API.

#![allow(dead_code)]

use minicbor::data::Tag;
use minicbor::Encoder;
use signature::Signer as _;

pub(crate) const COSE_SIGN1_TAG: u64 = 18;

/// Encode `{ 1: alg }` protected headers.
pub(crate) fn protected_alg(alg: i64) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut enc = Encoder::new(&mut buf);
    enc.map(1).unwrap();
    enc.i64(1).unwrap();
    enc.i64(alg).unwrap();
    buf
}

/// The empty unprotected map.
pub(crate) fn empty_map() -> Vec<u8> {
    vec![0xa0]
}

/// Encode `{ 4: kid }` unprotected headers.
pub(crate) fn kid_map(kid: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut enc = Encoder::new(&mut buf);
    enc.map(1).unwrap();
    enc.i64(4).unwrap();
    enc.bytes(kid).unwrap();
    buf
}

/// Encode the Sig_structure bytes a signer commits to.
pub(crate) fn sig_structure(protected: &[u8], payload: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    let mut enc = Encoder::new(&mut out);
    enc.array(4).unwrap();
    enc.str("Signature1").unwrap();
    enc.bytes(protected).unwrap();
    enc.bytes(&[]).unwrap();
    enc.bytes(payload).unwrap();
    out
}

/// Assemble a tagged COSE_Sign1 from pre-encoded unprotected map bytes.
pub(crate) fn assemble(
    protected: &[u8],
    unprotected: &[u8],
    payload: &[u8],
    signature: &[u8],
) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut enc = Encoder::new(&mut out);
        enc.tag(Tag::new(COSE_SIGN1_TAG)).unwrap();
        enc.array(4).unwrap();
        enc.bytes(protected).unwrap();
    }
    out.extend_from_slice(unprotected);
    {
        let mut enc = Encoder::new(&mut out);
        enc.bytes(payload).unwrap();
        enc.bytes(signature).unwrap();
    }
    out
}

/// Fresh ES256 signing key.
pub(crate) fn es256_key() -> p256::ecdsa::SigningKey {
    p256::ecdsa::SigningKey::random(&mut p256::elliptic_curve::rand_core::OsRng)
}

/// DER SPKI for an ES256 verifying key.
pub(crate) fn es256_key_der(sk: &p256::ecdsa::SigningKey) -> Vec<u8> {
    use p256::pkcs8::EncodePublicKey as _;
    sk.verifying_key()
        .to_public_key_der()
        .unwrap()
        .as_bytes()
        .to_vec()
}

/// Raw `r || s` ES256 signature over the Sig_structure.
pub(crate) fn es256_sign(
    sk: &p256::ecdsa::SigningKey,
    protected: &[u8],
    payload: &[u8],
) -> Vec<u8> {
    let sig: p256::ecdsa::Signature = sk.sign(&sig_structure(protected, payload));
    sig.to_bytes().to_vec()
}

/// A complete ES256-signed message with the given unprotected map bytes.
pub(crate) fn es256_message(
    sk: &p256::ecdsa::SigningKey,
    unprotected: &[u8],
    payload: &[u8],
) -> Vec<u8> {
    let protected = protected_alg(-7);
    let signature = es256_sign(sk, &protected, payload);
    assemble(&protected, unprotected, payload, &signature)
}
