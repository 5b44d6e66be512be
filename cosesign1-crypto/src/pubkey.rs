// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Public-key signature verification over a precomputed TBS digest.
//!
//! Public key inputs are intentionally flexible to support common calling
//! patterns:
//! - DER SubjectPublicKeyInfo (SPKI)
//! - DER X.509 certificate (the SubjectPublicKeyInfo is extracted)
//!
//! The verifier hashes the Sig_structure before dispatching here, so every
//! algorithm runs through the prehash verification traits. COSE carries
//! ECDSA signatures as the raw `r || s` concatenation.

use p256::elliptic_curve::sec1::ToEncodedPoint as _;
use rsa::pkcs8::DecodePublicKey as _;
use rsa::{pkcs1v15, pss, RsaPublicKey};
use sha2::Sha256;
use signature::hazmat::PrehashVerifier as _;

use crate::{CoseAlgorithm, CryptoError};

/// Caller-held public key material: DER SPKI or a DER X.509 certificate.
#[derive(Debug, Clone, Copy)]
pub struct PublicKey<'a> {
    der: &'a [u8],
}

impl<'a> PublicKey<'a> {
    pub fn from_der(der: &'a [u8]) -> Self {
        Self { der }
    }

    /// The DER SPKI bytes; certificates have theirs extracted.
    fn spki_der(&self) -> &'a [u8] {
        if let Ok((_, cert)) = x509_parser::parse_x509_certificate(self.der) {
            // `raw` is the DER encoding of the SPKI structure inside the
            // certificate.
            return cert.tbs_certificate.subject_pki.raw;
        }
        // Assume the input is already SPKI DER.
        self.der
    }
}

/// Verify `signature` over a TBS digest computed by the caller.
///
/// `kid` is accepted for parity with backends that resolve keys themselves;
/// this implementation takes the key solely from `key`.
pub fn pub_key_verify(
    alg: CoseAlgorithm,
    key: PublicKey<'_>,
    _kid: Option<&[u8]>,
    tbs_hash: &[u8],
    signature: &[u8],
) -> Result<(), CryptoError> {
    match alg {
        CoseAlgorithm::ES256 => verify_ecdsa_p256(key, tbs_hash, signature),
        CoseAlgorithm::ES384 => verify_ecdsa_p384(key, tbs_hash, signature),
        CoseAlgorithm::ES512 => verify_ecdsa_p521(key, tbs_hash, signature),
        CoseAlgorithm::RS256 => verify_rsa_pkcs1(key, tbs_hash, signature),
        CoseAlgorithm::PS256 => verify_rsa_pss(key, tbs_hash, signature),
    }
}

/// Verify ES256 (P-256 ECDSA).
fn verify_ecdsa_p256(key: PublicKey<'_>, hash: &[u8], sig: &[u8]) -> Result<(), CryptoError> {
    let pk = p256::PublicKey::from_public_key_der(key.spki_der())
        .map_err(|e| CryptoError::InvalidPublicKey(format!("bad P-256 public key: {e}")))?;

    // Convert to SEC1 encoded point bytes expected by the ECDSA verifying key.
    let ep = pk.to_encoded_point(false);
    let vk = p256::ecdsa::VerifyingKey::from_sec1_bytes(ep.as_bytes())
        .map_err(|e| CryptoError::InvalidPublicKey(format!("bad P-256 public key: {e}")))?;

    let signature = p256::ecdsa::Signature::from_slice(sig).map_err(|_| CryptoError::SigVerify)?;
    vk.verify_prehash(hash, &signature)
        .map_err(|_| CryptoError::SigVerify)
}

/// Verify ES384 (P-384 ECDSA).
fn verify_ecdsa_p384(key: PublicKey<'_>, hash: &[u8], sig: &[u8]) -> Result<(), CryptoError> {
    let pk = p384::PublicKey::from_public_key_der(key.spki_der())
        .map_err(|e| CryptoError::InvalidPublicKey(format!("bad P-384 public key: {e}")))?;
    let ep = pk.to_encoded_point(false);
    let vk = p384::ecdsa::VerifyingKey::from_sec1_bytes(ep.as_bytes())
        .map_err(|e| CryptoError::InvalidPublicKey(format!("bad P-384 public key: {e}")))?;
    let signature = p384::ecdsa::Signature::from_slice(sig).map_err(|_| CryptoError::SigVerify)?;
    vk.verify_prehash(hash, &signature)
        .map_err(|_| CryptoError::SigVerify)
}

/// Verify ES512 (P-521 ECDSA).
fn verify_ecdsa_p521(key: PublicKey<'_>, hash: &[u8], sig: &[u8]) -> Result<(), CryptoError> {
    let pk = p521::PublicKey::from_public_key_der(key.spki_der())
        .map_err(|e| CryptoError::InvalidPublicKey(format!("bad P-521 public key: {e}")))?;
    let ep = pk.to_encoded_point(false);
    let vk = p521::ecdsa::VerifyingKey::from_sec1_bytes(ep.as_bytes())
        .map_err(|e| CryptoError::InvalidPublicKey(format!("bad P-521 public key: {e}")))?;
    let signature = p521::ecdsa::Signature::from_slice(sig).map_err(|_| CryptoError::SigVerify)?;
    vk.verify_prehash(hash, &signature)
        .map_err(|_| CryptoError::SigVerify)
}

/// Decode an RSA public key from DER certificate or DER SPKI.
fn rsa_public_key(key: PublicKey<'_>) -> Result<RsaPublicKey, CryptoError> {
    RsaPublicKey::from_public_key_der(key.spki_der())
        .map_err(|e| CryptoError::InvalidPublicKey(format!("bad RSA public key: {e}")))
}

/// Verify RS256 (RSASSA-PKCS1v1.5 + SHA-256).
fn verify_rsa_pkcs1(key: PublicKey<'_>, hash: &[u8], sig: &[u8]) -> Result<(), CryptoError> {
    let vk = pkcs1v15::VerifyingKey::<Sha256>::new(rsa_public_key(key)?);
    let signature = pkcs1v15::Signature::try_from(sig).map_err(|_| CryptoError::SigVerify)?;
    vk.verify_prehash(hash, &signature)
        .map_err(|_| CryptoError::SigVerify)
}

/// Verify PS256 (RSASSA-PSS + SHA-256).
fn verify_rsa_pss(key: PublicKey<'_>, hash: &[u8], sig: &[u8]) -> Result<(), CryptoError> {
    let vk = pss::VerifyingKey::<Sha256>::new(rsa_public_key(key)?);
    let signature = pss::Signature::try_from(sig).map_err(|_| CryptoError::SigVerify)?;
    vk.verify_prehash(hash, &signature)
        .map_err(|_| CryptoError::SigVerify)
}
