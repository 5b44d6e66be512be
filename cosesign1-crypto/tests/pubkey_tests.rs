// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use cosesign1_crypto::{pub_key_verify, CoseAlgorithm, CryptoError, PublicKey, TbsHasher};
use p256::pkcs8::EncodePublicKey as _;
use signature::hazmat::PrehashSigner as _;

#[test]
fn from_id_maps_the_supported_registry_entries() {
    assert_eq!(CoseAlgorithm::from_id(-7), Ok(CoseAlgorithm::ES256));
    assert_eq!(CoseAlgorithm::from_id(-35), Ok(CoseAlgorithm::ES384));
    assert_eq!(CoseAlgorithm::from_id(-36), Ok(CoseAlgorithm::ES512));
    assert_eq!(CoseAlgorithm::from_id(-37), Ok(CoseAlgorithm::PS256));
    assert_eq!(CoseAlgorithm::from_id(-257), Ok(CoseAlgorithm::RS256));

    assert_eq!(
        CoseAlgorithm::from_id(0),
        Err(CryptoError::UnsupportedSigningAlg(0))
    );
    assert_eq!(
        CoseAlgorithm::from_id(-8),
        Err(CryptoError::UnsupportedSigningAlg(-8))
    );
    assert_eq!(CoseAlgorithm::ES256.id(), -7);
}

#[test]
fn es256_verifies_a_prehash_signature() {
    let sk = p256::ecdsa::SigningKey::random(&mut p256::elliptic_curve::rand_core::OsRng);
    let key_der = sk.verifying_key().to_public_key_der().unwrap();

    let mut hasher = TbsHasher::new(CoseAlgorithm::ES256);
    hasher.update(b"to-be-signed bytes");
    let digest = hasher.finalize();

    let sig: p256::ecdsa::Signature = sk.sign_prehash(digest.as_bytes()).unwrap();

    pub_key_verify(
        CoseAlgorithm::ES256,
        PublicKey::from_der(key_der.as_bytes()),
        None,
        digest.as_bytes(),
        &sig.to_bytes(),
    )
    .unwrap();
}

#[test]
fn es256_rejects_a_different_digest() {
    let sk = p256::ecdsa::SigningKey::random(&mut p256::elliptic_curve::rand_core::OsRng);
    let key_der = sk.verifying_key().to_public_key_der().unwrap();

    let mut hasher = TbsHasher::new(CoseAlgorithm::ES256);
    hasher.update(b"to-be-signed bytes");
    let digest = hasher.finalize();

    let sig: p256::ecdsa::Signature = sk.sign_prehash(digest.as_bytes()).unwrap();

    let mut wrong = digest.as_bytes().to_vec();
    wrong[0] ^= 0x01;

    let err = pub_key_verify(
        CoseAlgorithm::ES256,
        PublicKey::from_der(key_der.as_bytes()),
        None,
        &wrong,
        &sig.to_bytes(),
    )
    .unwrap_err();
    assert_eq!(err, CryptoError::SigVerify);
}

#[test]
fn garbage_key_bytes_are_rejected() {
    let err = pub_key_verify(
        CoseAlgorithm::ES256,
        PublicKey::from_der(&[0xde, 0xad, 0xbe, 0xef]),
        None,
        &[0u8; 32],
        &[0u8; 64],
    )
    .unwrap_err();
    assert!(matches!(err, CryptoError::InvalidPublicKey(_)), "{err:?}");
}

#[test]
fn wrong_length_signature_is_a_verification_failure() {
    let sk = p256::ecdsa::SigningKey::random(&mut p256::elliptic_curve::rand_core::OsRng);
    let key_der = sk.verifying_key().to_public_key_der().unwrap();

    let err = pub_key_verify(
        CoseAlgorithm::ES256,
        PublicKey::from_der(key_der.as_bytes()),
        None,
        &[0u8; 32],
        &[0u8; 10],
    )
    .unwrap_err();
    assert_eq!(err, CryptoError::SigVerify);
}

#[cfg(feature = "short-circuit")]
#[test]
fn short_circuit_kid_is_stable_and_32_bytes() {
    let kid = cosesign1_crypto::short_circuit_kid();
    assert_eq!(kid.len(), 32);
    assert_eq!(kid, cosesign1_crypto::short_circuit_kid());
}
