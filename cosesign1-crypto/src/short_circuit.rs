// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The well-known key id marking a short-circuit signature.
//!
//! Short-circuit signatures carry the TBS digest itself in place of a real
//! signature so test vectors can be produced without any private key. They
//! prove data integrity only; a signer announces one by putting this kid in
//! the unprotected headers.

/// Fixed 32-byte kid shared by signer and verifier for self-test vectors.
const SHORT_CIRCUIT_KID: [u8; 32] = [
    0xef, 0x95, 0x4b, 0x4b, 0xd9, 0xbd, 0xf6, 0x70, 0xd0, 0x33, 0x60, 0x82, 0xf5, 0xef, 0x15,
    0x2a, 0xf8, 0xf3, 0x5b, 0x6a, 0x6c, 0x00, 0xef, 0xa6, 0xa9, 0xa7, 0x1f, 0x49, 0x51, 0x7e,
    0x18, 0xc6,
];

pub fn short_circuit_kid() -> &'static [u8] {
    &SHORT_CIRCUIT_KID
}
