// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

/// Options for a single verification call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct VerifyOptions {
    /// Fail with [`VerifyError::NoKid`](crate::VerifyError::NoKid) when the
    /// unprotected headers carry no `kid`.
    pub require_kid: bool,

    /// Permit short-circuit (data-check only) signatures.
    ///
    /// Only honored when the crate is built with the `short-circuit`
    /// feature; never enable outside self-tests.
    pub allow_short_circuit: bool,
}
