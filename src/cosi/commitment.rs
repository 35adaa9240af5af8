// Copyright 2019 Stichting Organism
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Nonces and the commitments published in the first round of CoSi

use core::fmt::Debug;
use curve25519_dalek::{
    edwards::{CompressedEdwardsY, EdwardsPoint},
    scalar::Scalar,
};
use zeroize::Zeroize;

use crate::errors::CosiError;
use crate::keys::{ExpandedSecretKey, SecretKey};
use crate::tools::{hash_to_scalar, scalar_from_canonical_bytes, EdwardsBoth, SCALAR_LENGTH};

/// The length of a `Commitment`, in bytes.
pub const COMMITMENT_LENGTH: usize = 32;

/// Counter used by `derive_commitment`.
pub const DEFAULT_NONCE_COUNTER: u32 = 0;

/// The secret nonce `r_i` of one signer for one message.
#[derive(Clone)]
pub struct Nonce(pub(crate) Scalar);

impl Debug for Nonce {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "Nonce( .. )")
    }
}

impl Zeroize for Nonce {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

impl Drop for Nonce {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Nonce {
    /// Convert this nonce to its canonical scalar bytes.
    pub fn to_bytes(&self) -> [u8; SCALAR_LENGTH] {
        self.0.to_bytes()
    }

    /// Construct a `Nonce` from canonical scalar bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Nonce, CosiError> {
        Ok(Nonce(scalar_from_canonical_bytes("Nonce", bytes)?))
    }

    /// The public commitment `R_i = r_i * G` for this nonce.
    pub fn commitment(&self) -> Commitment {
        Commitment(EdwardsBoth::from_point(EdwardsPoint::mul_base(&self.0)))
    }
}

/// A public nonce commitment `R_i`, or the aggregate `R` of a ceremony.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Commitment(pub(crate) EdwardsBoth);

impl Commitment {
    const DESCRIPTION: &'static str = "A CoSi nonce commitment as a 32-byte compressed point.";

    /// Wrap a point we computed ourselves.
    pub fn from_point(point: EdwardsPoint) -> Commitment {
        Commitment(EdwardsBoth::from_point(point))
    }

    /// Access the compressed Edwards form
    pub fn as_compressed(&self) -> &CompressedEdwardsY {
        self.0.as_compressed()
    }

    /// Access the point form
    pub fn as_point(&self) -> &EdwardsPoint {
        self.0.as_point()
    }

    /// View this commitment as a byte array.
    pub fn as_bytes(&self) -> &[u8; COMMITMENT_LENGTH] {
        self.0.as_bytes()
    }

    /// Convert this commitment to a byte array.
    pub fn to_bytes(&self) -> [u8; COMMITMENT_LENGTH] {
        self.0.to_bytes()
    }

    /// Decode a commitment, rejecting anything outside the prime-order subgroup.
    pub fn from_bytes(bytes: &[u8]) -> Result<Commitment, CosiError> {
        Ok(Commitment(EdwardsBoth::from_bytes(bytes)?))
    }
}

serde_boilerplate!(Commitment);

/// Derive the nonce and commitment a signer uses for `message`.
///
/// `r = SHA-512(prefix || message || counter) mod L` with the counter fixed
/// at zero. The same seed and message always give the same nonce, and no
/// randomness is accepted from the caller.
pub fn derive_commitment(secret_key: &SecretKey, message: &[u8]) -> (Nonce, Commitment) {
    derive_commitment_with_counter(secret_key, message, DEFAULT_NONCE_COUNTER)
}

/// As `derive_commitment`, for an explicit counter.
///
/// A ceremony restarted on the same message with a different participant set
/// has a different challenge, so it must use a different counter.
pub fn derive_commitment_with_counter(
    secret_key: &SecretKey,
    message: &[u8],
    counter: u32,
) -> (Nonce, Commitment) {
    nonce_from_expanded(&secret_key.expand(), message, counter)
}

pub(crate) fn nonce_from_expanded(
    expanded: &ExpandedSecretKey,
    message: &[u8],
    counter: u32,
) -> (Nonce, Commitment) {
    // 4 byte big endian counter
    let nonce = Nonce(hash_to_scalar(&[
        &expanded.nonce_prefix()[..],
        message,
        &counter.to_be_bytes()[..],
    ]));
    let commitment = nonce.commitment();
    (nonce, commitment)
}
