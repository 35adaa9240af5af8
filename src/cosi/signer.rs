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

//! Protocol People
//!
//! The signer side of a ceremony: committing to a nonce and producing a
//! partial signature once the aggregate commitment is known.

use core::fmt::Debug;
use curve25519_dalek::{edwards::EdwardsPoint, scalar::Scalar};
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::cosi::commitment::nonce_from_expanded;
use crate::cosi::{Commitment, Nonce, DEFAULT_NONCE_COUNTER};
use crate::errors::CosiError;
use crate::keys::{Keypair, PublicKey, SecretKey};
use crate::signature::challenge_scalar;
use crate::tools::{scalar_from_bytes_mod_order, SCALAR_LENGTH};

/// One signer's share `s_i` of the collective response.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct PartialSignature(pub(crate) Scalar);

impl Debug for PartialSignature {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "PartialSignature( {:?} )", &self.0)
    }
}

impl PartialSignature {
    const DESCRIPTION: &'static str = "A CoSi partial signature as a 32-byte scalar.";

    /// Convert this share to a byte array.
    pub fn to_bytes(&self) -> [u8; SCALAR_LENGTH] {
        self.0.to_bytes()
    }

    /// Decode a share, reducing it mod L.
    pub fn from_bytes(bytes: &[u8]) -> Result<PartialSignature, CosiError> {
        Ok(PartialSignature(scalar_from_bytes_mod_order("PartialSignature", bytes)?))
    }

    /// View the share as a scalar.
    pub fn as_scalar(&self) -> &Scalar {
        &self.0
    }
}

serde_boilerplate!(PartialSignature);

/// The challenge `e = H(R || A || M) mod L` every partial signature in a
/// ceremony is bound to.
pub fn challenge(
    aggregate_commitment: &Commitment,
    aggregate_key: &PublicKey,
    message: &[u8],
) -> Scalar {
    challenge_scalar(aggregate_commitment.as_compressed(), aggregate_key, message)
}

/// Compute this signer's share `s_i = r_i + e * a_i mod L`.
///
/// Only arithmetic on the secrets, no branching on them.
pub fn partial_sign(
    message: &[u8],
    secret_key: &SecretKey,
    aggregate_key: &PublicKey,
    nonce: &Nonce,
    aggregate_commitment: &Commitment,
) -> PartialSignature {
    let expanded = secret_key.expand();
    let e = challenge(aggregate_commitment, aggregate_key, message);
    PartialSignature(nonce.0 + e * expanded.scalar())
}

/// Check one share against the signer's own key and commitment:
/// `s_i * G == R_i + e * A_i`.
///
/// `index` is only used to name the signer in the error.
#[allow(non_snake_case)]
pub fn verify_partial(
    message: &[u8],
    public_key: &PublicKey,
    commitment: &Commitment,
    aggregate_key: &PublicKey,
    aggregate_commitment: &Commitment,
    partial: &PartialSignature,
    index: usize,
) -> Result<(), CosiError> {
    let e = challenge(aggregate_commitment, aggregate_key, message);

    let lhs = EdwardsPoint::mul_base(&partial.0).compress();
    let rhs = (commitment.as_point() + e * public_key.as_point()).compress();

    if lhs.as_bytes().ct_eq(rhs.as_bytes()).into() {
        Ok(())
    } else {
        debug!(index, "partial signature failed to verify");
        Err(CosiError::InvalidPartialSignature { index })
    }
}

/// A Signer in CoSi, holding the long lived key of one device.
/// Entry point to the signer side of the protocol.
#[derive(Debug, Clone)]
pub struct Signer {
    key: Keypair,
}

impl From<Keypair> for Signer {
    fn from(key: Keypair) -> Signer {
        Signer { key }
    }
}

impl Signer {
    /// Create a signer from a raw seed.
    pub fn from_seed(seed: &[u8]) -> Result<Signer, CosiError> {
        Ok(Signer::from(Keypair::from_seed(seed)?))
    }

    /// The public key this signer contributes to the aggregate.
    pub fn public_key(&self) -> &PublicKey {
        &self.key.public
    }

    /// Round one: the nonce to keep and the commitment to publish.
    pub fn commit(&self, message: &[u8]) -> (Nonce, Commitment) {
        self.commit_with_counter(message, DEFAULT_NONCE_COUNTER)
    }

    /// Round one with an explicit nonce counter.
    pub fn commit_with_counter(&self, message: &[u8], counter: u32) -> (Nonce, Commitment) {
        nonce_from_expanded(&self.key.secret.expand(), message, counter)
    }

    /// Round two: the partial signature for the agreed aggregate key and
    /// aggregate commitment.
    pub fn sign(
        &self,
        message: &[u8],
        aggregate_key: &PublicKey,
        nonce: &Nonce,
        aggregate_commitment: &Commitment,
    ) -> PartialSignature {
        partial_sign(message, &self.key.secret, aggregate_key, nonce, aggregate_commitment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cosi::{combine_commitments, combine_keys, combine_signature};
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    fn signers(n: usize) -> Vec<Signer> {
        let mut csprng = ChaChaRng::from_seed([11u8; 32]);
        (0..n).map(|_| Signer::from(Keypair::generate(&mut csprng))).collect()
    }

    #[test]
    fn shares_verify_individually_and_together() {
        let message: &[u8] = b"Watch closely everyone";
        let signers = signers(3);

        let publics: Vec<PublicKey> = signers.iter().map(|s| *s.public_key()).collect();
        let aggregate_key = combine_keys(&publics).unwrap();

        let rounds: Vec<(Nonce, Commitment)> = signers.iter().map(|s| s.commit(message)).collect();
        let commitments: Vec<Commitment> = rounds.iter().map(|(_, c)| *c).collect();
        let aggregate_commitment = combine_commitments(&commitments).unwrap();

        let partials: Vec<PartialSignature> = signers
            .iter()
            .zip(rounds.iter())
            .map(|(s, (r, _))| s.sign(message, &aggregate_key, r, &aggregate_commitment))
            .collect();

        for (i, partial) in partials.iter().enumerate() {
            assert!(verify_partial(
                message,
                &publics[i],
                &commitments[i],
                &aggregate_key,
                &aggregate_commitment,
                partial,
                i
            )
            .is_ok());
        }

        let sig = combine_signature(&aggregate_commitment, &partials).unwrap();
        assert!(sig.verify(message, &aggregate_key).is_ok());
        assert!(sig.verify(b"Watch closely no one", &aggregate_key).is_err());
    }

    #[test]
    fn tampered_share_is_named() {
        let message: &[u8] = b"share check";
        let signers = signers(2);

        let publics: Vec<PublicKey> = signers.iter().map(|s| *s.public_key()).collect();
        let aggregate_key = combine_keys(&publics).unwrap();
        let (r0, c0) = signers[0].commit(message);
        let (_, c1) = signers[1].commit(message);
        let aggregate_commitment = combine_commitments(&[c0, c1]).unwrap();

        let good = signers[0].sign(message, &aggregate_key, &r0, &aggregate_commitment);
        let bad = PartialSignature(good.0 + Scalar::ONE);

        assert_eq!(
            verify_partial(message, &publics[0], &c0, &aggregate_key, &aggregate_commitment, &bad, 0),
            Err(CosiError::InvalidPartialSignature { index: 0 })
        );
        // signer 0's share checked against signer 1's key
        assert_eq!(
            verify_partial(message, &publics[1], &c1, &aggregate_key, &aggregate_commitment, &good, 1),
            Err(CosiError::InvalidPartialSignature { index: 1 })
        );
    }
}
