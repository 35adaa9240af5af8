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

//! Ed25519 signatures, single or collective, and their verification

use curve25519_dalek::{
    edwards::{CompressedEdwardsY, EdwardsPoint},
    scalar::Scalar,
};
use core::fmt::Debug;
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::errors::{check_length, CosiError};
use crate::keys::PublicKey;
use crate::tools::{hash_to_scalar, scalar_from_canonical_bytes, EdwardsBoth};

/// The length of an Ed25519 `Signature`, in bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// An Ed25519 signature.
///
/// # Note
///
/// These signatures are "detached", they do **not** include a copy
/// of the message which has been signed.
#[allow(non_snake_case)]
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Signature {
    /// `R` is an `EdwardsPoint`, the (aggregate) nonce commitment.
    ///
    /// For a single signer this is `r * G` for the deterministic nonce `r`;
    /// for a collective signature it is the sum of every participant's
    /// `R_i`.
    pub(crate) R: CompressedEdwardsY,

    /// `s` is a `Scalar`, formed by s = r + ea
    /// e = HASH(R, PublicKey, message)
    ///
    /// - the `r` portion of this `Signature`,
    /// - the 'a' is the secret scalar signing
    /// - the `e` is the challenge
    ///
    /// For a collective signature `s` is the sum of the partial signatures.
    pub(crate) s: Scalar,
}

impl Debug for Signature {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "Signature( R: {:?}, s: {:?} )", &self.R, &self.s)
    }
}

impl Signature {
    const DESCRIPTION: &'static str = "An Ed25519 signature as 64 bytes, R followed by s.";

    /// Assemble a signature from a commitment and a response scalar.
    #[allow(non_snake_case)]
    pub fn from_parts(R: CompressedEdwardsY, s: Scalar) -> Signature {
        Signature { R, s }
    }

    /// The commitment half.
    pub fn commitment(&self) -> &CompressedEdwardsY {
        &self.R
    }

    /// The response half.
    pub fn response(&self) -> &Scalar {
        &self.s
    }

    /// Convert this `Signature` to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        let mut signature_bytes: [u8; SIGNATURE_LENGTH] = [0u8; SIGNATURE_LENGTH];

        signature_bytes[..32].copy_from_slice(&self.R.as_bytes()[..]);
        signature_bytes[32..].copy_from_slice(&self.s.as_bytes()[..]);
        signature_bytes
    }

    /// Construct a `Signature` from a slice of bytes.
    ///
    /// Only the length and the canonicity of `s` are checked here; `R` is
    /// decoded during verification.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<Signature, CosiError> {
        check_length("Signature", bytes, SIGNATURE_LENGTH)?;

        let mut lower: [u8; 32] = [0u8; 32];
        lower.copy_from_slice(&bytes[..32]);

        let s = scalar_from_canonical_bytes("Signature", &bytes[32..])?;

        Ok(Signature {
            R: CompressedEdwardsY(lower),
            s,
        })
    }

    /// Verify this signature on `message` against `public_key`.
    ///
    /// The public key may be a single signer's key or an aggregate key; the
    /// equation is the same: `s * G == R + e * A` with
    /// `e = H(R || A || M)`. Both sides are compared by their canonical
    /// encodings.
    ///
    /// # Return
    ///
    /// Returns `Ok(())` if the signature is valid, and
    /// `Err(CosiError::InvalidSignature)` otherwise.
    #[allow(non_snake_case)]
    pub fn verify(&self, message: &[u8], public_key: &PublicKey) -> Result<(), CosiError> {
        let R = match EdwardsBoth::from_compressed(self.R) {
            Ok(R) => R,
            Err(err) => {
                debug!(%err, "signature commitment rejected");
                return Err(CosiError::InvalidSignature);
            }
        };

        let e = challenge_scalar(&self.R, public_key, message);

        let lhs = EdwardsPoint::mul_base(&self.s).compress();
        let rhs = (R.as_point() + e * public_key.as_point()).compress();

        if lhs.as_bytes().ct_eq(rhs.as_bytes()).into() {
            Ok(())
        } else {
            debug!("verification equation was not satisfied");
            Err(CosiError::InvalidSignature)
        }
    }
}

/// `e = H(R || A || M) mod L`, the challenge shared by signing and verification.
#[allow(non_snake_case)]
pub(crate) fn challenge_scalar(R: &CompressedEdwardsY, A: &PublicKey, message: &[u8]) -> Scalar {
    hash_to_scalar(&[&R.as_bytes()[..], &A.as_bytes()[..], message])
}

serde_boilerplate!(Signature);
