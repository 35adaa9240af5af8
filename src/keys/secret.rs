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

//! Ed25519 Secret Key (seed) & Expanded Secret Key derivation

use core::fmt::Debug;
use curve25519_dalek::scalar::{clamp_integer, Scalar};
use rand::{CryptoRng, RngCore};
use sha2::{Digest, Sha512};
use subtle::{Choice, ConstantTimeEq};
use zeroize::Zeroize;

use crate::errors::CosiError;

/// The length of an Ed25519 `SecretKey` (seed), in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// An Ed25519 secret key: the 32 byte seed everything else is derived from.
#[derive(Default, Clone)]
pub struct SecretKey(pub(crate) [u8; SECRET_KEY_LENGTH]);

impl Debug for SecretKey {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "SecretKey( .. )")
    }
}

impl Eq for SecretKey {}
impl PartialEq for SecretKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).unwrap_u8() == 1u8
    }
}
impl ConstantTimeEq for SecretKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl Zeroize for SecretKey {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}

/// Overwrite secret key material with null bytes when it goes out of scope.
impl Drop for SecretKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl SecretKey {
    const DESCRIPTION: &'static str = "An Ed25519 secret key seed as 32 bytes.";

    /// Convert this secret key to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.0
    }

    /// View this secret key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_LENGTH] {
        &self.0
    }

    /// Construct a `SecretKey` from a slice of bytes.
    ///
    /// # Example
    ///
    /// ```
    /// use ed25519_cosi::*;
    ///
    /// # fn doctest() -> Result<SecretKey, CosiError> {
    /// let secret_key_bytes: [u8; SECRET_KEY_LENGTH] = [
    ///    157, 097, 177, 157, 239, 253, 090, 096,
    ///    186, 132, 074, 244, 146, 236, 044, 196,
    ///    068, 073, 197, 105, 123, 050, 105, 025,
    ///    112, 059, 172, 003, 028, 174, 127, 096, ];
    ///
    /// let secret_key: SecretKey = SecretKey::from_bytes(&secret_key_bytes)?;
    /// #
    /// # Ok(secret_key)
    /// # }
    /// #
    /// # fn main() {
    /// #     let result = doctest();
    /// #     assert!(result.is_ok());
    /// # }
    /// ```
    ///
    /// # Returns
    ///
    /// A `Result` whose okay value is a `SecretKey` or whose error value
    /// is `CosiError::InvalidSeed` when the slice is not exactly 32 bytes.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<SecretKey, CosiError> {
        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(CosiError::InvalidSeed {
                length: bytes.len(),
            });
        }

        let mut bits: [u8; SECRET_KEY_LENGTH] = [0u8; SECRET_KEY_LENGTH];
        bits.copy_from_slice(bytes);

        Ok(SecretKey(bits))
    }

    /// Generate a fresh `SecretKey` from a `csprng`.
    ///
    /// This is the only place randomness enters the crate; nonces are
    /// always derived from the seed and the message.
    ///
    /// ```
    /// use rand::rngs::OsRng;
    /// use ed25519_cosi::*;
    ///
    /// let secret_key: SecretKey = SecretKey::generate(&mut OsRng);
    /// let public_key: PublicKey = PublicKey::from_secret(&secret_key);
    /// ```
    pub fn generate<T>(csprng: &mut T) -> SecretKey
    where
        T: CryptoRng + RngCore,
    {
        let mut bits = [0u8; SECRET_KEY_LENGTH];
        csprng.fill_bytes(&mut bits);
        SecretKey(bits)
    }

    /// Expand the seed into its signing scalar and nonce prefix.
    pub fn expand(&self) -> ExpandedSecretKey {
        ExpandedSecretKey::from(self)
    }
}

serde_boilerplate!(SecretKey);

/// The hash-expanded form of a `SecretKey`.
///
/// `SHA-512(seed)` is split in two: the lower half is clamped and becomes
/// the signing scalar `a`, the upper half is the prefix nonces are derived
/// from. Neither half is ever serialized.
pub struct ExpandedSecretKey {
    pub(crate) scalar: Scalar,
    pub(crate) nonce: [u8; 32],
}

impl Debug for ExpandedSecretKey {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "ExpandedSecretKey( .. )")
    }
}

impl Zeroize for ExpandedSecretKey {
    fn zeroize(&mut self) {
        self.scalar.zeroize();
        self.nonce.zeroize();
    }
}

impl Drop for ExpandedSecretKey {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<'a> From<&'a SecretKey> for ExpandedSecretKey {
    fn from(secret_key: &'a SecretKey) -> ExpandedSecretKey {
        let mut h = Sha512::new();
        h.update(secret_key.as_bytes());
        let hash = h.finalize();

        let mut lower: [u8; 32] = [0u8; 32];
        let mut upper: [u8; 32] = [0u8; 32];
        lower.copy_from_slice(&hash[00..32]);
        upper.copy_from_slice(&hash[32..64]);

        // The clamped integer and its reduction are the same exponent on the
        // prime-order basepoint.
        let scalar = Scalar::from_bytes_mod_order(clamp_integer(lower));
        lower.zeroize();

        ExpandedSecretKey {
            scalar,
            nonce: upper,
        }
    }
}

impl ExpandedSecretKey {
    /// The signing scalar `a`.
    pub fn scalar(&self) -> &Scalar {
        &self.scalar
    }

    /// The prefix nonces are derived from.
    pub fn nonce_prefix(&self) -> &[u8; 32] {
        &self.nonce
    }
}
