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

//! Ed25519 key pairs and single-signer signing

use crate::errors::{CosiError, EncodingError};
use crate::keys::{PublicKey, SecretKey, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH};
use crate::signature::Signature;
use crate::tools::hash_to_scalar;
use curve25519_dalek::edwards::EdwardsPoint;
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

/// The length of an Ed25519 `Keypair`, in bytes.
pub const KEYPAIR_LENGTH: usize = SECRET_KEY_LENGTH + PUBLIC_KEY_LENGTH;

/// An Ed25519 keypair.
#[derive(Debug, Clone)]
pub struct Keypair {
    /// The secret half of this keypair.
    pub secret: SecretKey,
    /// The public half of this keypair.
    pub public: PublicKey,
}

impl From<SecretKey> for Keypair {
    fn from(secret: SecretKey) -> Keypair {
        let public = PublicKey::from_secret(&secret);
        Keypair { secret, public }
    }
}

impl Zeroize for Keypair {
    fn zeroize(&mut self) {
        self.secret.zeroize();
    }
}

impl Drop for Keypair {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl Keypair {
    const DESCRIPTION: &'static str = "An Ed25519 seed followed by its public key, 64 bytes.";

    /// Convert this keypair to bytes.
    ///
    /// # Returns
    ///
    /// An array of bytes, `[u8; KEYPAIR_LENGTH]`.  The first
    /// `SECRET_KEY_LENGTH` of bytes is the `SecretKey`, and the next
    /// `PUBLIC_KEY_LENGTH` bytes is the `PublicKey`
    pub fn to_bytes(&self) -> [u8; KEYPAIR_LENGTH] {
        let mut bytes: [u8; KEYPAIR_LENGTH] = [0u8; KEYPAIR_LENGTH];

        bytes[..SECRET_KEY_LENGTH].copy_from_slice(self.secret.as_bytes());
        bytes[SECRET_KEY_LENGTH..].copy_from_slice(self.public.as_bytes());
        bytes
    }

    /// Construct a `Keypair` from the bytes of a `SecretKey` and `PublicKey`.
    ///
    /// The public half is recomputed from the seed and must match, so a
    /// mismatched pair never reaches the signer.
    pub fn from_bytes(bytes: &[u8]) -> Result<Keypair, CosiError> {
        crate::errors::check_length("Keypair", bytes, KEYPAIR_LENGTH)?;
        let secret = SecretKey::from_bytes(&bytes[..SECRET_KEY_LENGTH])?;
        let public = PublicKey::from_bytes(&bytes[SECRET_KEY_LENGTH..])?;

        if PublicKey::from_secret(&secret) != public {
            return Err(EncodingError::KeypairMismatch.into());
        }

        Ok(Keypair { secret, public })
    }

    /// Derive the keypair for a raw seed.
    pub fn from_seed(seed: &[u8]) -> Result<Keypair, CosiError> {
        Ok(Keypair::from(SecretKey::from_bytes(seed)?))
    }

    /// Generate an Ed25519 keypair.
    ///
    /// # Example
    ///
    /// ```
    /// use rand::rngs::OsRng;
    /// use ed25519_cosi::*;
    ///
    /// let keypair: Keypair = Keypair::generate(&mut OsRng);
    /// ```
    ///
    /// # Input
    ///
    /// A CSPRNG with a `fill_bytes()` method, e.g. `rand_chacha::ChaChaRng`.
    pub fn generate<R>(csprng: &mut R) -> Keypair
    where
        R: CryptoRng + RngCore,
    {
        Keypair::from(SecretKey::generate(csprng))
    }

    /// Sign a message alone, as a plain RFC 8032 Ed25519 signature.
    ///
    /// The nonce is `SHA-512(prefix || M)`, so the output matches any
    /// standard Ed25519 signer for the same seed and message. Collective
    /// signing goes through `cosi::Signer` instead.
    #[allow(non_snake_case)]
    pub fn sign(&self, message: &[u8]) -> Signature {
        let expanded = self.secret.expand();

        let mut r = hash_to_scalar(&[&expanded.nonce_prefix()[..], message]);
        let R = EdwardsPoint::mul_base(&r).compress();

        let k = hash_to_scalar(&[&R.as_bytes()[..], &self.public.as_bytes()[..], message]);
        let s = r + k * expanded.scalar();

        r.zeroize();

        Signature { R, s }
    }

    /// Verify a signature on a message with this keypair's public key.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<(), CosiError> {
        signature.verify(message, &self.public)
    }
}

serde_boilerplate!(Keypair);

#[cfg(test)]
mod test {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaChaRng;

    #[test]
    fn keypair_round_trip() {
        let keypair = Keypair::generate(&mut ChaChaRng::from_seed([0u8; 32]));
        let decoded = Keypair::from_bytes(&keypair.to_bytes()).unwrap();

        assert_eq!(decoded.secret, keypair.secret);
        assert_eq!(decoded.public, keypair.public);
    }

    #[test]
    fn keypair_mismatch() {
        let mut csprng = ChaChaRng::from_seed([1u8; 32]);
        let a = Keypair::generate(&mut csprng);
        let b = Keypair::generate(&mut csprng);

        let mut bytes = a.to_bytes();
        bytes[SECRET_KEY_LENGTH..].copy_from_slice(b.public.as_bytes());

        assert_eq!(
            Keypair::from_bytes(&bytes).unwrap_err(),
            CosiError::from(EncodingError::KeypairMismatch)
        );
    }

    #[test]
    fn sign_verify() {
        let keypair = Keypair::generate(&mut ChaChaRng::from_seed([2u8; 32]));
        let good: &[u8] = b"test message";
        let bad: &[u8] = b"wrong message";

        let sig = keypair.sign(good);
        assert!(keypair.verify(good, &sig).is_ok());
        assert_eq!(keypair.verify(bad, &sig), Err(CosiError::InvalidSignature));
    }

    #[test]
    fn keypair_clear_on_zeroize() {
        let mut keypair = Keypair::generate(&mut ChaChaRng::from_seed([3u8; 32]));
        keypair.zeroize();
        assert_eq!(keypair.secret.to_bytes(), [0u8; SECRET_KEY_LENGTH]);
    }
}
