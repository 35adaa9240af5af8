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

//! Ed25519 Public Key generation,

use crate::errors::CosiError;
use crate::keys::{ExpandedSecretKey, SecretKey};
use crate::tools::EdwardsBoth;
use curve25519_dalek::{
    edwards::{CompressedEdwardsY, EdwardsPoint},
    scalar::Scalar,
};
use core::fmt::Debug;
use zeroize::Zeroize;

/// The length of an Ed25519 `PublicKey`, in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// An Ed25519 public key, also used for aggregate keys.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct PublicKey(pub(crate) EdwardsBoth);

impl Debug for PublicKey {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "PublicKey( {:?} )", self.0.as_compressed())
    }
}

impl Zeroize for PublicKey {
    fn zeroize(&mut self) {
        self.0.zeroize()
    }
}

impl PublicKey {
    const DESCRIPTION: &'static str = "An Ed25519 public key as a 32-byte compressed point.";

    /// Access the compressed Edwards form
    pub fn as_compressed(&self) -> &CompressedEdwardsY {
        self.0.as_compressed()
    }

    /// Extract the compressed Edwards form
    pub fn into_compressed(self) -> CompressedEdwardsY {
        self.0.into_compressed()
    }

    /// Access the point form
    pub fn as_point(&self) -> &EdwardsPoint {
        self.0.as_point()
    }

    /// Extract the point form
    pub fn into_point(self) -> EdwardsPoint {
        self.0.into_point()
    }

    /// Decompress into the `PublicKey` format that also retains the
    /// compressed form.
    pub fn from_compressed(compressed: CompressedEdwardsY) -> Result<PublicKey, CosiError> {
        Ok(PublicKey(EdwardsBoth::from_compressed(compressed)?))
    }

    /// Compress into the `PublicKey` format that also retains the
    /// uncompressed form.
    pub fn from_point(point: EdwardsPoint) -> PublicKey {
        PublicKey(EdwardsBoth::from_point(point))
    }

    /// Convert this public key to a byte array.
    #[inline]
    pub fn to_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.0.to_bytes()
    }

    /// View this public key as a byte array.
    #[inline]
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        self.0.as_bytes()
    }

    /// Construct a `PublicKey` from a slice of bytes.
    ///
    /// The bytes must be the canonical encoding of a point in the
    /// prime-order subgroup.
    ///
    /// # Example
    ///
    /// ```
    /// use ed25519_cosi::*;
    ///
    /// # fn doctest() -> Result<PublicKey, CosiError> {
    /// let public_key_bytes: [u8; PUBLIC_KEY_LENGTH] = [
    ///    215,  90, 152,   1, 130, 177,  10, 183, 213,  75, 254, 211, 201, 100,   7,  58,
    ///     14, 225, 114, 243, 218, 166,  35,  37, 175,   2,  26, 104, 247,   7,   81, 26];
    ///
    /// let public_key = PublicKey::from_bytes(&public_key_bytes)?;
    /// #
    /// # Ok(public_key)
    /// # }
    /// #
    /// # fn main() {
    /// #     assert!(doctest().is_ok());
    /// # }
    /// ```
    ///
    /// # Returns
    ///
    /// A `Result` whose okay value is a `PublicKey` or whose error value
    /// is `CosiError::InvalidEncoding` describing what was wrong.
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Result<PublicKey, CosiError> {
        Ok(PublicKey(EdwardsBoth::from_bytes(bytes)?))
    }

    /// Derive this public key from its corresponding `SecretKey`.
    pub fn from_secret(secret_key: &SecretKey) -> PublicKey {
        Self::from_expanded(&secret_key.expand())
    }

    /// Derive this public key from an already expanded secret.
    pub fn from_expanded(expanded: &ExpandedSecretKey) -> PublicKey {
        Self::from_secret_uncompressed(expanded.scalar())
    }

    /// Helper Function to convert [Scalar] into PubKey
    pub(crate) fn from_secret_uncompressed(privkey: &Scalar) -> PublicKey {
        PublicKey(EdwardsBoth::from_point(EdwardsPoint::mul_base(privkey)))
    }
}

impl<'a> From<&'a SecretKey> for PublicKey {
    fn from(source: &'a SecretKey) -> PublicKey {
        PublicKey::from_secret(source)
    }
}

serde_boilerplate!(PublicKey);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EncodingError;

    #[test]
    fn rfc8032_public_key() {
        let seed = hex::decode("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60").unwrap();
        let sk = SecretKey::from_bytes(&seed).unwrap();
        let pk = PublicKey::from_secret(&sk);

        assert_eq!(
            hex::encode(pk.as_bytes()),
            "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a"
        );
        assert_eq!(PublicKey::from_bytes(pk.as_bytes()).unwrap(), pk);
    }

    #[test]
    fn decode_errors() {
        assert_eq!(
            PublicKey::from_bytes(&[0u8; 16]).unwrap_err(),
            CosiError::InvalidEncoding {
                kind: EncodingError::Length {
                    name: "Point",
                    expected: PUBLIC_KEY_LENGTH,
                    actual: 16
                }
            }
        );

        let mut off_curve = [0u8; 32];
        off_curve[0] = 2;
        assert_eq!(
            PublicKey::from_bytes(&off_curve).unwrap_err(),
            CosiError::from(EncodingError::NotOnCurve)
        );
    }
}
