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

//! The Extra Sauce
//! Edwards point and scalar tooling
//!
//! We provide an `EdwardsBoth` type that contains both an uncompressed
//! `EdwardsPoint` along side its matching `CompressedEdwardsY`,
//! which helps the protocol avoid duplicate compressions
//! and/or decompressions. Every `EdwardsBoth` built from bytes has been
//! checked to be on the curve, canonically encoded and torsion free.

use core::fmt::Debug;
use curve25519_dalek::edwards::{CompressedEdwardsY, EdwardsPoint};
use curve25519_dalek::scalar::Scalar;
use sha2::{Digest, Sha512};
use subtle::ConstantTimeEq;

use crate::errors::{check_length, CosiError, EncodingError};

/// The length of a compressed Edwards point, in bytes.
pub const POINT_LENGTH: usize = 32;

/// The length of a canonical scalar, in bytes.
pub const SCALAR_LENGTH: usize = 32;

/// A point in the prime-order subgroup, kept in both forms.
#[derive(Copy, Clone)]
pub struct EdwardsBoth {
    compressed: CompressedEdwardsY,
    point: EdwardsPoint,
}

impl Debug for EdwardsBoth {
    fn fmt(&self, f: &mut ::core::fmt::Formatter) -> ::core::fmt::Result {
        write!(f, "EdwardsBoth( {:?} )", self.compressed)
    }
}

impl EdwardsBoth {
    /// Compress a point we computed ourselves.
    pub fn from_point(point: EdwardsPoint) -> EdwardsBoth {
        EdwardsBoth {
            compressed: point.compress(),
            point,
        }
    }

    /// Decompress and validate a compressed point.
    pub fn from_compressed(compressed: CompressedEdwardsY) -> Result<EdwardsBoth, CosiError> {
        let point = compressed.decompress().ok_or(EncodingError::NotOnCurve)?;

        // y >= p and "negative zero" x both decompress, but never round trip
        if point.compress() != compressed {
            return Err(EncodingError::NonCanonicalPoint.into());
        }
        if !point.is_torsion_free() {
            return Err(EncodingError::TorsionComponent.into());
        }

        Ok(EdwardsBoth { compressed, point })
    }

    /// Decode a 32 byte compressed point.
    pub fn from_bytes(bytes: &[u8]) -> Result<EdwardsBoth, CosiError> {
        check_length("Point", bytes, POINT_LENGTH)?;
        let mut bits = [0u8; POINT_LENGTH];
        bits.copy_from_slice(bytes);
        EdwardsBoth::from_compressed(CompressedEdwardsY(bits))
    }

    /// Access the compressed form
    pub fn as_compressed(&self) -> &CompressedEdwardsY {
        &self.compressed
    }

    /// Extract the compressed form
    pub fn into_compressed(self) -> CompressedEdwardsY {
        self.compressed
    }

    /// Access the point form
    pub fn as_point(&self) -> &EdwardsPoint {
        &self.point
    }

    /// Extract the point form
    pub fn into_point(self) -> EdwardsPoint {
        self.point
    }

    /// View the compressed form as bytes.
    pub fn as_bytes(&self) -> &[u8; POINT_LENGTH] {
        self.compressed.as_bytes()
    }

    /// Copy out the compressed form.
    pub fn to_bytes(&self) -> [u8; POINT_LENGTH] {
        self.compressed.to_bytes()
    }
}

// Canonical encodings are unique, so comparing them is comparing points.
impl PartialEq for EdwardsBoth {
    fn eq(&self, other: &EdwardsBoth) -> bool {
        self.as_bytes().ct_eq(other.as_bytes()).into()
    }
}

impl Eq for EdwardsBoth {}

impl ::zeroize::Zeroize for EdwardsBoth {
    fn zeroize(&mut self) {
        ::zeroize::Zeroize::zeroize(&mut self.compressed);
        ::zeroize::Zeroize::zeroize(&mut self.point);
    }
}

/// Reduce SHA-512 over the concatenation of `parts` into a scalar.
pub fn hash_to_scalar(parts: &[&[u8]]) -> Scalar {
    let mut h = Sha512::new();
    for part in parts {
        h.update(part);
    }
    let mut wide = [0u8; 64];
    wide.copy_from_slice(h.finalize().as_slice());
    Scalar::from_bytes_mod_order_wide(&wide)
}

/// Decode a scalar that must already be reduced mod L.
pub fn scalar_from_canonical_bytes(name: &'static str, bytes: &[u8]) -> Result<Scalar, CosiError> {
    check_length(name, bytes, SCALAR_LENGTH)?;
    let mut bits = [0u8; SCALAR_LENGTH];
    bits.copy_from_slice(bytes);
    Option::from(Scalar::from_canonical_bytes(bits))
        .ok_or_else(|| EncodingError::NonCanonicalScalar.into())
}

/// Decode a scalar, reducing mod L whatever 32 bytes come in.
pub fn scalar_from_bytes_mod_order(name: &'static str, bytes: &[u8]) -> Result<Scalar, CosiError> {
    check_length(name, bytes, SCALAR_LENGTH)?;
    let mut bits = [0u8; SCALAR_LENGTH];
    bits.copy_from_slice(bytes);
    Ok(Scalar::from_bytes_mod_order(bits))
}
