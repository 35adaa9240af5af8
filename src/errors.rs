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

//! Errors which may occur when parsing keys, commitments and signatures from
//! wire formats, or while running a collective signing ceremony.

use thiserror::Error;

/// Why a byte string was refused as a point, scalar or key.
#[derive(Error, Clone, Copy, Debug, Eq, PartialEq)]
pub enum EncodingError {
    /// The input does not have the fixed width of the type.
    #[error("{name} must be {expected} bytes, got {actual}")]
    Length {
        /// The type being decoded
        name: &'static str,
        /// Required length in bytes
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// The y coordinate has no matching x on the curve.
    #[error("Cannot decompress Edwards point")]
    NotOnCurve,

    /// Decompression succeeded but re-compression gives different bytes.
    #[error("Edwards point is not canonically encoded")]
    NonCanonicalPoint,

    /// The point has a small-order component and is outside the prime-order subgroup.
    #[error("Edwards point has a torsion component")]
    TorsionComponent,

    /// The scalar is not reduced mod the group order.
    #[error("Scalar is not canonically encoded")]
    NonCanonicalScalar,

    /// The public half of a keypair does not belong to its seed.
    #[error("Public key does not match secret key")]
    KeypairMismatch,
}

/// Misuse of the ceremony coordinator.
#[derive(Error, Clone, Copy, Debug, Eq, PartialEq)]
pub enum CeremonyError {
    /// The public key is not part of the participant set.
    #[error("Participant is not part of this ceremony")]
    UnknownParticipant,

    /// The same public key appears twice in the participant set.
    #[error("Participant {index} repeats an earlier public key")]
    DuplicateParticipant {
        /// Position of the repeated key
        index: usize,
    },

    /// The participant already supplied a value for the current round.
    #[error("Participant {index} already contributed to this round")]
    DuplicateContribution {
        /// Position of the participant in the key order
        index: usize,
    },

    /// The event does not belong to the current round.
    #[error("Operation not allowed in the current ceremony state")]
    WrongState,
}

/// Represents an error in key derivation, aggregation, signing, or verification.
#[derive(Error, Clone, Debug, Eq, PartialEq)]
pub enum CosiError {
    /// Seed material of the wrong size.
    #[error("Seed must be 32 bytes, got {length}")]
    InvalidSeed {
        /// Length that was supplied
        length: usize,
    },

    /// Malformed point, scalar or key bytes.
    #[error("Invalid encoding: {kind}")]
    InvalidEncoding {
        /// What exactly was wrong with the bytes
        kind: EncodingError,
    },

    /// Aggregation was asked to combine nothing.
    #[error("Cannot aggregate an empty set of contributions")]
    EmptyInput,

    /// The verification equation wasn't satisfied
    #[error("Signature verification failed")]
    InvalidSignature,

    /// One signer's share does not satisfy `s_i * G == R_i + e * A_i`.
    #[error("Partial signature of participant {index} failed to verify")]
    InvalidPartialSignature {
        /// Position of the offending participant in the key order
        index: usize,
    },

    /// Ceremony
    #[error("Ceremony violated: {kind}")]
    Ceremony {
        /// The protocol rule that was broken
        kind: CeremonyError,
    },
}

impl From<EncodingError> for CosiError {
    fn from(kind: EncodingError) -> CosiError {
        CosiError::InvalidEncoding { kind }
    }
}

impl From<CeremonyError> for CosiError {
    fn from(kind: CeremonyError) -> CosiError {
        CosiError::Ceremony { kind }
    }
}

/// Shorthand for the length check every fixed-width decoder starts with.
pub(crate) fn check_length(
    name: &'static str,
    bytes: &[u8],
    expected: usize,
) -> Result<(), CosiError> {
    if bytes.len() != expected {
        return Err(EncodingError::Length {
            name,
            expected,
            actual: bytes.len(),
        }
        .into());
    }
    Ok(())
}

/// Convert `CosiError` into `::serde::de::Error` aka `SerdeError`
///
/// We should do this with `From` but right now the orphan rules prohibit
/// `impl From<CosiError> for E where E: ::serde::de::Error`.
pub(crate) fn serde_error_from_cosi_error<E>(err: CosiError) -> E
where
    E: ::serde::de::Error,
{
    E::custom(err)
}
