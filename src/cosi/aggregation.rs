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

//! Implementation of CoSi key, commitment and signature aggregation.
//!
//! Aggregates are plain sums with no per-key delinearization factor, so
//! they do not depend on the order contributions arrive in.

use curve25519_dalek::{
    edwards::EdwardsPoint,
    scalar::Scalar,
    traits::IsIdentity,
};
use tracing::warn;

use crate::cosi::{Commitment, PartialSignature};
use crate::errors::CosiError;
use crate::keys::PublicKey;
use crate::signature::Signature;

/// Sum a non-empty sequence of points.
///
/// An identity result is returned as is; it only happens when the inputs
/// cancel out, and callers that care must check the participant set.
pub fn combine_points<I>(points: I) -> Result<EdwardsPoint, CosiError>
where
    I: IntoIterator<Item = EdwardsPoint>,
{
    let mut points = points.into_iter();
    let first = points.next().ok_or(CosiError::EmptyInput)?;
    let sum = points.fold(first, |acc, p| acc + p);

    if sum.is_identity() {
        warn!("aggregated point is the identity");
    }

    Ok(sum)
}

/// Sum a non-empty sequence of scalars mod L.
pub fn combine_scalars<I>(scalars: I) -> Result<Scalar, CosiError>
where
    I: IntoIterator<Item = Scalar>,
{
    let mut scalars = scalars.into_iter();
    let first = scalars.next().ok_or(CosiError::EmptyInput)?;
    Ok(scalars.fold(first, |acc, s| acc + s))
}

/// Aggregate the participants' public keys into the key the collective
/// signature verifies against.
pub fn combine_keys(public_keys: &[PublicKey]) -> Result<PublicKey, CosiError> {
    combine_points(public_keys.iter().map(|pk| pk.into_point())).map(PublicKey::from_point)
}

/// Aggregate the participants' commitments for one message.
pub fn combine_commitments(commitments: &[Commitment]) -> Result<Commitment, CosiError> {
    combine_points(commitments.iter().map(|c| *c.as_point())).map(Commitment::from_point)
}

/// Sum the partial signatures into the response scalar `S`.
pub fn combine_partials(partials: &[PartialSignature]) -> Result<Scalar, CosiError> {
    combine_scalars(partials.iter().map(|s| s.0))
}

/// Assemble the final `R || S` signature.
pub fn combine_signature(
    aggregate_commitment: &Commitment,
    partials: &[PartialSignature],
) -> Result<Signature, CosiError> {
    let s = combine_partials(partials)?;
    Ok(Signature::from_parts(*aggregate_commitment.as_compressed(), s))
}
