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

//! CoSi Ceremony
//!
//! The coordinator side of one signing ceremony. The participant set and
//! the message are fixed up front; commitments and partial signatures may
//! arrive in any order.

use tracing::{debug, trace};

use crate::cosi::{
    combine_commitments, combine_keys, combine_signature, verify_partial, Commitment,
    PartialSignature,
};
use crate::errors::{CeremonyError, CosiError};
use crate::keys::PublicKey;
use crate::signature::Signature;

/// CoSi State Machine, 2 round interactive protocol
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CeremonyState {
    /// Signers publish their nonce commitments, round 1
    CommitmentCollection,
    /// Signers return partial signatures over the aggregate commitment, round 2
    SignatureCollection,
    /// The collective signature is assembled
    Finalized(Signature),
    /// A partial signature failed to verify; the ceremony must be restarted
    Failed,
}

/// A member of the ceremony
#[derive(Clone, Debug)]
struct Parti {
    /// The public key that they are using
    pubkey: PublicKey,
    /// This members round 1 commitment
    commitment: Option<Commitment>,
    /// This members round 2 partial signature
    partial: Option<PartialSignature>,
}

/// One collective signing ceremony over a fixed message and participant set.
#[derive(Clone, Debug)]
pub struct Ceremony {
    message: Vec<u8>,
    /// All people in the protocol, in key order
    parties: Vec<Parti>,
    /// The combined key from all keys in this session
    aggregate_key: PublicKey,
    /// Sum of the round 1 commitments, set once all are in
    aggregate_commitment: Option<Commitment>,
    state: CeremonyState,
}

impl Ceremony {
    /// Fix the message and participant set and compute the aggregate key.
    pub fn new(message: &[u8], public_keys: &[PublicKey]) -> Result<Ceremony, CosiError> {
        let aggregate_key = combine_keys(public_keys)?;

        for (index, pk) in public_keys.iter().enumerate() {
            if public_keys[..index].contains(pk) {
                return Err(CeremonyError::DuplicateParticipant { index }.into());
            }
        }

        trace!(participants = public_keys.len(), "ceremony started");

        Ok(Ceremony {
            message: message.to_vec(),
            parties: public_keys
                .iter()
                .map(|pk| Parti {
                    pubkey: *pk,
                    commitment: None,
                    partial: None,
                })
                .collect(),
            aggregate_key,
            aggregate_commitment: None,
            state: CeremonyState::CommitmentCollection,
        })
    }

    /// The message being signed.
    pub fn message(&self) -> &[u8] {
        &self.message
    }

    /// The key the final signature verifies against.
    pub fn aggregate_key(&self) -> &PublicKey {
        &self.aggregate_key
    }

    /// The aggregate commitment, once every participant has committed.
    pub fn aggregate_commitment(&self) -> Option<&Commitment> {
        self.aggregate_commitment.as_ref()
    }

    /// Where the ceremony is.
    pub fn state(&self) -> &CeremonyState {
        &self.state
    }

    /// Number of participants.
    pub fn len(&self) -> usize {
        self.parties.len()
    }

    /// Always false, a ceremony has at least one participant.
    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }

    /// Position of `pk` in the participant set.
    pub fn index_of(&self, pk: &PublicKey) -> Result<usize, CosiError> {
        self.parties
            .iter()
            .position(|p| p.pubkey == *pk)
            .ok_or_else(|| CeremonyError::UnknownParticipant.into())
    }

    /// Round 1: record the commitment of `pk`.
    ///
    /// When the last commitment arrives the aggregate commitment is computed
    /// and the ceremony moves on to collecting partial signatures.
    pub fn add_commitment(&mut self, pk: &PublicKey, commitment: Commitment) -> Result<(), CosiError> {
        if self.state != CeremonyState::CommitmentCollection {
            return Err(CeremonyError::WrongState.into());
        }

        let index = self.index_of(pk)?;
        let parti = &mut self.parties[index];
        if parti.commitment.is_some() {
            return Err(CeremonyError::DuplicateContribution { index }.into());
        }
        parti.commitment = Some(commitment);
        trace!(index, "commitment received");

        if self.parties.iter().all(|p| p.commitment.is_some()) {
            let commitments: Vec<Commitment> =
                self.parties.iter().filter_map(|p| p.commitment).collect();
            self.aggregate_commitment = Some(combine_commitments(&commitments)?);
            self.state = CeremonyState::SignatureCollection;
            trace!("all commitments received");
        }

        Ok(())
    }

    /// Round 2: record and check the partial signature of `pk`.
    ///
    /// A share that does not verify fails the whole ceremony. When the last
    /// share arrives the collective signature is assembled.
    pub fn add_partial(&mut self, pk: &PublicKey, partial: PartialSignature) -> Result<(), CosiError> {
        let aggregate_commitment = match (&self.state, self.aggregate_commitment) {
            (CeremonyState::SignatureCollection, Some(r)) => r,
            _ => return Err(CeremonyError::WrongState.into()),
        };

        let index = self.index_of(pk)?;
        if self.parties[index].partial.is_some() {
            return Err(CeremonyError::DuplicateContribution { index }.into());
        }

        let commitment = self.parties[index]
            .commitment
            .ok_or(CosiError::Ceremony { kind: CeremonyError::WrongState })?;

        if let Err(err) = verify_partial(
            &self.message,
            pk,
            &commitment,
            &self.aggregate_key,
            &aggregate_commitment,
            &partial,
            index,
        ) {
            debug!(index, "ceremony failed");
            self.state = CeremonyState::Failed;
            return Err(err);
        }

        self.parties[index].partial = Some(partial);
        trace!(index, "partial signature received");

        if self.parties.iter().all(|p| p.partial.is_some()) {
            let partials: Vec<PartialSignature> =
                self.parties.iter().filter_map(|p| p.partial).collect();
            let signature = combine_signature(&aggregate_commitment, &partials)?;
            self.state = CeremonyState::Finalized(signature);
            trace!("ceremony finalized");
        }

        Ok(())
    }

    /// The collective signature of a finalized ceremony.
    pub fn signature(&self) -> Result<Signature, CosiError> {
        match &self.state {
            CeremonyState::Finalized(signature) => Ok(*signature),
            _ => Err(CeremonyError::WrongState.into()),
        }
    }
}
