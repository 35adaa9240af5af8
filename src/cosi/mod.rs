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

//! Collective Signing (CoSi)
//!
//! N signers jointly produce one Ed25519 signature that verifies against
//! the sum of their public keys:
//!
//! 1. every signer derives a nonce and publishes its commitment `R_i`,
//! 2. the coordinator sums keys into `A` and commitments into `R`,
//! 3. every signer answers with `s_i = r_i + H(R || A || M) * a_i`,
//! 4. the coordinator sums the shares into `S` and publishes `R || S`.
//!
//! Nonces are derived from the seed and message, never from an RNG, so a
//! signer that is asked twice for the same message with the same participant
//! set answers identically. [`raw`] offers the same steps on fixed-width byte
//! strings.

mod aggregation;
mod ceremony;
mod commitment;
pub mod raw;
mod signer;

pub use self::aggregation::{
    combine_commitments, combine_keys, combine_partials, combine_points, combine_scalars,
    combine_signature,
};
pub use self::ceremony::{Ceremony, CeremonyState};
pub use self::commitment::{
    derive_commitment, derive_commitment_with_counter, Commitment, Nonce, COMMITMENT_LENGTH,
    DEFAULT_NONCE_COUNTER,
};
pub use self::signer::{challenge, partial_sign, verify_partial, PartialSignature, Signer};
