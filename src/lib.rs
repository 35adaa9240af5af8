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

//
// CoSi: collective Ed25519 signatures
//

// Signatures produced here are plain RFC 8032 Ed25519 signatures over the
// sum of the signers' public keys, so any Ed25519 verifier accepts them.

//Modeled from
//https://github.com/dalek-cryptography/ed25519-dalek/blob/master/src/ed25519.rs

//Useful links:
//https://tools.ietf.org/html/rfc8032
//https://tools.ietf.org/html/draft-ford-cfrg-cosi-00

#[macro_use]
mod ser;

mod errors;
pub use errors::{CeremonyError, CosiError, EncodingError};
pub mod tools;
pub mod keys;
pub mod signature;
pub mod cosi;

// Export everything public in cosi.
pub use crate::signature::{Signature, SIGNATURE_LENGTH};

pub use crate::keys::*;

pub use crate::cosi::{
    combine_commitments,
    combine_keys,
    combine_signature,
    derive_commitment,
    partial_sign,
    verify_partial,
    Ceremony,
    CeremonyState,
    Commitment,
    Nonce,
    PartialSignature,
    Signer,
};
