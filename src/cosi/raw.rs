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

//! Fixed-width byte interface
//!
//! The same operations as the typed API, for a caller that shuttles raw
//! message bytes between devices: 32 byte seeds, points and scalars, and 64
//! byte signatures.

use tracing::debug;

use crate::cosi::{aggregation, commitment, signer, Commitment, Nonce, PartialSignature};
use crate::errors::{check_length, CosiError};
use crate::keys::{PublicKey, SecretKey, PUBLIC_KEY_LENGTH};
use crate::signature::{Signature, SIGNATURE_LENGTH};
use crate::tools::{scalar_from_bytes_mod_order, EdwardsBoth, POINT_LENGTH, SCALAR_LENGTH};

/// Public key for a 32 byte seed.
pub fn public_key_from_seed(seed: &[u8]) -> Result<[u8; PUBLIC_KEY_LENGTH], CosiError> {
    Ok(PublicKey::from_secret(&SecretKey::from_bytes(seed)?).to_bytes())
}

/// Sum compressed points, e.g. public keys into an aggregate key or
/// commitments into an aggregate commitment.
pub fn combine_points<B: AsRef<[u8]>>(points: &[B]) -> Result<[u8; POINT_LENGTH], CosiError> {
    let decoded = points
        .iter()
        .map(|p| EdwardsBoth::from_bytes(p.as_ref()).map(EdwardsBoth::into_point))
        .collect::<Result<Vec<_>, CosiError>>()?;

    Ok(aggregation::combine_points(decoded)?.compress().to_bytes())
}

/// Nonce scalar and commitment point of one signer for `message`.
pub fn derive_commitment(
    seed: &[u8],
    message: &[u8],
) -> Result<([u8; SCALAR_LENGTH], [u8; POINT_LENGTH]), CosiError> {
    let (nonce, commitment) = commitment::derive_commitment(&SecretKey::from_bytes(seed)?, message);
    Ok((nonce.to_bytes(), commitment.to_bytes()))
}

/// Partial signature of one signer.
pub fn partial_sign(
    message: &[u8],
    seed: &[u8],
    aggregate_key: &[u8],
    nonce: &[u8],
    aggregate_commitment: &[u8],
) -> Result<[u8; SCALAR_LENGTH], CosiError> {
    let secret_key = SecretKey::from_bytes(seed)?;
    let aggregate_key = PublicKey::from_bytes(aggregate_key)?;
    let nonce = Nonce::from_bytes(nonce)?;
    let aggregate_commitment = Commitment::from_bytes(aggregate_commitment)?;

    Ok(signer::partial_sign(message, &secret_key, &aggregate_key, &nonce, &aggregate_commitment).to_bytes())
}

/// Sum scalars mod L. Each input is reduced first.
pub fn combine_scalars<B: AsRef<[u8]>>(scalars: &[B]) -> Result<[u8; SCALAR_LENGTH], CosiError> {
    let decoded = scalars
        .iter()
        .map(|s| scalar_from_bytes_mod_order("Scalar", s.as_ref()))
        .collect::<Result<Vec<_>, CosiError>>()?;

    Ok(aggregation::combine_scalars(decoded)?.to_bytes())
}

/// Final `R || S` from the aggregate commitment and every partial signature.
pub fn combine_signature<B: AsRef<[u8]>>(
    aggregate_commitment: &[u8],
    partials: &[B],
) -> Result<[u8; SIGNATURE_LENGTH], CosiError> {
    let aggregate_commitment = Commitment::from_bytes(aggregate_commitment)?;
    let partials = partials
        .iter()
        .map(|s| PartialSignature::from_bytes(s.as_ref()))
        .collect::<Result<Vec<_>, CosiError>>()?;

    Ok(aggregation::combine_signature(&aggregate_commitment, &partials)?.to_bytes())
}

/// Verify a 64 byte signature against a 32 byte (aggregate) public key.
///
/// Wrong lengths are `InvalidEncoding`; every other defect, including a
/// public key that does not decode, is `InvalidSignature`.
pub fn verify(signature: &[u8], message: &[u8], public_key: &[u8]) -> Result<(), CosiError> {
    check_length("Signature", signature, SIGNATURE_LENGTH)?;
    check_length("PublicKey", public_key, PUBLIC_KEY_LENGTH)?;

    let public_key = PublicKey::from_bytes(public_key).map_err(|err| {
        debug!(%err, "public key rejected");
        CosiError::InvalidSignature
    })?;
    let signature = Signature::from_bytes(signature).map_err(|err| {
        debug!(%err, "signature rejected");
        CosiError::InvalidSignature
    })?;

    signature.verify(message, &public_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EncodingError;
    use sha2::{Digest, Sha512};

    // RFC 8032 section 7.1: seed, public key, message, signature
    fn vectors() -> Vec<(Vec<u8>, Vec<u8>, Vec<u8>, Vec<u8>)> {
        vec![
            (
                hex::decode("9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60").unwrap(),
                hex::decode("d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a").unwrap(),
                Vec::new(),
                hex::decode(
                    "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e06522490155\
                     5fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b",
                )
                .unwrap(),
            ),
            (
                hex::decode("4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb").unwrap(),
                hex::decode("3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c").unwrap(),
                vec![0x72],
                hex::decode(
                    "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da\
                     085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00",
                )
                .unwrap(),
            ),
            (
                hex::decode("c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7").unwrap(),
                hex::decode("fc51cd8e6218a1a38da47ed00230f0580816ed13ba3303ac5deb911548908025").unwrap(),
                vec![0xaf, 0x82],
                hex::decode(
                    "6291d657deec24024827e69c3abe01a30ce548a284743a445e3680d7db5ac3ac\
                     18ff9b538d16f290ae67f760984dc6594a7c15e9716ed28dc027beceea1ec40a",
                )
                .unwrap(),
            ),
            (
                hex::decode("833fe62409237b9d62ec77587520911e9a759cec1d19755b7da901b96dca3d42").unwrap(),
                hex::decode("ec172b93ad5e563bf4932c70e1245034c35467ef2efd4d64ebf819683467e2bf").unwrap(),
                Sha512::digest(b"abc").to_vec(),
                hex::decode(
                    "dc2a4459e7369633a52b1bf277839a00201009a3efbf3ecb69bea2186c26b589\
                     09351fc9ac90b3ecfdfbc7c66431e0303dca179c138ac17ad9bef1177331a704",
                )
                .unwrap(),
            ),
        ]
    }

    const COMBINED_KEY: &str = "283967b1c19ff93d2924cdcba95e586547cafef509ea402963ceefe96ccb44f2";
    const GLOBAL_COMMIT: &str = "75bd5806c6366e0374a1c6e020c53feb0791d6cc07560d27d8c158f886ecf389";

    fn ceremony_message() -> Vec<u8> {
        Sha512::digest(b"You all have to sign this.").to_vec()
    }

    /// Runs all five steps through the byte interface.
    fn run_ceremony(keyset: &[usize], message: &[u8]) -> ([u8; 32], [u8; 64]) {
        let vectors = vectors();
        let selection: Vec<_> = keyset.iter().map(|&i| &vectors[i]).collect();

        let publics: Vec<&[u8]> = selection.iter().map(|v| &v.1[..]).collect();
        let rounds: Vec<([u8; 32], [u8; 32])> = selection
            .iter()
            .map(|v| derive_commitment(&v.0, message).unwrap())
            .collect();
        let commits: Vec<[u8; 32]> = rounds.iter().map(|r| r.1).collect();

        let global_pk = combine_points(&publics).unwrap();
        let global_commit = combine_points(&commits).unwrap();

        let partials: Vec<[u8; 32]> = selection
            .iter()
            .zip(rounds.iter())
            .map(|(v, (nonce, _))| partial_sign(message, &v.0, &global_pk, nonce, &global_commit).unwrap())
            .collect();

        (global_pk, combine_signature(&global_commit, &partials).unwrap())
    }

    #[test]
    fn single_eddsa_vectors() {
        for (seed, public, message, signature) in vectors() {
            let derived = public_key_from_seed(&seed).unwrap();
            assert_eq!(&derived[..], &public[..]);
            assert_eq!(public_key_from_seed(&seed).unwrap(), derived);

            assert!(verify(&signature, &message, &public).is_ok());

            let mut fake = signature.clone();
            fake[0] = 0xf1;
            assert_eq!(verify(&fake, &message, &public), Err(CosiError::InvalidSignature));
        }
    }

    #[test]
    fn combine_keys_vector() {
        let vectors = vectors();
        let publics: Vec<&[u8]> = vectors.iter().map(|v| &v.1[..]).collect();
        assert_eq!(hex::encode(combine_points(&publics).unwrap()), COMBINED_KEY);

        let commits: Vec<[u8; 32]> = vectors
            .iter()
            .map(|v| derive_commitment(&v.0, &v.2).unwrap().1)
            .collect();
        assert_eq!(hex::encode(combine_points(&commits).unwrap()), GLOBAL_COMMIT);
    }

    #[test]
    fn commitment_is_deterministic() {
        for (seed, _, message, _) in vectors() {
            assert_eq!(
                derive_commitment(&seed, &message).unwrap(),
                derive_commitment(&seed, &message).unwrap()
            );
        }
    }

    #[test]
    fn cosi_combination() {
        let message = ceremony_message();
        let keysets: [&[usize]; 6] = [&[0], &[0, 1], &[0, 1, 2], &[0, 1, 2, 3], &[1, 3], &[0, 2]];
        for keyset in keysets {
            let (global_pk, global_sig) = run_ceremony(keyset, &message);
            assert!(
                verify(&global_sig, &message, &global_pk).is_ok(),
                "Failed to validate global signature for {:?}",
                keyset
            );
            assert_eq!(
                verify(&global_sig, b"something else", &global_pk),
                Err(CosiError::InvalidSignature)
            );
        }
    }

    #[test]
    fn cosi_combination_vectors() {
        let message = ceremony_message();

        let (pk, sig) = run_ceremony(&[0], &message);
        assert_eq!(hex::encode(pk), "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a");
        assert_eq!(
            hex::encode(&sig[..]),
            "1ab13274adf29e95d6ec88334dde8141bee3cf97904839a276d58b7999a80aef\
             248a1b4a4a966ddb8394681a695a016bb0f44e5838eaf499e314e554f4a87a01"
        );

        let (pk, sig) = run_ceremony(&[0, 1, 2, 3], &message);
        assert_eq!(hex::encode(pk), COMBINED_KEY);
        assert_eq!(
            hex::encode(&sig[..]),
            "ba6808d968b8d130a9588fb85280f8aa6aa4b782690be7474ff694563bf40e7c\
             ed5e58a7f5f5e0192908127547c905618235c318f9159c74db0e9e23626cd002"
        );

        let (pk, sig) = run_ceremony(&[1, 3], &message);
        assert_eq!(hex::encode(pk), "6758dbfc57207d2c57955788118e963cfda162f981c4f97e2f57e61f0ea69649");
        assert_eq!(
            hex::encode(&sig[..]),
            "19e5798bdc71f882837a35c89080141721b2c734917b442124062943a3347e86\
             555954118d4759cb85faef869b2560896f0ce17aab7f558ade53689355690b08"
        );
    }

    #[test]
    fn permutation_invariant() {
        let vectors = vectors();
        let forward: Vec<&[u8]> = vectors.iter().map(|v| &v.1[..]).collect();
        let backward: Vec<&[u8]> = vectors.iter().rev().map(|v| &v.1[..]).collect();
        assert_eq!(combine_points(&forward).unwrap(), combine_points(&backward).unwrap());

        let scalars: Vec<[u8; 32]> = vectors.iter().map(|v| derive_commitment(&v.0, b"p").unwrap().0).collect();
        let mut shuffled = scalars.clone();
        shuffled.swap(0, 3);
        shuffled.swap(1, 2);
        assert_eq!(combine_scalars(&scalars).unwrap(), combine_scalars(&shuffled).unwrap());
    }

    #[test]
    fn negative_cases() {
        let empty: Vec<[u8; 32]> = Vec::new();
        assert_eq!(combine_points(&empty), Err(CosiError::EmptyInput));
        assert_eq!(combine_scalars(&empty), Err(CosiError::EmptyInput));

        assert_eq!(
            combine_points(&[[0u8; 31]]),
            Err(CosiError::InvalidEncoding {
                kind: EncodingError::Length { name: "Point", expected: 32, actual: 31 }
            })
        );

        let mut off_curve = [0u8; 32];
        off_curve[0] = 2;
        assert_eq!(
            combine_points(&[off_curve]),
            Err(CosiError::from(EncodingError::NotOnCurve))
        );

        assert_eq!(public_key_from_seed(&[0u8; 33]), Err(CosiError::InvalidSeed { length: 33 }));
        assert_eq!(derive_commitment(&[0u8; 16], b"m"), Err(CosiError::InvalidSeed { length: 16 }));

        let (seed, public, message, signature) = vectors().remove(0);
        assert!(matches!(
            verify(&signature[..63], &message, &public),
            Err(CosiError::InvalidEncoding { .. })
        ));
        assert!(matches!(
            verify(&signature, &message, &public[..31]),
            Err(CosiError::InvalidEncoding { .. })
        ));
        assert_eq!(verify(&signature, &message, &off_curve), Err(CosiError::InvalidSignature));

        let (nonce, commit) = derive_commitment(&seed, &message).unwrap();
        assert_eq!(
            partial_sign(&message, &seed, &off_curve, &nonce, &commit),
            Err(CosiError::from(EncodingError::NotOnCurve))
        );
        assert_eq!(
            partial_sign(&message, &seed, &public, &[0xffu8; 32], &commit),
            Err(CosiError::from(EncodingError::NonCanonicalScalar))
        );
    }
}
