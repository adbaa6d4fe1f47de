use cosmwasm_std::{Addr, Api, CanonicalAddr};
use dkdao::{eth_address, Proof};

use crate::error::ContractError;

/// Validates the time window of a proof.
///
/// A proof is valid while `now <= expiry` and may not expire later than `lifetime`
/// seconds from now.
pub fn check_expiry(proof: &Proof, now: u64, lifetime: u64) -> Result<(), ContractError> {
    let expiry = proof.message.expiry;
    if now > expiry {
        return Err(ContractError::ProofExpired { expiry, now });
    }
    if expiry > now.saturating_add(lifetime) {
        return Err(ContractError::ProofLifetimeTooLong { expiry, lifetime });
    }
    Ok(())
}

/// Recovers the address that signed the proof message
pub fn recover_signer(api: &dyn Api, proof: &Proof) -> Result<Addr, ContractError> {
    let hash = proof.message.signing_hash();
    let recovery_param = proof
        .recovery_param()
        .map_err(|_| ContractError::InvalidProof)?;
    let pubkey = api
        .secp256k1_recover_pubkey(&hash, proof.compact_signature(), recovery_param)
        .map_err(|_| ContractError::InvalidProof)?;
    let account = eth_address(&pubkey).map_err(|_| ContractError::InvalidProof)?;
    let signer = api.addr_humanize(&CanonicalAddr::from(account.as_slice()))?;
    Ok(signer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cosmwasm_std::testing::MockApi;
    use dkdao::{ProofMessage, SIGNATURE_LEN};
    use k256::ecdsa::SigningKey;

    fn sign(key: &SigningKey, message: ProofMessage) -> Proof {
        let (signature, recovery_id) = key
            .sign_prehash_recoverable(&message.signing_hash())
            .unwrap();
        let mut out = [0u8; SIGNATURE_LEN];
        out[..64].copy_from_slice(&signature.to_bytes());
        out[64] = recovery_id.to_byte() + 27;
        Proof::new(out, message)
    }

    fn expected_signer(api: &MockApi, key: &SigningKey) -> Addr {
        let pubkey = key.verifying_key().to_encoded_point(false);
        let account = eth_address(pubkey.as_bytes()).unwrap();
        api.addr_humanize(&CanonicalAddr::from(account.as_slice()))
            .unwrap()
    }

    #[test]
    fn check_expiry_works() {
        let proof = Proof::new([0u8; SIGNATURE_LEN], ProofMessage::new([1; 24], 1_000));
        check_expiry(&proof, 1_000, 60).unwrap();
        check_expiry(&proof, 940, 60).unwrap();

        let err = check_expiry(&proof, 1_001, 60).unwrap_err();
        assert_eq!(
            err,
            ContractError::ProofExpired {
                expiry: 1_000,
                now: 1_001
            }
        );
        let err = check_expiry(&proof, 939, 60).unwrap_err();
        assert_eq!(
            err,
            ContractError::ProofLifetimeTooLong {
                expiry: 1_000,
                lifetime: 60
            }
        );
    }

    #[test]
    fn recover_signer_works() {
        let api = MockApi::default();
        let key = SigningKey::from_slice(&[0x42; 32]).unwrap();
        let proof = sign(&key, ProofMessage::new([7; 24], 1_700_000_000));

        let signer = recover_signer(&api, &proof).unwrap();
        assert_eq!(signer, expected_signer(&api, &key));
    }

    #[test]
    fn recover_signer_detects_tampered_message() {
        let api = MockApi::default();
        let key = SigningKey::from_slice(&[0x42; 32]).unwrap();
        let mut proof = sign(&key, ProofMessage::new([7; 24], 1_700_000_000));
        proof.message.expiry += 1;

        // Recovery yields some other key or fails, never the original signer
        match recover_signer(&api, &proof) {
            Ok(signer) => assert_ne!(signer, expected_signer(&api, &key)),
            Err(err) => assert_eq!(err, ContractError::InvalidProof),
        }
    }

    #[test]
    fn recover_signer_rejects_bad_recovery_id() {
        let api = MockApi::default();
        let key = SigningKey::from_slice(&[0x42; 32]).unwrap();
        let mut proof = sign(&key, ProofMessage::new([7; 24], 1_700_000_000));
        proof.signature[64] = 35;
        let err = recover_signer(&api, &proof).unwrap_err();
        assert_eq!(err, ContractError::InvalidProof);
    }
}
