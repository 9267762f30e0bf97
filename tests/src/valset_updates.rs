//! Validator-set rotation (`updateValset`): checkpoint installation, nonce
//! monotonicity, structural validation, and handover to the new set.

#[cfg(test)]
mod tests {
    use crate::support::*;
    use cg_gateway::domain::digest;
    use cg_gateway::{GatewayApi, GatewayError, ValidatorSet};
    use shared_types::{Address, ChainId};

    #[test]
    fn test_update_valset_installs_new_checkpoint() {
        let h = harness();
        let validator = Validator::random();
        let current = h.init_single(&validator);

        let successor = Validator::random();
        let new_set = ValidatorSet::new(vec![successor.address], vec![FULL_POWER], 12);
        let signature = sign_digest(&digest::checkpoint_digest(&new_set), &validator);

        let event = h
            .gateway
            .update_valset(new_set.clone(), current, vec![signature])
            .unwrap();

        assert_eq!(event.valset_nonce, 12);
        assert_eq!(event.event_nonce, 2);
        assert_eq!(event.chain_id, ChainId::from(CHAIN_ID));
        assert_eq!(event.validators, vec![successor.address]);
        assert_eq!(event.powers, vec![FULL_POWER]);

        // The stored checkpoint is exactly the digest the electors signed.
        assert_eq!(
            h.gateway.last_valset_checkpoint(),
            digest::checkpoint_digest(&new_set)
        );
        assert_eq!(h.gateway.current_valset().unwrap(), new_set);
    }

    #[test]
    fn test_update_valset_rejects_stale_nonce() {
        let h = harness();
        let validator = Validator::random();
        let current = h.init_single(&validator);

        // Full quorum, but the nonce does not advance.
        for nonce in [0u64, 1] {
            let new_set =
                ValidatorSet::new(vec![Validator::random().address], vec![FULL_POWER], nonce);
            let signature = sign_digest(&digest::checkpoint_digest(&new_set), &validator);
            let err = h
                .gateway
                .update_valset(new_set, current.clone(), vec![signature])
                .unwrap_err();
            assert_eq!(
                err,
                GatewayError::InvalidValsetNonce {
                    new: nonce,
                    current: 1,
                }
            );
        }
        assert_eq!(h.gateway.event_nonce(), 1);
    }

    #[test]
    fn test_update_valset_rejects_malformed_set() {
        let h = harness();
        let validator = Validator::random();
        let current = h.init_single(&validator);

        let lopsided = ValidatorSet::new(
            vec![Validator::random().address],
            vec![FULL_POWER, FULL_POWER],
            12,
        );
        let signature = sign_digest(&digest::checkpoint_digest(&lopsided), &validator);
        let err = h
            .gateway
            .update_valset(lopsided, current.clone(), vec![signature])
            .unwrap_err();
        assert!(matches!(err, GatewayError::MalformedValset(_)));

        let empty = ValidatorSet::new(vec![], vec![], 12);
        let signature = sign_digest(&digest::checkpoint_digest(&empty), &validator);
        let err = h
            .gateway
            .update_valset(empty, current, vec![signature])
            .unwrap_err();
        assert!(matches!(err, GatewayError::MalformedValset(_)));
        assert_eq!(h.gateway.event_nonce(), 1);
    }

    #[test]
    fn test_update_requires_quorum_of_outgoing_set() {
        let h = harness();
        let validator = Validator::random();
        let current = h.init_single(&validator);

        // The successor signing its own election is not quorum.
        let successor = Validator::random();
        let new_set = ValidatorSet::new(vec![successor.address], vec![FULL_POWER], 12);
        let signature = sign_digest(&digest::checkpoint_digest(&new_set), &successor);

        let err = h
            .gateway
            .update_valset(new_set, current, vec![signature])
            .unwrap_err();
        assert!(matches!(err, GatewayError::InsufficientPower { .. }));
    }

    #[test]
    fn test_stale_current_valset_claim_rejected() {
        let h = harness();
        let validator = Validator::random();
        let current = h.init_single(&validator);

        let mut stale = current.clone();
        stale.valset_nonce = 0;

        let new_set = ValidatorSet::new(vec![Validator::random().address], vec![FULL_POWER], 12);
        let signature = sign_digest(&digest::checkpoint_digest(&new_set), &validator);
        let err = h
            .gateway
            .update_valset(new_set, stale, vec![signature])
            .unwrap_err();
        assert_eq!(err, GatewayError::ValsetMismatch);
    }

    #[test]
    fn test_new_set_takes_over_signing() {
        let h = harness();
        let validator = Validator::random();
        let genesis = h.init_single(&validator);

        let successor = Validator::random();
        let new_set = ValidatorSet::new(vec![successor.address], vec![FULL_POWER], 2);
        let signature = sign_digest(&digest::checkpoint_digest(&new_set), &validator);
        h.gateway
            .update_valset(new_set.clone(), genesis.clone(), vec![signature])
            .unwrap();

        // The old set can no longer authorize inbound traffic…
        let request = inbound_request(Address::repeat_byte(0x33), 40);
        let old_sig = sign_digest(&digest::i_receive_digest(&request), &validator);
        let err = h
            .gateway
            .i_receive(
                genesis,
                vec![old_sig],
                request.clone(),
                RELAYER.to_string(),
            )
            .unwrap_err();
        assert_eq!(err, GatewayError::ValsetMismatch);

        // …but the successor can.
        let new_sig = sign_digest(&digest::i_receive_digest(&request), &successor);
        let event = h
            .gateway
            .i_receive(new_set, vec![new_sig], request, RELAYER.to_string())
            .unwrap();
        assert_eq!(event.event_nonce, 3);
    }
}
