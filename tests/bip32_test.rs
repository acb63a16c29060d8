use hdk_rs::primitives::bip32::{DerivationPath, ExtendedKey, HARDENED_OFFSET};
use hdk_rs::primitives::hash::hmac_sha512;
use hdk_rs::{HdkError, NetworkParams};
use std::str::FromStr;
use std::sync::Arc;
use std::thread;

const SEED_1: &str = "000102030405060708090a0b0c0d0e0f";

fn master() -> ExtendedKey {
    ExtendedKey::new_master(&hex::decode(SEED_1).unwrap()).unwrap()
}

#[test]
fn test_master_key_is_hmac_of_seed() {
    let seed = hex::decode(SEED_1).unwrap();
    let intermediary = hmac_sha512(b"Bitcoin seed", &[&seed]);
    let master = master();

    assert_eq!(master.private_key().unwrap().secret_bytes(), intermediary[..32]);
    assert_eq!(master.chain_code().0, intermediary[32..]);
    assert_eq!(master.depth(), 0);
    assert_eq!(master.child_number(), 0);
    assert_eq!(master.parent_fingerprint().0, [0; 4]);
}

#[test]
fn test_hardened_then_normal_path() {
    let master = master();
    let intermediate = master.derive("m/0'").unwrap();
    let key = master.derive("m/0'/1").unwrap();

    assert_eq!(key.depth(), 2);
    assert_eq!(key.child_number(), 1);
    assert_eq!(intermediate.child_number(), HARDENED_OFFSET);
    assert_eq!(key.parent_fingerprint(), intermediate.fingerprint());
    assert_eq!(intermediate.parent_fingerprint(), master.fingerprint());
}

#[test]
fn test_serialization_round_trip() {
    let master = master();
    let paths = ["m", "m/0", "m/0'", "m/0'/1", "m/44'/0'/0'/0/7", "m/2147483647'/1/2"];

    for params in [NetworkParams::BITCOIN, NetworkParams::TESTNET] {
        for path in paths {
            let private = master.derive(path).unwrap();
            let public = private.neuter();
            for key in [private, public] {
                let bytes = key.serialize(&params);
                assert_eq!(ExtendedKey::deserialize(&bytes, &params).unwrap(), key);

                let text = key.to_base58(&params);
                assert_eq!(ExtendedKey::from_base58(&text, &params).unwrap(), key);
            }
        }
    }
}

#[test]
fn test_hardened_boundary_on_public_keys() {
    let public = master().derive("m/7'").unwrap().neuter();

    for index in [HARDENED_OFFSET, HARDENED_OFFSET + 1, HARDENED_OFFSET + 44, u32::MAX] {
        assert!(matches!(
            public.derive_child(index),
            Err(HdkError::CannotDeriveHardenedFromPublic)
        ));
    }
    for index in [0, 1, 1000, HARDENED_OFFSET - 1] {
        let child = public.derive_child(index).unwrap();
        assert!(!child.is_private());
        assert_eq!(child.depth(), public.depth() + 1);
    }
}

#[test]
fn test_public_and_private_branches_agree() {
    let account = master().derive("m/44'/0'/0'").unwrap();
    let from_private = account.derive("m/0/5").unwrap().neuter();
    let from_public = account.neuter().derive("m/0/5").unwrap();
    assert_eq!(from_private, from_public);
}

#[test]
fn test_derivation_is_deterministic() {
    let path = DerivationPath::from_str("m/44'/0'/3'/1/9").unwrap();
    let a = master().derive_path(&path).unwrap();
    let b = master().derive_path(&path).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.serialize(&NetworkParams::BITCOIN), b.serialize(&NetworkParams::BITCOIN));
}

#[test]
fn test_private_and_public_serializations_differ() {
    let params = NetworkParams::BITCOIN;
    let private = master().derive("m/1'/2").unwrap();
    let public = private.neuter();

    let private_bytes = private.serialize(&params);
    let public_bytes = public.serialize(&params);

    assert_eq!(&private_bytes[0..4], &params.private_version);
    assert_eq!(&public_bytes[0..4], &params.public_version);
    // depth, parent fingerprint, child number and chain code are shared
    assert_eq!(private_bytes[4..45], public_bytes[4..45]);
    assert_eq!(private_bytes[45], 0x00);
    assert_ne!(public_bytes[45], 0x00);
    assert_ne!(private_bytes[45..78], public_bytes[45..78]);
}

#[test]
fn test_first_error_aborts_path() {
    let public = master().neuter();
    assert!(matches!(
        public.derive("m/0/1/2'/3"),
        Err(HdkError::CannotDeriveHardenedFromPublic)
    ));
    assert!(matches!(
        master().derive("m/0/one/2"),
        Err(HdkError::InvalidPathSegment(segment)) if segment == "one"
    ));
}

#[test]
fn test_concurrent_derivation_from_shared_parent() {
    let parent = Arc::new(master().derive("m/44'/0'/0'").unwrap());

    let handles: Vec<_> = (0..8u32)
        .map(|i| {
            let parent = Arc::clone(&parent);
            thread::spawn(move || parent.derive_child(i).unwrap())
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let child = handle.join().unwrap();
        assert_eq!(child, parent.derive_child(i as u32).unwrap());
    }
}
