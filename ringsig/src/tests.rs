use super::*;
use curve::ScalarField;
use proptest::prelude::*;
use rand::SeedableRng;
use rand::rngs::StdRng;

const DEMO_MESSAGE: &[u8] = b"ring_demo|5.40|6.20";

fn keypairs(rng: &mut StdRng, count: usize) -> Vec<Keypair> {
    (0..count).map(|_| generate_keypair(rng)).collect()
}

fn public_keys(keypairs: &[Keypair]) -> Vec<PublicKey> {
    keypairs.iter().map(|kp| kp.public.clone()).collect()
}

#[test]
fn test_sign_verify_every_size_and_signer() {
    let mut rng = StdRng::seed_from_u64(42);
    for size in 2..=10 {
        let keypairs = keypairs(&mut rng, size);
        let ring = public_keys(&keypairs);
        for (index, keypair) in keypairs.iter().enumerate() {
            let signed = sign(&mut rng, DEMO_MESSAGE, &ring, &keypair.secret).expect("sign");
            assert_eq!(signed.signature.s.len(), size);
            assert!(
                verify(DEMO_MESSAGE, &ring, &signed.signature),
                "size {size}, signer {index}"
            );
        }
    }
}

#[test]
fn test_concrete_scenario() {
    let mut rng = StdRng::seed_from_u64(2024);
    let keypairs = keypairs(&mut rng, 3);
    let ring = public_keys(&keypairs);

    let signed = sign(&mut rng, DEMO_MESSAGE, &ring, &keypairs[0].secret).expect("sign");
    let SignatureHex { c0, s } = signed.signature.to_hex();
    assert_eq!(s.len(), 3);

    let check = |c0: &str, s: &[String]| {
        Signature::from_hex(c0, s)
            .map(|sig| verify(DEMO_MESSAGE, &ring, &sig))
            .unwrap_or(false)
    };
    assert!(check(&c0, &s));

    let mut zeroed = s.clone();
    zeroed[1] = "0".repeat(64);
    assert!(!check(&c0, &zeroed));

    assert!(!check(&"f".repeat(64), &s));
}

#[test]
fn test_tampering_any_response_fails() {
    let mut rng = StdRng::seed_from_u64(7);
    let keypairs = keypairs(&mut rng, 5);
    let ring = public_keys(&keypairs);
    let signed = sign(&mut rng, DEMO_MESSAGE, &ring, &keypairs[3].secret).expect("sign");

    for j in 0..5 {
        let mut tampered = signed.signature.clone();
        let mut bytes = tampered.s[j].to_bytes();
        bytes[31] ^= 0x01;
        tampered.s[j] = ScalarField::from_bytes_mod_order(&bytes);
        assert!(!verify(DEMO_MESSAGE, &ring, &tampered), "s[{j}] tampered");
    }
}

#[test]
fn test_self_inclusion_only_verifies_extended_ring() {
    let mut rng = StdRng::seed_from_u64(11);
    let signer = generate_keypair(&mut rng);
    let ring = public_keys(&keypairs(&mut rng, 2));

    let signed = sign(&mut rng, DEMO_MESSAGE, &ring, &signer.secret).expect("sign");
    assert!(signed.extended);
    assert_eq!(signed.signature.s.len(), ring.len() + 1);
    assert!(verify(DEMO_MESSAGE, &signed.ring, &signed.signature));
    assert!(!verify(DEMO_MESSAGE, &ring, &signed.signature));
}

#[test]
fn test_assembled_ring_round_trip() {
    let mut rng = StdRng::seed_from_u64(5);
    let requester = generate_keypair(&mut rng);
    let cohort = Cohort::from("advanced");
    let pool: Vec<PoolEntry> = keypairs(&mut rng, 3)
        .iter()
        .map(|kp| PoolEntry::new(cohort.clone(), kp.public.as_bytes().to_vec()))
        .collect();

    let ring = assemble_ring(
        &mut rng,
        requester.public.as_bytes(),
        &cohort,
        &pool,
        constants::DEFAULT_RING_SIZE,
    )
    .expect("ring");
    assert_eq!(ring.size(), constants::DEFAULT_RING_SIZE);
    assert!(ring.contains(&requester.public));
    for member in ring.members() {
        assert!(validate_public_key(member.as_bytes()));
    }

    let signed = sign(&mut rng, DEMO_MESSAGE, ring.members(), &requester.secret).expect("sign");
    assert!(!signed.extended);
    assert!(verify(DEMO_MESSAGE, ring.members(), &signed.signature));
}

#[test]
fn test_serialized_signature_still_verifies() {
    let mut rng = StdRng::seed_from_u64(99);
    let keypairs = keypairs(&mut rng, 4);
    let ring = public_keys(&keypairs);
    let signed = sign(&mut rng, DEMO_MESSAGE, &ring, &keypairs[2].secret).expect("sign");

    let bytes = bincode::serialize(&signed.signature).expect("serialize");
    let decoded: Signature = bincode::deserialize(&bytes).expect("deserialize");
    assert_eq!(decoded, signed.signature);

    let ring_json = serde_json::to_string(&ring).expect("serialize ring");
    let ring_back: Vec<PublicKey> = serde_json::from_str(&ring_json).expect("deserialize ring");
    assert!(verify(DEMO_MESSAGE, &ring_back, &decoded));
}

#[test]
fn test_persisted_ring_record() {
    let mut rng = StdRng::seed_from_u64(13);
    let requester = generate_keypair(&mut rng);
    let ring = assemble_ring(
        &mut rng,
        requester.public.as_bytes(),
        &Cohort::from("beginner"),
        &[],
        3,
    )
    .expect("ring");

    let json = serde_json::to_string(&ring).expect("serialize");
    let restored: Ring = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(restored, ring);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn prop_round_trip(
        seed in any::<u64>(),
        size in 2usize..=10,
        signer in any::<prop::sample::Index>(),
        message in prop::collection::vec(any::<u8>(), 0..64),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let keypairs = keypairs(&mut rng, size);
        let ring = public_keys(&keypairs);
        let index = signer.index(size);

        let signed = sign(&mut rng, &message, &ring, &keypairs[index].secret).expect("sign");
        prop_assert_eq!(signed.signature.s.len(), size);
        prop_assert!(verify(&message, &ring, &signed.signature));

        let mut tampered = signed.signature.clone();
        tampered.c0[0] ^= 0x80;
        prop_assert!(!verify(&message, &ring, &tampered));
    }
}
