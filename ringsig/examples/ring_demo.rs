use rand::SeedableRng;
use rand::rngs::StdRng;
use ringsig::{
    Cohort, PoolEntry, RingService, ScoreClaim, Signature, SignatureHex, Submission,
    assemble_ring, generate_keypair, sign, verify, verify_submission,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut rng = StdRng::seed_from_u64(42);

    // Three keys, sign as member 0.
    let keypairs: Vec<_> = (0..3).map(|_| generate_keypair(&mut rng)).collect();
    let ring: Vec<_> = keypairs.iter().map(|kp| kp.public.clone()).collect();
    let message = b"ring_demo|5.40|6.20";

    let signed = sign(&mut rng, message, &ring, &keypairs[0].secret).expect("sign");
    let SignatureHex { c0, s } = signed.signature.to_hex();
    assert_eq!(s.len(), 3);

    let sig_bytes = bincode::serialize(&signed.signature).expect("serialize sig");
    let sig2: Signature = bincode::deserialize(&sig_bytes).expect("deserialize sig");
    assert!(verify(message, &ring, &sig2));
    info!(%c0, "Signature verified");

    let mut zeroed = s.clone();
    zeroed[1] = "0".repeat(64);
    let tampered = Signature::from_hex(&c0, &zeroed).expect("decode");
    assert!(!verify(message, &ring, &tampered));

    let tampered = Signature::from_hex(&"f".repeat(64), &s).expect("decode");
    assert!(!verify(message, &ring, &tampered));
    info!("Tampered signatures rejected");

    // Assemble a ring from a pool and attest a score.
    let cohort = Cohort::from("intermediate");
    let pool: Vec<PoolEntry> = keypairs[1..]
        .iter()
        .map(|kp| PoolEntry::new(cohort.clone(), kp.public.as_bytes().to_vec()))
        .collect();
    let assembled = assemble_ring(&mut rng, keypairs[0].public.as_bytes(), &cohort, &pool, 5)
        .expect("assemble");

    let claim = ScoreClaim::new(assembled.id().clone(), 5.4, 6.2);
    let signed = sign(&mut rng, &claim.to_message(), assembled.members(), &keypairs[0].secret)
        .expect("sign");
    let submission = Submission {
        claim,
        signature: signed.signature,
    };
    assert!(verify_submission(&assembled, &submission));
    println!(
        "{}",
        serde_json::to_string_pretty(&submission).expect("serialize submission")
    );

    // The same flow through the hex surface.
    let service = RingService::default();
    let keypair = service.generate_keypair().expect("keypair");
    let ring_hex = service
        .assemble_ring(&keypair.public_key, "beginner", &[] as &[String], None)
        .expect("assemble");
    let signed = service
        .sign(message, &keypair.private_key, &ring_hex.members)
        .expect("sign");
    assert!(service.verify(message, &signed.ring_members, &signed.c0, &signed.s));
    info!(ring_id = %ring_hex.ring_id, "Hex surface round trip verified");
}
