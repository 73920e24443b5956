use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hotstuff_crypto::{aggregate, fast_aggregate_verify, BlsSecretKey, LeaderKey};
use hotstuff_types::Hash;

fn validator_keys(n: u8) -> Vec<BlsSecretKey> {
    (0..n)
        .map(|i| BlsSecretKey::from_ikm(&[i + 1; 32]).expect("valid ikm"))
        .collect()
}

fn bls_sign_bench(c: &mut Criterion) {
    let sk = BlsSecretKey::from_ikm(&[7u8; 32]).expect("valid ikm");
    let digest = [42u8; 32];

    c.bench_function("bls_sign_32B", |b| b.iter(|| sk.sign(black_box(&digest))));
}

fn bls_aggregate_bench(c: &mut Criterion) {
    let digest = [42u8; 32];
    let sigs: Vec<_> = validator_keys(16).iter().map(|sk| sk.sign(&digest)).collect();

    c.bench_function("bls_aggregate_16", |b| b.iter(|| aggregate(black_box(&sigs))));
}

fn bls_fast_aggregate_verify_bench(c: &mut Criterion) {
    let digest = [42u8; 32];
    let keys = validator_keys(16);
    let sigs: Vec<_> = keys.iter().map(|sk| sk.sign(&digest)).collect();
    let pks: Vec<_> = keys.iter().map(|sk| sk.public_key()).collect();
    let agg = aggregate(&sigs).expect("non-empty");

    c.bench_function("bls_fast_aggregate_verify_16", |b| {
        b.iter(|| fast_aggregate_verify(&agg, black_box(&pks), &digest))
    });
}

fn leader_sign_recover_bench(c: &mut Criterion) {
    let key = LeaderKey::from_bytes(&[9u8; 32]).expect("valid scalar");
    let digest = Hash::digest(b"header");
    let sig = key.sign_digest(&digest).expect("signs");

    c.bench_function("leader_sign", |b| {
        b.iter(|| key.sign_digest(black_box(&digest)))
    });
    c.bench_function("leader_recover", |b| {
        b.iter(|| hotstuff_crypto::recover_address(black_box(&digest), &sig))
    });
}

criterion_group!(
    benches,
    bls_sign_bench,
    bls_aggregate_bench,
    bls_fast_aggregate_verify_bench,
    leader_sign_recover_bench
);
criterion_main!(benches);
