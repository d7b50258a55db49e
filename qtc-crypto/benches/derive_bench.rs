//! Criterion benchmarks for QTC derivation: expansion, master/child entropy, addresses, providers.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use qtc_core::{Address, Entropy, HdPath, WalletMethod};
use qtc_core::types::{AbsorbOrder, HashFunction};
use qtc_core::CryptoProvider;
use qtc_crypto::{child_entropy, expand, master_entropy, witness_program, ExpandRule, NativeProvider};

fn bench_expand(c: &mut Criterion) {
    let rule = ExpandRule::new(HashFunction::Shake256, AbsorbOrder::TagFirst);
    let secret = [0x11u8; 32];
    let mut g = c.benchmark_group("expand");
    g.throughput(Throughput::Elements(1));
    g.bench_function("shake256_64", |b| {
        b.iter(|| black_box(expand(rule, &secret, b"QTC/bench/v1", 64)).unwrap());
    });
    g.finish();
}

fn bench_master(c: &mut Criterion) {
    let ss = [0x11u8; 32];
    let pk = [0x22u8; 1952];
    let mut g = c.benchmark_group("master_entropy");
    g.throughput(Throughput::Elements(1));
    for method in WalletMethod::ALL {
        let spec = method.spec();
        let sig = spec.master.uses_signature_key().then_some(&pk[..]);
        g.bench_function(method.as_str(), |b| {
            b.iter(|| black_box(master_entropy(&spec.master, &ss, sig)).unwrap());
        });
    }
    g.finish();
}

fn bench_child(c: &mut Criterion) {
    let master = Entropy::from_slice(&[0x42u8; 64]);
    let mut g = c.benchmark_group("child_entropy");
    g.throughput(Throughput::Elements(1));
    g.bench_function("index_7", |b| {
        b.iter(|| black_box(child_entropy(&master, &HdPath::default_chain(7))).unwrap());
    });
    g.finish();
}

fn bench_address(c: &mut Criterion) {
    let program = witness_program(&[0x42u8; 64]);
    let text = Address::new(2, program).unwrap().to_string();
    let mut g = c.benchmark_group("address");
    g.throughput(Throughput::Elements(1));
    g.bench_function("encode", |b| {
        b.iter(|| black_box(Address::new(2, program).unwrap().to_string()));
    });
    g.bench_function("decode", |b| {
        b.iter(|| black_box(text.parse::<Address>()).unwrap());
    });
    g.finish();
}

fn bench_provider(c: &mut Criterion) {
    let provider = NativeProvider::new();
    let mut g = c.benchmark_group("native_provider");
    g.throughput(Throughput::Elements(1));
    g.bench_function("kem_self_encapsulate", |b| {
        b.iter(|| black_box(provider.kem_self_encapsulate(&[7u8; 48])).unwrap());
    });
    g.bench_function("sig_keygen", |b| {
        b.iter(|| black_box(provider.sig_keygen(&[7u8; 32])).unwrap());
    });
    g.finish();
}

criterion_group!(
    benches,
    bench_expand,
    bench_master,
    bench_child,
    bench_address,
    bench_provider
);
criterion_main!(benches);
