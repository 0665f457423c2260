use criterion::{criterion_group, criterion_main, Criterion};
use retrieval::{ChatConfig, Session};

fn bench_retrieval(c: &mut Criterion) {
    let text = include_str!("corpus.txt");
    let config = ChatConfig::default();
    c.bench_function("open_session", |b| b.iter(|| Session::open("corpus.txt", text, &config)));
    let session = Session::open("corpus.txt", text, &config);
    c.bench_function("respond", |b| b.iter(|| session.respond("how does the borrow checker handle references")));
}

criterion_group!(benches, bench_retrieval);
criterion_main!(benches);
