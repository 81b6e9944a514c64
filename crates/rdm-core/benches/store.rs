use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rdm_core::dict::DictStore;
use rdm_core::encoder::{Encoder, Scheme};
use rdm_core::settings::LoadSettings;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
const CHARS: &[char] = &['光', '明', '日', '月', '天', '地', '星', '空', '山', '水'];

/// A synthetic source with `n` entries spread over six-letter codes.
fn bench_source(n: usize) -> String {
    let mut text = String::from("---\nname: bench\nversion: \"1\"\n...\n");
    for i in 0..n {
        let code: String = (0..6)
            .map(|k| LETTERS[(i / 26usize.pow(k) + k as usize) % 26] as char)
            .collect();
        let word: String = (0..2 + i % 3).map(|k| CHARS[(i + k * 7) % CHARS.len()]).collect();
        text.push_str(&format!("{word}{i}\t{code}\t{}\n", i % 100));
        if i % 1000 == 0 {
            text.push_str("# block\n");
        }
    }
    text
}

fn bench_load(c: &mut Criterion) {
    let text = bench_source(50_000);
    let mut group = c.benchmark_group("store/load");
    for threads in [1, 4] {
        let settings = LoadSettings {
            parse_threads: threads,
            min_lines_per_thread: 4096,
        };
        group.bench_with_input(BenchmarkId::new("threads", threads), &settings, |b, s| {
            b.iter(|| DictStore::from_text(&text, s).unwrap());
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let store = DictStore::from_text(&bench_source(50_000), &LoadSettings {
        parse_threads: 0,
        min_lines_per_thread: 4096,
    })
    .unwrap();
    let mut group = c.benchmark_group("store/search");
    for prefix in ["a", "ab", "abc"] {
        group.bench_with_input(BenchmarkId::new("prefix", prefix), &prefix, |b, &p| {
            b.iter(|| store.search_by_code(p, false).len());
        });
    }
    group.bench_function("exact", |b| b.iter(|| store.search_by_code("abcdef", true).len()));
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let table = [
        "光\tguan", "明\tmina", "日\tridb", "月\tyuep", "天\ttian", "地\tdibu", "星\txing",
        "空\tkong", "山\tshan", "水\tshui",
    ];
    let encoder = Encoder::from_lines(Scheme::Xkjd6, table).unwrap();
    c.bench_function("encoder/encode", |b| {
        b.iter(|| encoder.encode("光明日月天地星空"));
    });
}

criterion_group!(benches, bench_load, bench_search, bench_encode);
criterion_main!(benches);
