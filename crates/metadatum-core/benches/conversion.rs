use criterion::{criterion_group, criterion_main, Criterion};
use metadatum_core::{convert, Selector};
use std::hint::black_box;

fn sample_document(tracks: usize) -> String {
    let files: Vec<serde_json::Value> = (0..tracks)
        .map(|i| {
            serde_json::json!({
                "name": format!("Track {i}"),
                "mediaType": "audio/flac",
                "src": format!("ipfs://bafybeigdyrzt5sfp7udm7hu76uh7y26nf3efuylqabf3oclgtqy55fbzdi/{i}.flac"),
                "duration": 180 + i,
            })
        })
        .collect();
    serde_json::json!({
        "721": {
            "policy_id": {
                "token_name": {
                    "name": "Album",
                    "description": "A long description that spills over the sixty-four byte limit and has to be chunked.",
                    "artists": [{"name": "Someone"}],
                    "files": files,
                }
            },
            "version": 1
        }
    })
    .to_string()
}

fn bench_convert(c: &mut Criterion) {
    let selector = Selector::new("721", "policy_id", "token_name");
    let small = sample_document(1);
    let large = sample_document(200);

    c.bench_function("convert_single_track", |b| {
        b.iter(|| convert(black_box(&small), &selector, 1).unwrap())
    });
    c.bench_function("convert_200_tracks", |b| {
        b.iter(|| convert(black_box(&large), &selector, 1).unwrap())
    });
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);
