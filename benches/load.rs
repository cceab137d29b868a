use std::path::Path;

use criterion::{Criterion, criterion_group, criterion_main};
use envrecord::{EnvLoader, TargetEnv, record};
use tempfile::TempDir;

record! {
    #[allow(non_snake_case)]
    #[derive(Debug, Default)]
    struct BenchConfig {
        NAME: String,
        PORT: u16,
        WORKERS: i64,
        DATABASE_URL: String,
    }
}

fn bench_load(c: &mut Criterion) {
    let dir = TempDir::new().expect("failed to create temp dir");
    let env_path = dir.path().join(".env");
    write_file(&env_path, &make_env_content(2_000));

    c.bench_function("load_from_file_in_memory", |b| {
        b.iter(|| {
            let mut config = BenchConfig::default();
            let mut loader = EnvLoader::new()
                .path(&env_path)
                .target(TargetEnv::memory());
            loader
                .load_from_file(&mut config)
                .expect("load should succeed")
        });
    });
}

// Unknown padding keys followed by the fields the record needs.
fn make_env_content(entries: usize) -> String {
    let mut content = String::with_capacity(entries * 16);
    for idx in 0..entries {
        content.push_str("KEY_");
        content.push_str(&idx.to_string());
        content.push_str("=value\n");
    }
    content.push_str("NAME=bench\nPORT=8080\nWORKERS=8\nDATABASE_URL=postgres://db/bench\n");
    content
}

fn write_file(path: &Path, content: &str) {
    std::fs::write(path, content).expect("failed to write bench file");
}

criterion_group!(benches, bench_load);
criterion_main!(benches);
