use std::hint::black_box;
use std::path::PathBuf;

use criterion::{criterion_group, criterion_main, Criterion};

use dbf_export::engine::{select_engine, EngineAvailability};
use dbf_export::normalize::normalize;
use dbf_export::reader::read_table;
use dbf_export::writer::write_table;

/// Build a two-column sample table (`NAME` C20, `AMOUNT` N8) with `rows`
/// records.
fn sample_dbf(rows: usize) -> Vec<u8> {
    let fields: &[(&str, u8, u8)] = &[("NAME", b'C', 20), ("AMOUNT", b'N', 8)];
    let header_len = 32 + 32 * fields.len() + 1;
    let record_len: usize = 1 + fields.iter().map(|f| f.2 as usize).sum::<usize>();

    let mut out = vec![0x03, 26, 8, 25];
    out.extend_from_slice(&(rows as u32).to_le_bytes());
    out.extend_from_slice(&(header_len as u16).to_le_bytes());
    out.extend_from_slice(&(record_len as u16).to_le_bytes());
    out.extend_from_slice(&[0u8; 20]);
    for (name, tag, width) in fields {
        let mut name_bytes = name.as_bytes().to_vec();
        name_bytes.resize(11, 0);
        out.extend_from_slice(&name_bytes);
        out.push(*tag);
        out.extend_from_slice(&[0u8; 4]);
        out.push(*width);
        out.push(0);
        out.extend_from_slice(&[0u8; 14]);
    }
    out.push(0x0D);
    for i in 0..rows {
        out.push(0x20);
        let mut name = format!("record-{i}").into_bytes();
        name.resize(20, b' ');
        out.extend_from_slice(&name);
        out.extend_from_slice(format!("{:>8}", i * 3).as_bytes());
    }
    out.push(0x1A);
    out
}

fn bench_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("dbf-export-bench-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn bench_read_normalize(c: &mut Criterion) {
    let dir = bench_dir();
    let input = dir.join("sample.dbf");
    std::fs::write(&input, sample_dbf(1_000)).unwrap();

    c.bench_function("read_and_normalize_1k_rows", |b| {
        b.iter(|| {
            let table = normalize(read_table(&input).unwrap());
            black_box(table.row_count())
        })
    });
}

fn bench_write_csv(c: &mut Criterion) {
    let dir = bench_dir();
    let input = dir.join("sample.dbf");
    std::fs::write(&input, sample_dbf(1_000)).unwrap();
    let table = normalize(read_table(&input).unwrap());

    let availability = EngineAvailability {
        dbf: true,
        xlsx: false,
        csv: true,
    };
    let engine = select_engine(&availability).unwrap();
    let output = dir.join("sample.csv");

    c.bench_function("write_csv_1k_rows", |b| {
        b.iter(|| write_table(black_box(&table), &engine, &output).unwrap())
    });
}

criterion_group!(benches, bench_read_normalize, bench_write_csv);
criterion_main!(benches);
