//! Snapshot files in, golden record and restatement CSV out.

mod common;

use common::{filing, year};
use filing_synthesis::{
    fields, fingerprint, load_snapshots, write_restatements_csv, EntityId, GoldenRecord,
    Reported, ZipperEngine,
};
use std::fs;

#[test]
fn file_round_trip_preserves_fingerprint() {
    let dir = tempfile::tempdir().unwrap();

    let a = filing("A", "2024-02-28", "10-K", 2023)
        .item(fields::revenue(), &[(2023, 100.0), (2022, 50.0)])
        .build();
    let b = filing("B", "2025-02-28", "10-K", 2024)
        .item(fields::revenue(), &[(2024, 120.0), (2023, 100.0), (2022, 52.0)])
        .build();

    // one file with an array, one with a single object
    let batch = dir.path().join("batch.json");
    let single = dir.path().join("single.json");
    fs::write(&batch, serde_json::to_string(&vec![a]).unwrap()).unwrap();
    fs::write(&single, serde_json::to_string(&b).unwrap()).unwrap();

    let mut snapshots = load_snapshots(&batch).unwrap();
    snapshots.extend(load_snapshots(&single).unwrap());
    assert_eq!(snapshots.len(), 2);

    let record = ZipperEngine::new()
        .stitch(EntityId::new("ACME"), &snapshots)
        .unwrap();

    let out = dir.path().join("record.json");
    fs::write(&out, serde_json::to_string_pretty(&record).unwrap()).unwrap();
    let reloaded: GoldenRecord = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();

    assert_eq!(reloaded.value(&year(2022), &fields::revenue()), Reported::Present(52.0));
    assert_eq!(fingerprint(&reloaded).unwrap(), fingerprint(&record).unwrap());

    let csv_path = dir.path().join("restatements.csv");
    let rows = write_restatements_csv(&record.restatements, fs::File::create(&csv_path).unwrap()).unwrap();
    assert_eq!(rows, 1);

    let csv = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.lines().nth(1).unwrap().starts_with("2022,Revenue,50.0,52.0,4.0,routine,A,B,"));
}
