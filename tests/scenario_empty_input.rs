//! Stitching nothing is an error, not an empty record.

use filing_synthesis::{EntityId, SynthesisError, ZipperEngine};

#[test]
fn empty_input_is_rejected() {
    let result = ZipperEngine::new().stitch(EntityId::new("ACME"), &[]);

    match result {
        Err(SynthesisError::EmptyInput { ticker }) => assert_eq!(ticker, "ACME"),
        other => panic!("expected EmptyInput, got {:?}", other.map(|r| r.summary())),
    }
}

#[test]
fn empty_merge_batch_is_a_noop() {
    use filing_synthesis::GoldenRecord;

    let mut record = GoldenRecord::new(EntityId::new("ACME"));
    let summary = ZipperEngine::new().merge_snapshots(&mut record, &[]).unwrap();

    assert_eq!(summary, Default::default());
    assert!(record.timeline.is_empty());
}
