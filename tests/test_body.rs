use mandelfetch::http::body::{BodyChunks, CHUNK_SIZE, assemble};

fn fill(chunks: &mut BodyChunks, data: &[u8]) {
    let mut rest = data;
    while !rest.is_empty() {
        let spare = chunks.spare_mut();
        let n = spare.len().min(rest.len());
        spare[..n].copy_from_slice(&rest[..n]);
        chunks.advance(n);
        rest = &rest[n..];
    }
}

#[test]
fn test_empty_body_yields_no_chunks() {
    let chunks = BodyChunks::new();
    assert!(chunks.finish().is_empty());
}

#[test]
fn test_partial_chunk_sealed_to_filled_length() {
    let mut chunks = BodyChunks::new();
    fill(&mut chunks, b"hello");

    let sealed = chunks.finish();
    assert_eq!(sealed.len(), 1);
    assert_eq!(&sealed[0][..], b"hello");
}

#[test]
fn test_exact_boundary_fill() {
    // A body of exactly N chunk capacities: N sealed chunks plus an empty
    // current one before finish, exactly N chunks after.
    for n in 1..=3usize {
        let mut chunks = BodyChunks::new();
        fill(&mut chunks, &vec![0xAB; n * CHUNK_SIZE]);

        assert_eq!(chunks.sealed_len(), n);
        assert_eq!(chunks.current_len(), 0);

        let sealed = chunks.finish();
        assert_eq!(sealed.len(), n);
        assert!(sealed.iter().all(|c| c.len() == CHUNK_SIZE));
    }
}

#[test]
fn test_boundary_plus_tail() {
    let mut chunks = BodyChunks::new();
    fill(&mut chunks, &vec![1u8; CHUNK_SIZE + 10]);

    let sealed = chunks.finish();
    assert_eq!(sealed.len(), 2);
    assert_eq!(sealed[0].len(), CHUNK_SIZE);
    assert_eq!(sealed[1].len(), 10);
}

#[test]
fn test_leftover_becomes_first_chunk() {
    let mut chunks = BodyChunks::with_leftover(b"left");
    fill(&mut chunks, b"over");

    let sealed = chunks.finish();
    assert_eq!(sealed.len(), 2);
    assert_eq!(&sealed[0][..], b"left");
    assert_eq!(&sealed[1][..], b"over");
    assert_eq!(assemble(&sealed), b"leftover");
}

#[test]
fn test_empty_leftover_queues_nothing() {
    let chunks = BodyChunks::with_leftover(b"");
    assert!(chunks.finish().is_empty());
}

#[test]
fn test_assemble_preserves_arrival_order() {
    let mut chunks = BodyChunks::new();
    let data: Vec<u8> = (0..(2 * CHUNK_SIZE + 100)).map(|i| (i % 251) as u8).collect();
    fill(&mut chunks, &data);

    assert_eq!(assemble(&chunks.finish()), data);
}
