use mandelfetch::pgm::{PgmError, decode};

#[test]
fn test_decode_simple_tile() {
    let tile = decode("P2 2 1 256 10 20").unwrap();

    assert_eq!(tile.width, 2);
    assert_eq!(tile.height, 1);
    assert_eq!(tile.samples, vec![10, 20]);
}

#[test]
fn test_decode_non_square_tile_row_major() {
    // 3 wide, 2 tall: first row 1 2 3, second row 4 5 6.
    let tile = decode("P2 3 2 256 1 2 3 4 5 6").unwrap();

    assert_eq!(tile.width, 3);
    assert_eq!(tile.height, 2);
    assert_eq!(tile.samples, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn test_decode_arbitrary_whitespace() {
    let tile = decode("P2\n2 2\n256\n 1 2\n 3 4\n").unwrap();
    assert_eq!(tile.samples, vec![1, 2, 3, 4]);
}

#[test]
fn test_decode_max_iteration_sample_wraps_to_zero() {
    // 256 is a legal sample under max-value 256 and maps to the low byte.
    let tile = decode("P2 1 1 256 256").unwrap();
    assert_eq!(tile.samples, vec![0]);
}

#[test]
fn test_decode_bad_magic() {
    assert!(matches!(decode("P5 1 1 256 0"), Err(PgmError::BadMagic)));
    assert!(matches!(decode(""), Err(PgmError::BadMagic)));
}

#[test]
fn test_decode_bad_max_value() {
    assert!(matches!(decode("P2 1 1 255 0"), Err(PgmError::BadMaxValue)));
}

#[test]
fn test_decode_truncated_samples() {
    assert!(matches!(decode("P2 2 2 256 1 2 3"), Err(PgmError::Truncated)));
}

#[test]
fn test_decode_invalid_sample_token() {
    assert!(matches!(
        decode("P2 1 1 256 abc"),
        Err(PgmError::InvalidNumber)
    ));
}
