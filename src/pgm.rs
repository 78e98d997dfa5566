//! Decoding of the server's plain-text pixel grid format.
//!
//! A tile body is a whitespace-separated token stream: the magic `P2`, the
//! tile width, height and max sample value (always 256 for this server),
//! followed by `width × height` integer samples in row-major order.

#[derive(Debug)]
pub enum PgmError {
    /// First token is not "P2"
    BadMagic,
    /// Max-value token is not "256"
    BadMaxValue,
    /// A dimension or sample token is not a valid integer
    InvalidNumber,
    /// Fewer tokens than the dimensions announce
    Truncated,
}

/// A decoded tile: dimensions plus row-major 8-bit samples.
#[derive(Debug)]
pub struct PgmTile {
    pub width: u32,
    pub height: u32,
    pub samples: Vec<u8>,
}

pub fn decode(text: &str) -> Result<PgmTile, PgmError> {
    let mut tokens = text.split_whitespace();

    if tokens.next() != Some("P2") {
        return Err(PgmError::BadMagic);
    }

    let width: u32 = tokens
        .next()
        .ok_or(PgmError::Truncated)?
        .parse()
        .map_err(|_| PgmError::InvalidNumber)?;
    let height: u32 = tokens
        .next()
        .ok_or(PgmError::Truncated)?
        .parse()
        .map_err(|_| PgmError::InvalidNumber)?;

    if tokens.next() != Some("256") {
        return Err(PgmError::BadMaxValue);
    }

    let count = (width as usize) * (height as usize);
    let mut samples = Vec::with_capacity(count);
    for _ in 0..count {
        let value: u32 = tokens
            .next()
            .ok_or(PgmError::Truncated)?
            .parse()
            .map_err(|_| PgmError::InvalidNumber)?;
        // With a max value of 256 a sample of exactly 256 is legal; it wraps
        // to 0, rendering the set interior black.
        samples.push((value & 0xff) as u8);
    }

    Ok(PgmTile {
        width,
        height,
        samples,
    })
}
