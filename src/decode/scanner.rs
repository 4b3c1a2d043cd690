//! Container Scanner
//!
//! Validates the outer envelope and locates the first compressed chunk.
//! The scan is pure: nothing is written anywhere until it succeeds.

use crate::{LzwwError, Result, CHUNK_MAGIC, ENVELOPE_MAGIC, SCAN_LIMIT, SCAN_START, SCAN_STRIDE};

/// Locate the first chunk header in a validated envelope
///
/// Checks that byte 0 carries the envelope magic, then probes from
/// [`SCAN_START`] in [`SCAN_STRIDE`]-byte steps, at most [`SCAN_LIMIT`]
/// strides past the first probe, for the chunk magic. Returns the byte
/// offset of the chunk header.
pub fn locate_first_chunk(container: &[u8]) -> Result<usize> {
    let lead = *container
        .first()
        .ok_or(LzwwError::Truncated(container.len()))?;
    if lead != ENVELOPE_MAGIC {
        return Err(LzwwError::BadEnvelopeMagic(lead));
    }

    let mut pos = SCAN_START;
    for _ in 0..=SCAN_LIMIT {
        match container.get(pos) {
            Some(&b) if b == CHUNK_MAGIC => return Ok(pos),
            Some(_) => pos += SCAN_STRIDE,
            None => return Err(LzwwError::Truncated(container.len())),
        }
    }

    Err(LzwwError::ChunkNotFound(SCAN_LIMIT))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope_with_chunk_at(offset: usize) -> Vec<u8> {
        let mut data = vec![0u8; offset + 4];
        data[0] = ENVELOPE_MAGIC;
        data[offset] = CHUNK_MAGIC;
        data
    }

    #[test]
    fn test_chunk_at_scan_start() {
        let data = envelope_with_chunk_at(SCAN_START);
        assert_eq!(locate_first_chunk(&data).unwrap(), SCAN_START);
    }

    #[test]
    fn test_chunk_after_strides() {
        let data = envelope_with_chunk_at(SCAN_START + 3 * SCAN_STRIDE);
        assert_eq!(
            locate_first_chunk(&data).unwrap(),
            SCAN_START + 3 * SCAN_STRIDE
        );
    }

    #[test]
    fn test_bad_envelope_magic() {
        let mut data = envelope_with_chunk_at(SCAN_START);
        data[0] = 0x00;
        assert!(matches!(
            locate_first_chunk(&data),
            Err(LzwwError::BadEnvelopeMagic(0x00))
        ));
    }

    #[test]
    fn test_empty_container() {
        assert!(matches!(
            locate_first_chunk(&[]),
            Err(LzwwError::Truncated(0))
        ));
    }

    #[test]
    fn test_scan_limit_exceeded() {
        // Chunk magic one stride past the last probed position.
        let data = envelope_with_chunk_at(SCAN_START + (SCAN_LIMIT + 1) * SCAN_STRIDE);
        assert!(matches!(
            locate_first_chunk(&data),
            Err(LzwwError::ChunkNotFound(_))
        ));
    }

    #[test]
    fn test_scan_limit_boundary() {
        let data = envelope_with_chunk_at(SCAN_START + SCAN_LIMIT * SCAN_STRIDE);
        assert_eq!(
            locate_first_chunk(&data).unwrap(),
            SCAN_START + SCAN_LIMIT * SCAN_STRIDE
        );
    }

    #[test]
    fn test_truncated_scan_region() {
        let mut data = vec![0u8; SCAN_START + 1];
        data[0] = ENVELOPE_MAGIC;
        assert!(matches!(
            locate_first_chunk(&data),
            Err(LzwwError::Truncated(_))
        ));
    }
}
