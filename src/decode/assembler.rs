//! Output Assembler
//!
//! Drives the scan/decode loop across every chunk in a container and
//! appends each decoded buffer to a sink. The sink is only reset once
//! the envelope has been validated and a first chunk located, so a
//! rejected input never disturbs the destination.

use super::chunk::{decode_chunk, ChunkEnd};
use super::cursor::Cursor;
use super::scanner::locate_first_chunk;
use crate::{DecodeStats, Result, Warning, CHUNK_MAGIC};

/// Destination for decoded bytes
///
/// `reset` discards any prior content; it is called exactly once per
/// container, after validation succeeds and before the first append.
pub trait Sink {
    /// Discard prior content at the destination
    fn reset(&mut self) -> Result<()>;
    /// Append one chunk's decoded bytes
    fn append(&mut self, bytes: &[u8]) -> Result<()>;
}

impl Sink for Vec<u8> {
    fn reset(&mut self) -> Result<()> {
        self.clear();
        Ok(())
    }

    fn append(&mut self, bytes: &[u8]) -> Result<()> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

/// Why the chunk loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The byte after the last chunk was not a chunk magic, or the
    /// container ended exactly at a chunk boundary
    Clean,
    /// The last chunk's bitstream ran out mid-stream
    InputExhausted,
    /// A chunk ended abnormally with a chunk magic still at the cursor;
    /// the remainder was not decoded
    TrailingChunkIgnored,
}

/// Outcome of one container decode
#[derive(Debug)]
pub struct DecodeReport {
    /// Number of chunks decoded
    pub chunks: usize,
    /// Why the chunk loop stopped
    pub termination: Termination,
    /// Non-fatal conditions observed along the way
    pub warnings: Vec<Warning>,
    /// Literal/match/output counters
    pub stats: DecodeStats,
}

impl DecodeReport {
    /// True when the container decoded without a single warning
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty() && self.termination == Termination::Clean
    }
}

/// Decode every chunk of `container` into `sink`
///
/// Fatal errors (bad envelope, no chunk found, sink I/O) surface as
/// `Err`; bitstream damage degrades to warnings in the report.
pub fn decode_into<S: Sink>(container: &[u8], sink: &mut S) -> Result<DecodeReport> {
    let first = locate_first_chunk(container)?;
    sink.reset()?;

    let mut cursor = Cursor::new(container, first);
    let mut warnings = Vec::new();
    let mut stats = DecodeStats::default();
    let mut chunks = 0usize;

    let termination = loop {
        let result = decode_chunk(&mut cursor, chunks, &mut warnings, &mut stats);
        stats.output_bytes += result.data.len();
        sink.append(&result.data)?;
        chunks += 1;

        match result.end {
            ChunkEnd::Filled => match cursor.peek() {
                Some(CHUNK_MAGIC) => continue,
                _ => break Termination::Clean,
            },
            ChunkEnd::InputExhausted => break Termination::InputExhausted,
            ChunkEnd::Desynced => {
                // The stream is out of sync past this point; a magic byte
                // here may be real data we cannot safely chain into.
                if cursor.peek() == Some(CHUNK_MAGIC) {
                    warnings.push(Warning::TrailingChunk { offset: cursor.pos() });
                    break Termination::TrailingChunkIgnored;
                }
                break Termination::Clean;
            }
        }
    };

    Ok(DecodeReport {
        chunks,
        termination,
        warnings,
        stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ENVELOPE_MAGIC, SCAN_START};

    fn container(chunks: &[&[u8]]) -> Vec<u8> {
        let mut data = vec![0u8; SCAN_START];
        data[0] = ENVELOPE_MAGIC;
        for chunk in chunks {
            data.extend_from_slice(chunk);
        }
        data
    }

    fn literal_chunk(bytes: &[u8]) -> Vec<u8> {
        assert!(bytes.len() <= 8);
        let mut chunk = ((bytes.len() as u32) << 8 | CHUNK_MAGIC as u32)
            .to_le_bytes()
            .to_vec();
        chunk.push(0x00);
        chunk.extend_from_slice(bytes);
        chunk
    }

    #[test]
    fn test_single_chunk() {
        let data = container(&[&literal_chunk(b"text")]);
        let mut out = Vec::new();
        let report = decode_into(&data, &mut out).unwrap();

        assert_eq!(out, b"text");
        assert_eq!(report.chunks, 1);
        assert_eq!(report.termination, Termination::Clean);
        assert!(report.is_clean());
        assert_eq!(report.stats.output_bytes, 4);
    }

    #[test]
    fn test_two_chunks_concatenate() {
        let data = container(&[&literal_chunk(b"abc"), &literal_chunk(b"defg")]);
        let mut out = Vec::new();
        let report = decode_into(&data, &mut out).unwrap();

        assert_eq!(out, b"abcdefg");
        assert_eq!(report.chunks, 2);
        assert_eq!(report.termination, Termination::Clean);
    }

    #[test]
    fn test_container_ends_at_chunk_boundary() {
        // No terminator byte after the last chunk; still a clean end.
        let data = container(&[&literal_chunk(b"xyz")]);
        let report = decode_into(&data, &mut Vec::new()).unwrap();
        assert_eq!(report.termination, Termination::Clean);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_stops_at_non_magic_terminator() {
        let mut data = container(&[&literal_chunk(b"ab")]);
        data.push(0xFF);
        data.extend_from_slice(&literal_chunk(b"zz"));

        let mut out = Vec::new();
        let report = decode_into(&data, &mut out).unwrap();
        assert_eq!(out, b"ab");
        assert_eq!(report.chunks, 1);
        assert_eq!(report.termination, Termination::Clean);
    }

    #[test]
    fn test_sink_untouched_on_bad_magic() {
        let mut data = container(&[&literal_chunk(b"ab")]);
        data[0] = 0x00;

        let mut out = b"previous".to_vec();
        assert!(decode_into(&data, &mut out).is_err());
        assert_eq!(out, b"previous");
    }

    #[test]
    fn test_truncated_last_chunk() {
        let mut short = literal_chunk(b"abcdef");
        short.truncate(short.len() - 2);
        let data = container(&[&literal_chunk(b"12"), &short]);

        let mut out = Vec::new();
        let report = decode_into(&data, &mut out).unwrap();
        assert_eq!(report.chunks, 2);
        assert_eq!(report.termination, Termination::InputExhausted);
        assert_eq!(out.len(), 2 + 6); // declared lengths, zero fill included
        assert_eq!(&out[..6], b"12abcd");
        assert!(matches!(
            report.warnings[..],
            [Warning::UnexpectedEnd { chunk: 1, .. }]
        ));
    }

    #[test]
    fn test_trailing_chunk_after_desync() {
        // Chunk 0 clamps a run, leaving a chunk magic at the cursor.
        let mut chunk = (2u32 << 8 | CHUNK_MAGIC as u32).to_le_bytes().to_vec();
        chunk.push(0b0100_0000);
        chunk.push(b'q');
        let v = (0x0Fu16 << 12) | 0; // len 18 into 1 remaining byte
        chunk.extend_from_slice(&v.to_be_bytes());

        let mut data = container(&[&chunk]);
        data.extend_from_slice(&literal_chunk(b"mm"));

        let mut out = Vec::new();
        let report = decode_into(&data, &mut out).unwrap();
        assert_eq!(out, b"qq");
        assert_eq!(report.chunks, 1);
        assert_eq!(report.termination, Termination::TrailingChunkIgnored);
        assert!(report
            .warnings
            .iter()
            .any(|w| matches!(w, Warning::TrailingChunk { .. })));
    }
}
