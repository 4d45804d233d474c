//! Landmark sources feeding the dispatcher one frame per tick.
//!
//! The face-mesh model itself lives outside this crate. Sources only have to
//! hand over either the raw points of a face or a "no face" marker.

use crate::{landmarks::Landmark, Error, Result};
use std::io::BufRead;

/// One tick of input: `Some(points)` for a face, `None` when no face was found
pub type SourceFrame = Option<Vec<Landmark>>;

/// Supplier of landmark frames
pub trait LandmarkSource {
    /// Next frame, or `Ok(None)` at end of stream
    fn next_frame(&mut self) -> Result<Option<SourceFrame>>;
}

/// Reads frames from line-oriented text.
///
/// Each non-comment line is one frame: whitespace-separated `x y z` triples,
/// or `-`, `none` or an empty line for a frame without a face. Lines starting
/// with `#` are skipped.
pub struct TextLandmarkSource<R> {
    reader: R,
    line_number: usize,
    buffer: String,
}

impl<R: BufRead> TextLandmarkSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buffer: String::new(),
        }
    }

    /// Parse one frame line
    pub fn parse_line(line: &str, line_number: usize) -> Result<SourceFrame> {
        let line = line.trim();
        if line.is_empty() || line == "-" || line.eq_ignore_ascii_case("none") {
            return Ok(None);
        }

        let values = line
            .split_whitespace()
            .map(|token| {
                token.parse::<f64>().map_err(|_| {
                    Error::InvalidInput(format!("Line {line_number}: invalid coordinate '{token}'"))
                })
            })
            .collect::<Result<Vec<f64>>>()?;

        if values.len() % 3 != 0 {
            return Err(Error::InvalidInput(format!(
                "Line {line_number}: expected x y z triples, got {} values",
                values.len()
            )));
        }

        Ok(Some(
            values
                .chunks_exact(3)
                .map(|xyz| Landmark::new(xyz[0], xyz[1], xyz[2]))
                .collect(),
        ))
    }
}

impl<R: BufRead> LandmarkSource for TextLandmarkSource<R> {
    fn next_frame(&mut self) -> Result<Option<SourceFrame>> {
        loop {
            self.buffer.clear();
            if self.reader.read_line(&mut self.buffer)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;
            if self.buffer.trim_start().starts_with('#') {
                continue;
            }
            return Self::parse_line(&self.buffer, self.line_number).map(Some);
        }
    }
}

/// Replays frames held in memory
pub struct VecLandmarkSource {
    frames: std::vec::IntoIter<SourceFrame>,
}

impl VecLandmarkSource {
    #[must_use]
    pub fn new(frames: Vec<SourceFrame>) -> Self {
        Self {
            frames: frames.into_iter(),
        }
    }
}

impl LandmarkSource for VecLandmarkSource {
    fn next_frame(&mut self) -> Result<Option<SourceFrame>> {
        Ok(self.frames.next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_text_source_frames() {
        let input = "# header\n0.1 0.2 0.3 0.4 0.5 0.6\nnone\n\n-\n";
        let mut source = TextLandmarkSource::new(Cursor::new(input));

        let first = source.next_frame().unwrap().unwrap().unwrap();
        assert_eq!(first, vec![Landmark::new(0.1, 0.2, 0.3), Landmark::new(0.4, 0.5, 0.6)]);
        assert_eq!(source.next_frame().unwrap(), Some(None));
        assert_eq!(source.next_frame().unwrap(), Some(None));
        assert_eq!(source.next_frame().unwrap(), Some(None));
        assert_eq!(source.next_frame().unwrap(), None);
    }

    #[test]
    fn test_text_source_errors_carry_line_number() {
        let mut source = TextLandmarkSource::new(Cursor::new("0.1 0.2 0.3\n0.1 0.2\n"));
        assert!(source.next_frame().is_ok());
        match source.next_frame() {
            Err(Error::InvalidInput(msg)) => assert!(msg.contains("Line 2"), "{msg}"),
            other => panic!("Expected InvalidInput, got {other:?}"),
        }

        assert!(TextLandmarkSource::<Cursor<&str>>::parse_line("0.1 abc 0.3", 7).is_err());
    }

    #[test]
    fn test_vec_source() {
        let mut source = VecLandmarkSource::new(vec![None, Some(vec![Landmark::default()])]);
        assert_eq!(source.next_frame().unwrap(), Some(None));
        assert_eq!(source.next_frame().unwrap().unwrap().map(|f| f.len()), Some(1));
        assert!(source.next_frame().unwrap().is_none());
    }
}
