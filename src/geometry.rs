//! Edge-geometry input.
//!
//! Road edges arrive one per line, caret-delimited:
//!
//! ```text
//! edge_id^name^road_type^length^lat^lon^lat^lon...
//! ```
//!
//! The four header fields are followed by the edge's polyline as alternating
//! latitude and longitude values. Consecutive vertices become the segments
//! stored in the index.

use crate::error::{IndexError, Result};
use roadquad_types::{EdgeId, LatLon};
use serde::{Deserialize, Serialize};
use std::io::BufRead;

const DELIMITER: char = '^';
const HEADER_FIELDS: usize = 4;

/// One parsed road edge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EdgeGeometry {
    pub edge_id: EdgeId,
    pub name: String,
    pub road_type: String,
    /// Length as written in the file. Empty when the field is blank.
    pub length: Option<f64>,
    pub points: Vec<LatLon>,
}

impl EdgeGeometry {
    /// Parse a single line. Errors report `line` 0; the reader fills in the
    /// real line number.
    ///
    /// # Examples
    ///
    /// ```
    /// use roadquad::geometry::EdgeGeometry;
    ///
    /// let edge = EdgeGeometry::parse_line("42^Main St^residential^120.5^47.6^-122.3^47.7^-122.4").unwrap();
    /// assert_eq!(edge.edge_id, 42);
    /// assert_eq!(edge.points.len(), 2);
    /// assert_eq!(edge.segment_count(), 1);
    /// ```
    pub fn parse_line(line: &str) -> Result<Self> {
        Self::parse_numbered(line, 0)
    }

    fn parse_numbered(line: &str, line_no: usize) -> Result<Self> {
        let parse_err = |reason: String| IndexError::Parse {
            line: line_no,
            reason,
        };

        let mut fields = line.trim_end_matches(['\r', '\n']).split(DELIMITER);

        let mut header = [""; HEADER_FIELDS];
        for (i, slot) in header.iter_mut().enumerate() {
            *slot = fields
                .next()
                .ok_or_else(|| parse_err(format!("expected {} header fields, found {}", HEADER_FIELDS, i)))?;
        }
        let [edge_id, name, road_type, length] = header;

        let edge_id = edge_id
            .trim()
            .parse::<EdgeId>()
            .map_err(|e| parse_err(format!("bad edge id {:?}: {}", edge_id, e)))?;

        let length = match length.trim() {
            "" => None,
            text => Some(
                text.parse::<f64>()
                    .map_err(|e| parse_err(format!("bad length {:?}: {}", text, e)))?,
            ),
        };

        let mut coords: Vec<&str> = fields.collect();
        // A trailing delimiter leaves one empty field behind.
        if coords.last().is_some_and(|f| f.trim().is_empty()) {
            coords.pop();
        }
        if coords.len() % 2 != 0 {
            return Err(parse_err(format!(
                "odd number of coordinate fields ({})",
                coords.len()
            )));
        }

        let parse_coord = |field: &str| {
            field
                .trim()
                .parse::<f64>()
                .map_err(|e| parse_err(format!("bad coordinate {:?}: {}", field, e)))
        };

        let points = coords
            .chunks_exact(2)
            .map(|pair| Ok(LatLon::new(parse_coord(pair[0])?, parse_coord(pair[1])?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            edge_id,
            name: name.to_string(),
            road_type: road_type.to_string(),
            length,
            points,
        })
    }

    /// Number of segments the polyline splits into.
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
}

/// Iterator over the edges of a geometry stream.
///
/// Blank lines are skipped. Parse errors carry the 1-based line number.
pub struct EdgeGeometryReader<R> {
    reader: R,
    buf: String,
    line_no: usize,
}

impl<R: BufRead> EdgeGeometryReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            line_no: 0,
        }
    }

    /// Number of lines consumed so far, blank ones included.
    pub fn line_number(&self) -> usize {
        self.line_no
    }
}

impl<R: BufRead> Iterator for EdgeGeometryReader<R> {
    type Item = Result<EdgeGeometry>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_no += 1;
                    if self.buf.trim().is_empty() {
                        continue;
                    }
                    return Some(EdgeGeometry::parse_numbered(&self.buf, self.line_no));
                }
                Err(e) => return Some(Err(e.into())),
            }
        }
    }
}

/// Counts reported after loading a geometry stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadSummary {
    /// Edges that contributed at least one segment
    pub edges: usize,
    pub segments: usize,
    /// Edges with fewer than two points
    pub skipped_edges: usize,
}
