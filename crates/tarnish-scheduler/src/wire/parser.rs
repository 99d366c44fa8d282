//! Parser for the line-oriented batch format.
//!
//! ```text
//! n m
//! r_1 w_1
//! <r_1 read cells>
//! <w_1 write cells>
//! ...
//! ```
//!
//! `m` is input framing only and is not used by the planner. Empty sets
//! still occupy one (empty) line.

use crate::domain::entities::Batch;
use crate::domain::errors::WireError;
use crate::domain::value_objects::{AccessProfile, CellId};

struct LineReader<'a> {
    lines: std::str::Lines<'a>,
    line_no: usize,
}

impl<'a> LineReader<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            lines: input.lines(),
            line_no: 0,
        }
    }

    fn next_line(&mut self) -> Result<&'a str, WireError> {
        self.line_no += 1;
        self.lines
            .next()
            .ok_or(WireError::UnexpectedEof { line: self.line_no })
    }

    /// Read one line holding exactly `expected` integers.
    fn next_fields(&mut self, expected: usize) -> Result<Vec<CellId>, WireError> {
        let line = self.next_line()?;
        let line_no = self.line_no;
        let fields: Vec<&str> = line.split_whitespace().collect();

        if fields.len() != expected {
            return Err(WireError::FieldCountMismatch {
                line: line_no,
                expected,
                found: fields.len(),
            });
        }

        fields
            .into_iter()
            .map(|token| {
                token.parse::<CellId>().map_err(|_| WireError::InvalidInteger {
                    token: token.to_string(),
                    line: line_no,
                })
            })
            .collect()
    }
}

/// Parse a whole batch from its textual form.
pub fn parse_batch(input: &str) -> Result<Batch, WireError> {
    let mut reader = LineReader::new(input);

    let header = reader.next_fields(2)?;
    let transaction_count = header[0] as usize;

    // Capacity capped: the declared count is unverified until the lines run out.
    let mut profiles = Vec::with_capacity(transaction_count.min(1 << 16));
    for _ in 0..transaction_count {
        let sizes = reader.next_fields(2)?;
        let reads = reader.next_fields(sizes[0] as usize)?;
        let writes = reader.next_fields(sizes[1] as usize)?;

        profiles.push(
            AccessProfile::new()
                .with_reads(reads)
                .with_writes(writes),
        );
    }

    Ok(Batch::from_profiles(profiles))
}
