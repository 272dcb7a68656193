use std::fs::File;
use std::io::{BufRead, BufReader};

use anyhow::{anyhow, Context, Result};
use log::debug;

use super::{Input, Row};

/// Reads whitespace separated numeric rows. Empty lines and lines starting with `#` are
/// skipped. Fields may be double quoted. Only the first `num_columns` fields of a row are used.
pub struct TextReader {
    rows: Vec<Vec<f64>>,
    row_idx: usize,
}

impl TextReader {
    pub fn new(reader: impl BufRead, num_columns: usize) -> Result<Self> {
        if num_columns == 0 {
            return Err(anyhow!("Number of columns must be positive"));
        }

        let mut rows = vec![];
        for (line_idx, line) in reader.lines().enumerate() {
            let line = line?;
            let line_number = line_idx + 1;
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }

            let fields = split_fields(&line);
            if fields.len() < num_columns {
                return Err(anyhow!(
                    "Line {}: expected {} columns, found {}",
                    line_number,
                    num_columns,
                    fields.len()
                ));
            }
            let row = fields
                .iter()
                .take(num_columns)
                .map(|field| {
                    field.parse::<f64>().with_context(|| {
                        format!("Line {}: invalid number {:?}", line_number, field)
                    })
                })
                .collect::<Result<Vec<f64>>>()?;
            rows.push(row);
        }
        debug!("Read {} rows of {} columns", rows.len(), num_columns);

        Ok(Self { rows, row_idx: 0 })
    }

    pub fn from_path(path: &str, num_columns: usize) -> Result<Self> {
        let file = File::open(path).with_context(|| format!("Failed to open {}", path))?;
        Self::new(BufReader::new(file), num_columns).with_context(|| format!("Failed to read {}", path))
    }
}

impl Input for TextReader {
    fn has_next(&self) -> bool {
        self.row_idx < self.rows.len()
    }

    // Caller is responsible for checking has_next() first
    fn next(&mut self) -> Row<'_> {
        let idx = self.row_idx;
        self.row_idx += 1;
        Row {
            id: idx as u64,
            data: &self.rows[idx],
        }
    }

    fn reset(&mut self) {
        self.row_idx = 0;
    }

    fn num_rows(&self) -> usize {
        self.rows.len()
    }
}

/// Splits a line on whitespace. A field starting with `"` runs to the matching unescaped `"`,
/// with `\` escaping the next character.
pub fn split_fields(line: &str) -> Vec<String> {
    let mut fields = vec![];
    let mut chars = line.chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let mut field = String::new();
        if c == '"' {
            chars.next();
            while let Some(c) = chars.next() {
                match c {
                    '\\' => {
                        if let Some(escaped) = chars.next() {
                            field.push(escaped);
                        }
                    }
                    '"' => break,
                    _ => field.push(c),
                }
            }
        } else {
            while let Some(&c) = chars.peek() {
                if c.is_whitespace() {
                    break;
                }
                field.push(c);
                chars.next();
            }
        }
        fields.push(field);
    }
    fields
}
