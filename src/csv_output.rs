//! CSV artifact format
//!
//! Header is the generation column label followed by the identifier names;
//! each data row is the generation index followed by one count per name.
//! Every line, the last included, ends with `\n`.

use crate::error::{DumpError, Result};
use crate::matrix::CountMatrix;

/// Escape CSV field (handle commas, quotes, newlines)
fn escape_field(field: &str) -> String {
    // If field contains comma, quote, CR or LF, wrap in quotes and escape quotes
    if field.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// Generate CSV header row
fn header(matrix: &CountMatrix) -> String {
    std::iter::once(&matrix.generation_column)
        .chain(&matrix.names)
        .map(|field| escape_field(field))
        .collect::<Vec<_>>()
        .join(",")
}

/// Format one generation as a CSV row
fn format_row(generation: usize, counts: impl Iterator<Item = u64>) -> String {
    std::iter::once(generation.to_string())
        .chain(counts.map(|count| count.to_string()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Render a count matrix as CSV text
pub fn render_csv(matrix: &CountMatrix) -> String {
    let mut output = String::new();

    output.push_str(&header(matrix));
    output.push('\n');

    for generation in 0..matrix.generations() {
        output.push_str(&format_row(generation, matrix.row_counts(generation)));
        output.push('\n');
    }

    output
}

/// Split CSV text into records, honoring quoted fields
///
/// Each record is paired with the 1-based line it starts on.
fn split_records(text: &str) -> Result<Vec<(usize, Vec<String>)>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut pending = false;
    let mut line = 1;
    let mut record_line = 1;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                '\n' => {
                    line += 1;
                    field.push('\n');
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => {
                in_quotes = true;
                pending = true;
            }
            ',' => {
                fields.push(std::mem::take(&mut field));
                pending = true;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                records.push((record_line, std::mem::take(&mut fields)));
                line += 1;
                record_line = line;
                pending = false;
            }
            _ => {
                field.push(c);
                pending = true;
            }
        }
    }

    if in_quotes {
        return Err(DumpError::parse(record_line, "unterminated quoted field"));
    }

    if pending {
        fields.push(field);
        records.push((record_line, fields));
    }

    Ok(records)
}

/// Parse a CSV artifact back into a count matrix
///
/// Generation indices must run 0, 1, 2, ... in order and every row must
/// carry one count per header name.
pub fn parse_csv(text: &str) -> Result<CountMatrix> {
    let mut records = split_records(text)?.into_iter();

    let (_, mut header) = records
        .next()
        .ok_or_else(|| DumpError::parse(1, "empty input, expected a header row"))?;
    let generation_column = header.remove(0);
    let names = header;

    let mut rows = Vec::new();
    for (generation, (line, fields)) in records.enumerate() {
        if fields.len() != names.len() + 1 {
            return Err(DumpError::parse(
                line,
                format!(
                    "expected {} fields, found {}",
                    names.len() + 1,
                    fields.len()
                ),
            ));
        }

        let index: usize = fields[0]
            .parse()
            .map_err(|_| DumpError::parse(line, format!("invalid generation index {:?}", fields[0])))?;
        if index != generation {
            return Err(DumpError::parse(
                line,
                format!("expected generation {}, found {}", generation, index),
            ));
        }

        let counts = fields[1..]
            .iter()
            .map(|value| {
                value
                    .parse::<u64>()
                    .map_err(|_| DumpError::parse(line, format!("invalid count {:?}", value)))
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push(counts);
    }

    Ok(CountMatrix {
        generation_column,
        names,
        rows,
    })
}
