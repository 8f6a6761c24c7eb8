//! Fixed-width table artifact format
//!
//! The generation column is as wide as the larger of its label and the
//! final generation index. Each identifier column is as wide as the larger
//! of its name and its widest count. Header cells are left-justified, data
//! cells right-justified, columns separated by one space. Lines are joined
//! with `\n` with no newline after the last one.

use crate::matrix::CountMatrix;

fn digits(value: u64) -> usize {
    value.to_string().len()
}

/// Width of the generation column
fn generation_width(matrix: &CountMatrix) -> usize {
    let label = matrix.generation_column.chars().count();
    match matrix.rows.len().checked_sub(1) {
        Some(last) => label.max(digits(last as u64)),
        None => label,
    }
}

/// Width of the identifier column at `col`
fn column_width(matrix: &CountMatrix, col: usize) -> usize {
    (0..matrix.generations())
        .map(|generation| digits(matrix.cell(generation, col)))
        .fold(matrix.names[col].chars().count(), usize::max)
}

/// Render a count matrix as a fixed-width table
pub fn render_table(matrix: &CountMatrix) -> String {
    let gen_width = generation_width(matrix);
    let widths: Vec<usize> = (0..matrix.names.len())
        .map(|col| column_width(matrix, col))
        .collect();

    let mut lines = Vec::with_capacity(matrix.rows.len() + 1);

    let mut header = format!("{:<w$}", matrix.generation_column, w = gen_width);
    for (name, width) in matrix.names.iter().zip(&widths) {
        header.push_str(&format!(" {:<w$}", name, w = *width));
    }
    lines.push(header);

    for generation in 0..matrix.generations() {
        let mut line = format!("{:>w$}", generation, w = gen_width);
        for (count, width) in matrix.row_counts(generation).zip(&widths) {
            line.push_str(&format!(" {:>w$}", count, w = *width));
        }
        lines.push(line);
    }

    lines.join("\n")
}
