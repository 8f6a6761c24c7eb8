//! Per-unit totals across all generations of an artifact

use crate::matrix::{CountMatrix, UnitTotal};

/// Totals sorted by total count (descending), ties broken by name
pub fn sorted_totals(matrix: &CountMatrix) -> Vec<UnitTotal> {
    let mut totals = matrix.totals();
    totals.sort_by(|a, b| b.total.cmp(&a.total).then_with(|| a.name.cmp(&b.name)));
    totals
}

/// Format the totals summary printed by `gentrack summary`
pub fn format_summary(matrix: &CountMatrix) -> String {
    let totals = sorted_totals(matrix);

    if totals.is_empty() {
        return "No tracked units.\n".to_string();
    }

    let mut out = String::new();
    out.push_str(&format!(
        "{} generation(s), {} unit(s)\n\n",
        matrix.generations(),
        totals.len()
    ));
    out.push_str(&format!("{:<40} {:>12} {:>12}\n", "Unit", "Total", "Peak"));
    out.push_str(&"─".repeat(66));
    out.push('\n');

    for unit in &totals {
        out.push_str(&format!("{:<40} {:>12} {:>12}\n", unit.name, unit.total, unit.peak));
    }

    out.push_str(&"─".repeat(66));
    out.push('\n');
    out
}
