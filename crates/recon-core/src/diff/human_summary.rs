//! Human-readable summary renderer for field diffs.

use crate::diff::model::FieldDiff;

/// Render a Markdown review table, one row per diff.
///
/// Rows that need a reviewer's approval get an unchecked box `[ ]` in the
/// `Confirm` column. The summary is informational only.
pub fn render_review_summary(diffs: &[FieldDiff]) -> String {
    let mut out = String::new();

    out.push_str("## Upload Review\n\n");

    let changed = diffs.iter().filter(|d| d.changed).count();
    let pending = diffs.iter().filter(|d| d.requires_confirmation).count();
    out.push_str(&format!(
        "**Fields**: {}  \n**Changed**: {changed}  \n**Awaiting confirmation**: {pending}\n\n",
        diffs.len()
    ));

    if changed == 0 {
        out.push_str("_No changes detected._\n");
        return out;
    }

    out.push_str("| Field | Current | Uploaded | Status | Confirm |\n");
    out.push_str("|---|---|---|---|---|\n");
    for diff in diffs {
        let status = if !diff.changed {
            "same"
        } else if diff.old.is_empty() {
            "added"
        } else if diff.new.is_empty() {
            "cleared"
        } else {
            "overwritten"
        };
        let confirm = if diff.requires_confirmation { "[ ]" } else { "" };
        out.push_str(&format!(
            "| {} | {} | {} | {status} | {confirm} |\n",
            cell(&diff.key),
            cell(&diff.old),
            cell(&diff.new),
        ));
    }

    out
}

/// Escape a value for a Markdown table cell.
fn cell(s: &str) -> String {
    if s.is_empty() {
        return "_empty_".to_string();
    }
    s.replace('|', "\\|").replace('\n', " ")
}
