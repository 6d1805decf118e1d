//! Human-readable description of a schema's fields.
//!
//! Responsibilities:
//! - Render the descriptor table of a schema as an aligned text table.
//! - List the override variables a schema honors.
//!
//! Invariants:
//! - Default literals are printed verbatim.
//! - Elements of section lists are shown as `key[].field` with no override
//!   variable, since overrides are not applied to list elements.

use super::{FieldMeta, FieldSpec, Section};

const HEADERS: [&str; 6] = ["KEY", "TYPE", "ENV", "DEFAULT", "REQUIRED", "DESCRIPTION"];

struct Row([String; 6]);

/// Render every field of `S` as a table, one line per field.
pub fn usage<S: Section>() -> String {
    let mut rows = Vec::new();
    collect_rows(metas::<S>(), "", true, &mut rows);

    let mut widths = HEADERS.map(str::len);
    for Row(cells) in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, &HEADERS.map(String::from), &widths);
    for Row(cells) in &rows {
        push_line(&mut out, cells, &widths);
    }
    out
}

/// Environment variables that override fields of `S`, in table order.
pub fn override_variables<S: Section>() -> Vec<&'static str> {
    metas::<S>().iter().filter_map(|meta| meta.env).collect()
}

fn metas<S: Section>() -> Vec<FieldMeta> {
    S::fields().into_iter().map(FieldSpec::into_meta).collect()
}

fn collect_rows(metas: Vec<FieldMeta>, prefix: &str, overrides: bool, rows: &mut Vec<Row>) {
    for meta in metas {
        let key = format!("{prefix}{}", meta.key);
        let env = if overrides { meta.env } else { None };
        rows.push(Row([
            key.clone(),
            meta.kind.to_string(),
            env.unwrap_or("-").to_string(),
            meta.default.unwrap_or("-").to_string(),
            (if meta.required { "yes" } else { "no" }).to_string(),
            meta.description.unwrap_or("").to_string(),
        ]));
        if let Some(elements) = meta.elements {
            collect_rows(elements(), &format!("{key}[]."), false, rows);
        }
    }
}

fn push_line(out: &mut String, cells: &[String; 6], widths: &[usize; 6]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}
