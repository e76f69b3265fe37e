//! Bindings command: print the effective chord bindings.

use anyhow::Result;
use selchord_config::Config;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct BindingRow {
    chord: String,
    code: String,
    action: String,
    description: &'static str,
}

fn rows(config: &Config) -> Vec<BindingRow> {
    config
        .bindings
        .iter()
        .map(|spec| BindingRow {
            chord: format!("{0}{0}", spec.key.label()),
            code: spec.key.to_string(),
            action: spec.action.to_string(),
            description: spec.action.description(),
        })
        .collect()
}

/// Render the bindings as an aligned table.
pub fn format_table(config: &Config) -> String {
    let rows = rows(config);
    let width = |f: fn(&BindingRow) -> usize, header: &str| {
        rows.iter().map(f).max().unwrap_or(0).max(header.len())
    };
    let chord_w = width(|r| r.chord.len(), "CHORD");
    let code_w = width(|r| r.code.len(), "CODE");
    let action_w = width(|r| r.action.len(), "ACTION");

    let mut out = format!(
        "Variant: {} (window {}ms)\n{:<chord_w$}  {:<code_w$}  {:<action_w$}  DESCRIPTION\n",
        config.variant.as_str(),
        config.detector.window.as_millis(),
        "CHORD",
        "CODE",
        "ACTION",
    );
    for row in &rows {
        out.push_str(&format!(
            "{:<chord_w$}  {:<code_w$}  {:<action_w$}  {}\n",
            row.chord, row.code, row.action, row.description
        ));
    }
    out
}

pub fn run(config: &Config, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&rows(config))?);
    } else {
        print!("{}", format_table(config));
    }
    Ok(())
}
