//! The `gradecalc table` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use gradecalc_cli::config::{GradecalcConfig, OutputFormat};
use gradecalc_cli::report::display_decimal;
use gradecalc_core::{get_table, Grade};

pub fn execute(
    total: u32,
    passing_only: bool,
    format: Option<OutputFormat>,
    config: &GradecalcConfig,
) -> Result<()> {
    let table = get_table(total)?;
    let rows: Vec<_> = table
        .iter()
        .filter(|(_, entry)| !passing_only || entry.grade != Grade::F)
        .collect();

    match format.unwrap_or(config.default_format) {
        OutputFormat::Json => {
            let json: Vec<_> = rows
                .iter()
                .map(|(mark, entry)| {
                    serde_json::json!({
                        "mark": mark,
                        "grade": entry.grade,
                        "quality_point": entry.quality_point,
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Markdown => {
            println!("| Marks | Grade | Quality Points |");
            println!("|-------|-------|----------------|");
            for (mark, entry) in &rows {
                println!(
                    "| {mark} | {} | {} |",
                    entry.grade,
                    display_decimal(entry.quality_point, 2)
                );
            }
        }
        OutputFormat::Text => {
            let mut out = Table::new();
            out.set_header(vec!["Marks", "Grade", "Quality Points"]);
            for (mark, entry) in &rows {
                out.add_row(vec![
                    Cell::new(mark),
                    Cell::new(entry.grade),
                    Cell::new(display_decimal(entry.quality_point, 2)),
                ]);
            }
            println!("Quality points out of {total}\n");
            println!("{out}");
            match table.passing_mark() {
                Some(mark) => println!("\nPassing mark: {mark}/{total}"),
                None => println!("\nNo passing mark in this table."),
            }
            println!("Full credit from: {}/{total}", table.full_credit_mark());
        }
    }

    Ok(())
}
