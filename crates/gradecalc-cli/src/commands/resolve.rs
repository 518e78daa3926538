//! The `gradecalc resolve` command.

use anyhow::Result;

use gradecalc_cli::config::{GradecalcConfig, OutputFormat};
use gradecalc_cli::report::display_decimal;
use gradecalc_core::{resolve_quality_point, TotalMarksScheme};

pub fn execute(
    marks: f64,
    total: Option<u32>,
    format: Option<OutputFormat>,
    config: &GradecalcConfig,
) -> Result<()> {
    let scheme = match total {
        Some(t) => TotalMarksScheme::try_from(t)?,
        None => config.default_scheme()?,
    };
    let resolution = resolve_quality_point(marks, scheme);

    match format.unwrap_or(config.default_format) {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&resolution)?);
        }
        OutputFormat::Markdown => {
            println!("| Marks | Percentage | Grade | Quality Points |");
            println!("|-------|------------|-------|----------------|");
            println!(
                "| {}/{scheme} | {}% | {} | {} |",
                resolution.mark,
                display_decimal(resolution.percentage, 2),
                resolution.grade,
                display_decimal(resolution.quality_point, 2)
            );
        }
        OutputFormat::Text => {
            println!(
                "{}/{scheme} ({}%): grade {}, quality points {}",
                resolution.mark,
                display_decimal(resolution.percentage, 2),
                resolution.grade,
                display_decimal(resolution.quality_point, 2)
            );
        }
    }

    Ok(())
}
