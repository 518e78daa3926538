//! The `gradecalc init` command.

use std::path::Path;

use anyhow::Result;

pub fn execute() -> Result<()> {
    if Path::new("gradecalc.toml").exists() {
        println!("gradecalc.toml already exists, skipping.");
    } else {
        std::fs::write("gradecalc.toml", SAMPLE_CONFIG)?;
        println!("Created gradecalc.toml");
    }

    std::fs::create_dir_all("transcripts")?;
    let example_path = Path::new("transcripts/example.toml");
    if example_path.exists() {
        println!("transcripts/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_TRANSCRIPT)?;
        println!("Created transcripts/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Replace the example courses with your own marks");
    println!("  2. Run: gradecalc validate --transcript transcripts/example.toml");
    println!("  3. Run: gradecalc dashboard --transcript transcripts/example.toml");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# gradecalc configuration

# Scheme used by `gradecalc resolve` when --total is omitted
default_total_marks = 60

# Decimals shown for GPA and CGPA
precision = 2

# text, json or markdown
default_format = "text"

# Where `gradecalc dashboard --save` writes reports
output_dir = "./gradecalc-reports"

# Refuse to aggregate a transcript that fails validation
strict = true
"#;

const EXAMPLE_TRANSCRIPT: &str = r#"[transcript]
name = "Example Degree"

[[semesters]]
name = "Fall 2023"

[[semesters.courses]]
name = "Calculus I"
credit_hours = 3
total_marks = 60
obtained_marks = 48

[[semesters.courses]]
name = "Programming Fundamentals"
credit_hours = 4
total_marks = 80
obtained_marks = 61

[[semesters.courses]]
name = "Islamic Studies"
credit_hours = 2
total_marks = 40
obtained_marks = 30
audit = true

[[semesters]]
name = "Spring 2024"

[[semesters.courses]]
name = "Data Structures"
credit_hours = 4
total_marks = 80
obtained_marks = 55

[[semesters.courses]]
name = "Linear Algebra"
credit_hours = 3
total_marks = 60
obtained_marks = 40
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use gradecalc_cli::transcript::parse_transcript_str;

    #[test]
    fn example_transcript_is_valid() {
        let transcript =
            parse_transcript_str(EXAMPLE_TRANSCRIPT, Path::new("example.toml")).unwrap();
        assert_eq!(transcript.semesters.len(), 2);
        assert_eq!(transcript.course_count(), 5);
        assert!(transcript.validate().is_empty());
    }

    #[test]
    fn sample_config_parses() {
        let config: gradecalc_cli::config::GradecalcConfig = toml::from_str(SAMPLE_CONFIG).unwrap();
        assert_eq!(config.default_total_marks, 60);
        assert!(config.strict);
    }
}
