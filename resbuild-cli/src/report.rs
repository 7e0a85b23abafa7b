use std::fmt::Write as _;

use resbuild::{BuildSummary, CultureOutcome};

/// Output format of the build summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    Text,
    Json,
}

/// Renders the summary as human-readable lines.
pub fn render_text(summary: &BuildSummary) -> String {
    let mut out = String::new();
    match &summary.default_library {
        Some(library) => {
            let _ = writeln!(out, "✅ Default resources: {}", library.display());
        }
        None => {
            let _ = writeln!(out, "⚠️  No default resource sources found");
        }
    }

    for report in &summary.cultures {
        let line = match &report.outcome {
            CultureOutcome::Built {
                culture,
                libraries,
                failures,
            } => {
                let names: Vec<String> = libraries.iter().map(|l| l.display().to_string()).collect();
                let mut line = format!("✅ Culture \"{}\": {}", culture, names.join(", "));
                for failure in failures {
                    let _ = write!(
                        line,
                        "\n❌ {} failed: {}",
                        failure.directory.display(),
                        failure.error
                    );
                }
                line
            }
            CultureOutcome::Empty { culture } => {
                format!("⚠️  Culture \"{}\" had no resources!", culture)
            }
            CultureOutcome::InvalidName { reason } => format!("❌ Error: {}", reason),
            CultureOutcome::Failed { culture, error } => {
                format!("❌ Culture \"{}\" failed: {}", culture, error)
            }
        };
        let _ = writeln!(out, "{}", line);
    }

    out.push_str("\nFinished.\n");
    out
}

/// Renders the summary as pretty JSON.
pub fn render_json(summary: &BuildSummary) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(summary)
}
