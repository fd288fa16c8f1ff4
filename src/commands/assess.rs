use crate::formatting::FormattingConfig;
use crate::io::output::{create_writer, AssessmentReport, OutputFormat};
use crate::io::read_cases;
use crate::risk::{assess_cases, rank_by_risk, AlertLevel};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AssessConfig {
    pub path: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub min_level: AlertLevel,
    pub top: Option<usize>,
    pub formatting: FormattingConfig,
}

pub fn build_report(config: &AssessConfig) -> Result<AssessmentReport> {
    let cases = read_cases(&config.path)?;
    log::info!("Scoring {} cases from {}", cases.len(), config.path.display());

    let ranked = rank_by_risk(assess_cases(&cases));
    Ok(AssessmentReport::new(ranked, config.min_level, config.top)
        .with_source(config.path.display().to_string()))
}

pub fn handle_assess(config: AssessConfig) -> Result<()> {
    let report = build_report(&config)?;

    match &config.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            // Files never get ANSI escapes
            let mut writer =
                create_writer(config.format, BufWriter::new(file), FormattingConfig::plain());
            writer.write_report(&report)?;
            writer
                .flush()
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            log::info!("Report written to {}", path.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut writer = create_writer(config.format, stdout.lock(), config.formatting);
            writer.write_report(&report)?;
            writer.flush()?;
        }
    }

    Ok(())
}
