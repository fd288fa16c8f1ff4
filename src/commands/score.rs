use crate::formatting::FormattingConfig;
use crate::io::output::{create_writer, OutputFormat};
use crate::risk::compute_risk_assessment_from_labels;
use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct ScoreConfig {
    pub outcomes: Vec<String>,
    pub priority: String,
    pub status: String,
    pub format: OutputFormat,
    pub formatting: FormattingConfig,
}

pub fn handle_score(config: ScoreConfig) -> Result<()> {
    let assessment =
        compute_risk_assessment_from_labels(&config.outcomes, &config.priority, &config.status)
            .context("Cannot score follow-up outcomes")?;

    log::debug!(
        "Scored {} of {} outcomes: raw {}, normalized {}",
        assessment.valid_outcomes,
        config.outcomes.len(),
        assessment.raw_score,
        assessment.normalized_score
    );

    let stdout = std::io::stdout();
    let mut writer = create_writer(config.format, stdout.lock(), config.formatting);
    writer.write_assessment(&assessment)?;
    writer.flush()
}
