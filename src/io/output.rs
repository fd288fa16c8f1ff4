use crate::formatting::{formatter_for, FormattingConfig, OutputFormatter};
use crate::risk::{AlertDistribution, AlertLevel, CaseAssessment, RiskAssessment};
use comfy_table::{presets, Table};
use serde::Serialize;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}

impl OutputFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "terminal" => Some(Self::Terminal),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

/// Scored cases ready for output: ranked, filtered and summarized.
#[derive(Debug, Clone, Serialize)]
pub struct AssessmentReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub distribution: AlertDistribution,
    /// Cases hidden by the level filter or the listing cap
    pub omitted: usize,
    pub cases: Vec<CaseAssessment>,
}

impl AssessmentReport {
    /// `ranked` should already be ordered; the distribution covers every case.
    pub fn new(ranked: Vec<CaseAssessment>, min_level: AlertLevel, top: Option<usize>) -> Self {
        let distribution = AlertDistribution::from_assessments(&ranked);
        let total = ranked.len();
        let cases: Vec<CaseAssessment> = ranked
            .into_iter()
            .filter(|case| case.meets(min_level))
            .take(top.unwrap_or(usize::MAX))
            .collect();

        Self {
            source: None,
            distribution,
            omitted: total - cases.len(),
            cases,
        }
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }
}

pub trait OutputWriter {
    fn write_report(&mut self, report: &AssessmentReport) -> anyhow::Result<()>;
    fn write_assessment(&mut self, assessment: &RiskAssessment) -> anyhow::Result<()>;
    /// Push buffered output to the destination, surfacing any write error
    fn flush(&mut self) -> anyhow::Result<()>;
}

pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_report(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(report)?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }

    fn write_assessment(&mut self, assessment: &RiskAssessment) -> anyhow::Result<()> {
        #[derive(Serialize)]
        struct WithPresentation<'a> {
            #[serde(flatten)]
            assessment: &'a RiskAssessment,
            presentation: crate::risk::Presentation,
        }

        let json = serde_json::to_string_pretty(&WithPresentation {
            assessment,
            presentation: assessment.presentation(),
        })?;
        writeln!(self.writer, "{json}")?;
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

pub struct TerminalWriter<W: Write> {
    writer: W,
    formatter: Box<dyn OutputFormatter>,
    unicode: bool,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, formatting: FormattingConfig) -> Self {
        Self {
            writer,
            formatter: formatter_for(formatting),
            unicode: formatting.emoji.should_use_emoji(),
        }
    }

    fn level_cell(&self, case: &CaseAssessment) -> String {
        let icon = self.formatter.icon(case.presentation.icon_key);
        let label = case
            .alert_level()
            .map(AlertLevel::label)
            .unwrap_or("No data");
        format!("{icon} {label}")
    }

    fn cases_table(&self, cases: &[CaseAssessment]) -> Table {
        let mut table = Table::new();
        table
            .load_preset(if self.unicode {
                presets::UTF8_FULL_CONDENSED
            } else {
                presets::ASCII_FULL_CONDENSED
            })
            .set_header(vec!["#", "Case", "Student", "Score", "Level", "Follow-ups"]);

        for (rank, case) in cases.iter().enumerate() {
            let (score, follow_ups) = match &case.assessment {
                Some(a) => (format!("{:.2}", a.normalized_score), a.valid_outcomes.to_string()),
                None => ("-".to_string(), "-".to_string()),
            };
            table.add_row(vec![
                (rank + 1).to_string(),
                case.case_id
                    .clone()
                    .unwrap_or_else(|| format!("#{}", case.index)),
                case.student.clone().unwrap_or_default(),
                score,
                self.level_cell(case),
                follow_ups,
            ]);
        }
        table
    }

    fn write_distribution(&mut self, dist: &AlertDistribution) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", self.formatter.header("ALERT DISTRIBUTION"))?;
        for level in AlertLevel::ALL.into_iter().rev() {
            let presentation = level.presentation();
            writeln!(
                self.writer,
                "  {} {:<10} {}",
                self.formatter.icon(presentation.icon_key),
                self.formatter.badge(presentation, level.label()),
                dist.count(level)
            )?;
        }
        if dist.unscored > 0 {
            writeln!(
                self.writer,
                "  {} {:<10} {}",
                self.formatter.icon(crate::risk::IconKey::Info),
                "No data",
                dist.unscored
            )?;
        }
        writeln!(
            self.writer,
            "  {}",
            self.formatter.dim(&format!(
                "{} of {} cases at high or critical risk",
                dist.at_risk(),
                dist.total
            ))
        )?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &AssessmentReport) -> anyhow::Result<()> {
        let title = match &report.source {
            Some(source) => format!("RISK ASSESSMENT: {source}"),
            None => "RISK ASSESSMENT".to_string(),
        };
        writeln!(self.writer, "{}", self.formatter.header(&title))?;
        writeln!(self.writer)?;

        if report.cases.is_empty() {
            writeln!(self.writer, "No cases to show.")?;
        } else {
            let table = self.cases_table(&report.cases);
            writeln!(self.writer, "{table}")?;
        }
        if report.omitted > 0 {
            writeln!(
                self.writer,
                "{}",
                self.formatter
                    .dim(&format!("{} more cases hidden by filters", report.omitted))
            )?;
        }
        writeln!(self.writer)?;
        self.write_distribution(&report.distribution)
    }

    fn write_assessment(&mut self, assessment: &RiskAssessment) -> anyhow::Result<()> {
        let presentation = assessment.presentation();
        writeln!(
            self.writer,
            "{} {}",
            self.formatter.icon(presentation.icon_key),
            self.formatter
                .badge(presentation, &self.formatter.bold(assessment.alert_level.label()))
        )?;
        writeln!(self.writer, "  Normalized score: {:.2}", assessment.normalized_score)?;
        writeln!(self.writer, "  Raw score:        {}", assessment.raw_score)?;
        writeln!(self.writer, "  Follow-ups used:  {}", assessment.valid_outcomes)?;
        Ok(())
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

pub fn create_writer<'a, W: Write + 'a>(
    format: OutputFormat,
    writer: W,
    formatting: FormattingConfig,
) -> Box<dyn OutputWriter + 'a> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(writer)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(writer, formatting)),
    }
}
