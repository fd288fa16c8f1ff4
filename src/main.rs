use anyhow::Result;
use clap::Parser;
use derivapp::cli::{Cli, Commands};
use derivapp::commands::{AssessConfig, ScoreConfig};
use derivapp::config::{load_config, DerivappConfig};
use derivapp::formatting::FormattingConfig;
use derivapp::AlertLevel;
use log::LevelFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config();
    let formatting = create_formatting_config(cli.plain, &config);

    match cli.command {
        Commands::Score {
            outcomes,
            priority,
            status,
            format,
        } => derivapp::commands::handle_score(ScoreConfig {
            outcomes,
            priority,
            status,
            format: format.unwrap_or_else(|| config.default_format()),
            formatting,
        }),
        Commands::Assess {
            path,
            format,
            output,
            min_level,
            top,
        } => {
            let min_level = resolve_min_level(min_level, &config)?;
            derivapp::commands::handle_assess(AssessConfig {
                path,
                format: format.unwrap_or_else(|| config.default_format()),
                output,
                min_level,
                top: top.or_else(|| config.top()),
                formatting,
            })
        }
        Commands::Init { force } => derivapp::commands::init_config(force),
    }
}

fn init_logging(verbose: u8) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder.format_timestamp(None).init();
}

// CLI flag wins over the config file
fn resolve_min_level(flag: Option<String>, config: &DerivappConfig) -> Result<AlertLevel> {
    match flag {
        Some(level) => level.parse::<AlertLevel>().map_err(anyhow::Error::msg),
        None => Ok(config.min_level()),
    }
}

fn create_formatting_config(plain: bool, config: &DerivappConfig) -> FormattingConfig {
    if plain {
        FormattingConfig::plain()
    } else {
        FormattingConfig::from_env(config.color_mode())
    }
}
