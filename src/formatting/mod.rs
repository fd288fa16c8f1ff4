use crate::risk::{BadgeColor, IconKey, Presentation};
use colored::*;
use std::env;
use std::io::IsTerminal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Auto,   // Detect based on terminal
    Always, // Force colors on
    Never,  // Force colors off
}

impl ColorMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "auto" => Some(Self::Auto),
            "always" => Some(Self::Always),
            "never" => Some(Self::Never),
            _ => None,
        }
    }

    pub fn should_use_color(&self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmojiMode {
    Auto,  // Use emoji if terminal supports Unicode
    Never, // Plain ASCII icons
}

impl EmojiMode {
    pub fn should_use_emoji(&self) -> bool {
        match self {
            Self::Never => false,
            Self::Auto => detect_color_support(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingConfig {
    pub color: ColorMode,
    pub emoji: EmojiMode,
}

impl Default for FormattingConfig {
    fn default() -> Self {
        Self {
            color: ColorMode::Auto,
            emoji: EmojiMode::Auto,
        }
    }
}

impl FormattingConfig {
    /// Start from `color` and let the conventional environment variables override it.
    pub fn from_env(color: ColorMode) -> Self {
        let mut config = Self {
            color,
            ..Self::default()
        };

        // Check NO_COLOR environment variable (per no-color.org standard)
        if env::var("NO_COLOR").is_ok() {
            config.color = ColorMode::Never;
        }

        if let Ok(val) = env::var("CLICOLOR") {
            if val == "0" {
                config.color = ColorMode::Never;
            }
        }

        if let Ok(val) = env::var("CLICOLOR_FORCE") {
            if val == "1" {
                config.color = ColorMode::Always;
            }
        }

        config
    }

    /// ASCII-only, no colors, no emoji
    pub fn plain() -> Self {
        Self {
            color: ColorMode::Never,
            emoji: EmojiMode::Never,
        }
    }
}

pub trait OutputFormatter {
    fn header(&self, text: &str) -> String;
    fn bold(&self, text: &str) -> String;
    fn dim(&self, text: &str) -> String;
    /// Paint `text` in the badge color of an alert level
    fn badge(&self, presentation: Presentation, text: &str) -> String;
    fn icon(&self, icon: IconKey) -> String;
}

/// Build the formatter matching a configuration
pub fn formatter_for(config: FormattingConfig) -> Box<dyn OutputFormatter> {
    if config.color.should_use_color() || config.emoji.should_use_emoji() {
        Box::new(ColoredFormatter::new(config))
    } else {
        Box::new(PlainFormatter)
    }
}

pub struct ColoredFormatter {
    use_color: bool,
    use_emoji: bool,
}

impl ColoredFormatter {
    pub fn new(config: FormattingConfig) -> Self {
        let use_color = config.color.should_use_color();
        colored::control::set_override(use_color);

        Self {
            use_color,
            use_emoji: config.emoji.should_use_emoji(),
        }
    }
}

impl OutputFormatter for ColoredFormatter {
    fn header(&self, text: &str) -> String {
        if self.use_color {
            text.blue().bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn bold(&self, text: &str) -> String {
        if self.use_color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.use_color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        }
    }

    fn badge(&self, presentation: Presentation, text: &str) -> String {
        if !self.use_color {
            return text.to_string();
        }
        match presentation.color {
            BadgeColor::Green => text.green().to_string(),
            BadgeColor::Gold => text.yellow().to_string(),
            BadgeColor::Orange => text.truecolor(255, 140, 0).to_string(),
            BadgeColor::Red => text.red().bold().to_string(),
            BadgeColor::NeutralGray => text.bright_black().to_string(),
        }
    }

    fn icon(&self, icon: IconKey) -> String {
        let (emoji, fallback) = icon_glyphs(icon);
        if self.use_emoji {
            emoji.to_string()
        } else {
            fallback.to_string()
        }
    }
}

pub struct PlainFormatter;

impl OutputFormatter for PlainFormatter {
    fn header(&self, text: &str) -> String {
        text.to_string()
    }

    fn bold(&self, text: &str) -> String {
        text.to_string()
    }

    fn dim(&self, text: &str) -> String {
        text.to_string()
    }

    fn badge(&self, _presentation: Presentation, text: &str) -> String {
        text.to_string()
    }

    fn icon(&self, icon: IconKey) -> String {
        icon_glyphs(icon).1.to_string()
    }
}

fn detect_color_support() -> bool {
    if let Ok(term) = env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    std::io::stdout().is_terminal()
}

/// Emoji and ASCII fallback for each icon key
pub fn icon_glyphs(icon: IconKey) -> (&'static str, &'static str) {
    match icon {
        IconKey::CheckCircle => ("✓", "[OK]"),
        IconKey::ExclamationCircle => ("❗", "[!]"),
        IconKey::Warning => ("⚠", "[WARN]"),
        IconKey::Fire => ("🔥", "[CRIT]"),
        IconKey::Info => ("ℹ", "[INFO]"),
    }
}
