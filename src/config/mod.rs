//! `.derivapp.toml` configuration.
//!
//! The file is optional. It is searched for in the working directory and its
//! ancestors; a missing or invalid file means built-in defaults.

mod core;
mod loader;

pub use self::core::{DerivappConfig, DisplayConfig, FilterConfig, OutputConfig};
pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};

/// Template written by `derivapp init`
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# DerivApp configuration

[output]
default_format = "terminal"

[display]
color = "auto"

[filter]
min_level = "none_low"
# top = 20
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template_is_valid() {
        let config = parse_and_validate_config(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.top(), None);
    }
}
