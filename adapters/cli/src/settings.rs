//! Loading of the optional TOML configuration file.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use snake_core::GameConfig;

/// Reads the configuration file, or returns defaults when no path is given.
pub(crate) fn load(path: Option<&Path>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    parse(&contents).with_context(|| format!("invalid config file {}", path.display()))
}

/// Parses configuration TOML. Missing keys keep their defaults.
pub(crate) fn parse(contents: &str) -> Result<GameConfig> {
    toml::from_str(contents).context("failed to parse config toml contents")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_path_yields_defaults() {
        let config = load(None).expect("defaults");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let config = parse(
            r#"
                canvas_width = 600
                cell_size = 30
                seed = 42
            "#,
        )
        .expect("valid toml");

        assert_eq!(config.canvas_width, 600);
        assert_eq!(config.cell_size, 30);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.canvas_height, 400);
        assert_eq!(config.initial_interval_ms, 150);
    }

    #[test]
    fn wrong_types_are_reported() {
        let error = parse("cell_size = \"big\"").expect_err("string is not a cell size");
        assert!(format!("{error:#}").contains("failed to parse config toml"));
    }

    #[test]
    fn unreadable_file_names_the_path() {
        let error = load(Some(Path::new("/definitely/not/here/snake.toml")))
            .expect_err("file does not exist");
        assert!(format!("{error:#}").contains("/definitely/not/here/snake.toml"));
    }
}
