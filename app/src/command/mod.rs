//! Static strategy pattern for CLI commands.
//!
//! Each subcommand is its own strategy type with its own input type, so
//! dispatch in `main` is a plain match with no trait objects.

use reglean_config::Config;
use reglean_core::Gleaner;
use std::path::Path;
use tracing::info;

mod check;
mod glean;
mod info;
mod init;
mod version;

pub use check::CheckStrategy;
pub use glean::{GleanInput, GleanStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
///
/// # Example
/// ```rust,ignore
/// struct MyStrategy;
///
/// impl CommandStrategy for MyStrategy {
///     type Input = MyInput;
///
///     fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
///         Ok(())
///     }
/// }
/// ```
pub trait CommandStrategy {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

/// Parse a `name=pattern` category argument.
pub fn parse_category(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((name, pattern)) if !name.is_empty() => Ok((name.to_string(), pattern.to_string())),
        _ => Err(format!("expected NAME=PATTERN, got `{arg}`")),
    }
}

/// Load the config (unless only ad-hoc categories were given) and build
/// a validated gleaner with `extra` categories layered on top.
fn build_gleaner(
    config_path: Option<&Path>,
    extra: &[(String, String)],
) -> anyhow::Result<(Config, Gleaner)> {
    let config = if config_path.is_none() && !extra.is_empty() {
        Config::default()
    } else {
        let config = Config::load_or_default(config_path)?;
        info!(
            "Loaded config with {} categories",
            config.gleaner.categories.len()
        );
        config
    };

    let mut gleaner = config.build_gleaner()?;
    for (name, pattern) in extra {
        gleaner.add_category(name.as_str(), pattern.as_str());
    }
    gleaner.validate()?;

    Ok((config, gleaner))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_pattern() {
        assert_eq!(
            parse_category(r"current=(\d+)uA").unwrap(),
            ("current".to_string(), r"(\d+)uA".to_string())
        );
        // only the first '=' separates
        assert_eq!(parse_category("eq=(a=b)").unwrap().1, "(a=b)");
    }

    #[test]
    fn rejects_missing_name() {
        assert!(parse_category("=(x)").is_err());
        assert!(parse_category("no_separator").is_err());
    }

    #[test]
    fn adhoc_categories_skip_config_file() {
        let (config, gleaner) =
            build_gleaner(None, &[("pol".to_string(), "pol(up|down)".to_string())]).unwrap();
        assert!(config.gleaner.categories.is_empty());
        assert!(gleaner.gleanable("x_poldown").unwrap());
    }

    #[test]
    fn invalid_adhoc_pattern_fails_early() {
        assert!(build_gleaner(None, &[("bad".to_string(), "(".to_string())]).is_err());
    }
}
