use reglean_config::Config;
use std::path::PathBuf;
use tracing::info;

/// Strategy for compiling every pattern in a config file.
///
/// Fails with the first invalid search or substitution pattern, or the
/// first translation entry missing a required field.
#[derive(Debug, Clone, Copy)]
pub struct CheckStrategy;

impl super::CommandStrategy for CheckStrategy {
    type Input = Option<PathBuf>;

    fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default(input.as_deref())?;
        let gleaner = config.build_gleaner()?;

        info!("All patterns compiled");
        println!("OK: {} categories", gleaner.len());
        Ok(())
    }
}
