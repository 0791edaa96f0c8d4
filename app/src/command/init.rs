use reglean_config::Config;

/// Strategy for initializing the configuration.
///
/// Writes the example configuration to `~/reglean/config.json`, or to the
/// given path, and never overwrites an existing file.
#[derive(Debug, Clone, Copy)]
pub struct InitStrategy;

impl super::CommandStrategy for InitStrategy {
    type Input = Option<std::path::PathBuf>;

    fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        match input {
            Some(path) => {
                Config::create_config_at(&path)?;
                println!("Created config file at: {}", path.display());
                Ok(())
            }
            None => Config::create_config(),
        }
    }
}
