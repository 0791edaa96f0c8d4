use reglean_config::Config;
use reglean_core::Gleaner;
use std::path::PathBuf;

/// Strategy for displaying the configured categories.
///
/// Lists each category with its pattern, cast and translation counts,
/// followed by the output settings.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = Option<PathBuf>;

    fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default(input.as_deref())?;
        let gleaner = Gleaner::from_config(&config.gleaner)?;

        println!("=== reglean Configuration ===\n");

        println!("Categories:");
        if gleaner.is_empty() {
            println!("  (none)");
        }
        for line in describe(&gleaner) {
            println!("  {line}");
        }
        println!();

        let fill = config
            .gleaner
            .fill
            .map_or_else(|| "null".to_string(), |v| v.to_string());
        println!("Fill: {fill}");
        println!();

        println!("Output:");
        println!("  Pretty: {}", config.output.pretty);
        println!("  Include Input: {}", config.output.include_input);

        Ok(())
    }
}

fn describe(gleaner: &Gleaner) -> Vec<String> {
    gleaner
        .categories()
        .map(|(name, category)| {
            let cast = category
                .cast()
                .map_or_else(String::new, |c| format!(" as {}", c.name()));
            let translations = gleaner
                .translations(name)
                .map_or_else(|| "no translations".to_string(), reglean_core::TranslationTable::summary);
            format!("{name}: {}{cast} ({translations})", category.pattern())
        })
        .collect()
}
