use reglean_core::{Gleaned, Value};
use serde::Serialize;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info};

/// Input parameters for the Glean command strategy.
#[derive(Debug, Clone, Default)]
pub struct GleanInput {
    /// Names to glean; stdin lines are used when empty
    pub names: Vec<String>,
    /// Explicit config file
    pub config: Option<PathBuf>,
    /// Ad-hoc `(name, pattern)` categories
    pub categories: Vec<(String, String)>,
    /// Fill value overriding the configured one
    pub fill: Option<String>,
    /// Pretty-print output
    pub pretty: bool,
}

/// Strategy for gleaning names and printing one JSON object per name.
#[derive(Debug, Clone, Copy)]
pub struct GleanStrategy;

impl super::CommandStrategy for GleanStrategy {
    type Input = GleanInput;

    fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let (config, gleaner) = super::build_gleaner(input.config.as_deref(), &input.categories)?;
        let fill = input.fill.map(Value::from).or(config.gleaner.fill);
        let pretty = input.pretty || config.output.pretty;
        let include_input = config.output.include_input;

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        let mut count = 0_usize;

        let mut emit = |name: &str| -> anyhow::Result<()> {
            let gleaned = gleaner.glean_with(name, fill.clone())?;
            debug!("Gleaned {} fields from {name}", gleaned.len());
            writeln!(out, "{}", render(name, &gleaned, include_input, pretty)?)?;
            count += 1;
            Ok(())
        };

        if input.names.is_empty() {
            for line in std::io::stdin().lock().lines() {
                let line = line?;
                let name = line.trim();
                if !name.is_empty() {
                    emit(name)?;
                }
            }
        } else {
            for name in &input.names {
                emit(name)?;
            }
        }

        info!("Gleaned {count} names");
        Ok(())
    }
}

#[derive(Serialize)]
struct Row<'a> {
    input: &'a str,
    fields: &'a Gleaned,
}

fn render(
    name: &str,
    gleaned: &Gleaned,
    include_input: bool,
    pretty: bool,
) -> serde_json::Result<String> {
    match (include_input, pretty) {
        (true, true) => serde_json::to_string_pretty(&Row {
            input: name,
            fields: gleaned,
        }),
        (true, false) => serde_json::to_string(&Row {
            input: name,
            fields: gleaned,
        }),
        (false, true) => serde_json::to_string_pretty(gleaned),
        (false, false) => serde_json::to_string(gleaned),
    }
}
