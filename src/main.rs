#![forbid(unsafe_code)]

mod config;
mod report;

use anyhow::{Context, Result};
use config::{Config, Mode};
use graphgate_federation::{
    add_federation_references_to_schema,
    extend_with_federation_spec,
    remove_federation,
    ApolloFederation,
};
use graphgate_schema::{print_schema, Schema};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

fn load_schema(config: &Config) -> Result<Schema> {
    let sdl = std::fs::read_to_string(&config.schema)
        .with_context(|| format!("Failed to read schema file '{}'.", config.schema.display()))?;
    let schema = Schema::parse(&sdl)
        .with_context(|| format!("Failed to parse schema file '{}'.", config.schema.display()))?;
    tracing::info!(
        schema = %config.schema.display(),
        types = schema.types.len(),
        federation = config.federation,
        "Schema loaded."
    );
    Ok(schema)
}

fn generate(config: &Config, schema: Schema) -> Result<String> {
    match config.mode {
        Mode::Schema => {
            let schema = if config.federation {
                remove_federation(&schema)
            } else {
                schema
            };
            Ok(print_schema(&schema, &config.print_options()))
        },
        Mode::References => {
            let schema = if config.federation {
                add_federation_references_to_schema(&extend_with_federation_spec(&schema))
            } else {
                schema
            };
            let federation = ApolloFederation::new(config.federation, &schema)
                .context("Failed to read the @provides directives.")?;
            report::render(&federation, &config.parent_type_signature)
                .context("Failed to resolve the reference types.")
        },
    }
}

fn main() -> Result<()> {
    init_tracing();
    let config = Config::try_parse()?;

    let schema = load_schema(&config)?;
    let output = generate(&config, schema)?;

    match &config.output {
        Some(path) => {
            std::fs::write(path, output)
                .with_context(|| format!("Failed to write output file '{}'.", path.display()))?;
            tracing::info!(output = %path.display(), mode = ?config.mode, "Output written.");
        },
        None => print!("{}", output),
    }

    Ok(())
}
