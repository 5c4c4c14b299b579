use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use graphgate_schema::PrintOptions;
use serde::Deserialize;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Print the schema as SDL
    #[default]
    Schema,
    /// Report the resolvers a generator would emit
    References,
}

#[derive(Debug, Default, Deserialize, Parser)]
#[clap(name = "graphgate-codegen", version, about)]
pub struct Config {
    /// Path of the config file
    #[clap(long, env = "CONFIG_FILE", default_value = "codegen.toml")]
    #[serde(skip)]
    pub file: PathBuf,

    /// Path of the SDL schema
    #[clap(long, env, default_value = "schema.graphql")]
    #[serde(default = "default_schema")]
    pub schema: PathBuf,

    #[clap(long, env, value_enum, default_value_t = Mode::Schema)]
    #[serde(default)]
    pub mode: Mode,

    /// Treat the schema as an Apollo Federation subgraph
    #[clap(long, env)]
    #[serde(default)]
    pub federation: bool,

    #[clap(long, env)]
    #[serde(default)]
    pub include_directives: bool,

    #[clap(long, env)]
    #[serde(default)]
    pub comment_descriptions: bool,

    #[clap(long, env, default_value = "ParentType")]
    #[serde(default = "default_parent_type_signature")]
    pub parent_type_signature: String,

    /// Write the output to this file instead of stdout
    #[clap(long, env)]
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl Config {
    /// Parse the config file and environment variables.
    /// If the config file exists, it will be parsed first and ignore
    /// environment variables.
    pub fn try_parse() -> anyhow::Result<Self> {
        Self::load(Config::parse())
    }

    fn load(env_config: Config) -> anyhow::Result<Self> {
        if !Path::exists(&env_config.file) {
            return Ok(env_config);
        }

        let file_config = std::fs::read_to_string(&env_config.file)
            .with_context(|| format!("Failed to read config file '{}'.", &env_config.file.display()))?;
        let mut file_config: Config = toml::from_str(&file_config)
            .with_context(|| format!("Failed to parse config file '{}'.", &env_config.file.display()))?;
        tracing::debug!(file = %env_config.file.display(), "Config file loaded.");

        file_config.file = env_config.file;
        Ok(file_config)
    }

    pub fn print_options(&self) -> PrintOptions {
        PrintOptions {
            include_directives: self.include_directives,
            comment_descriptions: self.comment_descriptions,
        }
    }
}

fn default_schema() -> PathBuf {
    PathBuf::from("schema.graphql")
}

fn default_parent_type_signature() -> String {
    "ParentType".to_string()
}
