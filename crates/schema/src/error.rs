use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Failed to parse the schema document: {0}")]
    Parse(#[from] parser::Error),
}
