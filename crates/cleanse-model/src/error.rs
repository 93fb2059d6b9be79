use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("column '{column}' has {actual} cells, expected {expected}")]
    RaggedColumn {
        column: String,
        expected: usize,
        actual: usize,
    },
    #[error("duplicate column name '{0}'")]
    DuplicateColumn(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
