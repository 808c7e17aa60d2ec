use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Missing required column: {column}")]
    MissingColumn { column: String },

    #[error("Sheet has no header row")]
    EmptySheet,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Config(#[from] serde_yaml::Error),
}

impl PlannerError {
    /// Data-shape problems mean the sheet layout changed; nothing downstream can be trusted.
    pub fn is_data_shape(&self) -> bool {
        matches!(self, PlannerError::MissingColumn { .. } | PlannerError::EmptySheet)
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
