use thiserror::Error;

#[derive(Error, Debug)]
pub enum MoulinError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Degenerate corridor at step {step}: width {width} <= 2 x margin {margin}")]
    DegenerateCorridor {
        step: usize,
        width: f64,
        margin: f64,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type MoulinResult<T> = Result<T, MoulinError>;
