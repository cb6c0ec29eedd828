use thiserror::Error;

pub type StepperResult<T> = Result<T, StepperError>;

#[derive(Debug, Error)]
pub enum StepperError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config parse error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("encode trace: {0}")]
    Encode(String),

    #[error("decode trace: {0}")]
    Decode(String),

    #[error("unknown topic '{0}' (run `algo_stepper topics` for the list)")]
    UnknownTopic(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("visualizer: {0}")]
    Visualizer(String),

    #[error("run task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl From<bincode::Error> for StepperError {
    fn from(err: bincode::Error) -> Self {
        StepperError::Decode(err.to_string())
    }
}

impl From<serde_json::Error> for StepperError {
    fn from(err: serde_json::Error) -> Self {
        StepperError::Encode(err.to_string())
    }
}
