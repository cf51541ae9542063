use diesel::result::Error as DieselError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("authentication error: {0}")]
    Auth(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("upstream AI provider error: {0}")]
    Upstream(String),
    #[error("configuration error: {0}")]
    Config(String),
    #[error("Diesel error: {0}")]
    DieselError(#[from] DieselError),
    #[error("Serde error: {0}")]
    SerdeError(#[from] serde_json::Error),
}
