#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("Invalid search parameters: {0}")]
    InvalidParams(String),

    #[error("Failed to read parameters from {0}")]
    ReadFailed(String),
}
