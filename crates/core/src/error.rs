#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unknown filter: {0} (expected `fruits` or `vegetables`)")]
    InvalidFilter(String),
}
