use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("tracker returned status {0}")]
    Unavailable(reqwest::StatusCode),

    #[error("tracker returned failure: {0}")]
    Failure(String),

    #[error("bencode error: {0}")]
    Bencode(#[from] crate::bencode::BencodeError),

    #[error("invalid response: {0}")]
    InvalidResponse(&'static str),

    #[error("invalid announce url: {0}")]
    InvalidUrl(String),
}
