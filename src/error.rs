use std::path::PathBuf;

/// Everything that can go wrong between fetching a points table and putting it on a page.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} answered with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("could not access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("payload does not hold team records: {0}")]
    Payload(String),
    #[error("payload has no points table")]
    UnrecognizedShape,
    #[error("no element with id `{0}` in page")]
    MissingElement(String),
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
