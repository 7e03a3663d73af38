use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImageryError {
    /// Transport or decoding failure. Never carries the request URL, which
    /// holds the access token.
    #[error("HTTP request failed: {0}")]
    Http(reqwest::Error),

    #[error("Imagery catalog returned status {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Invalid catalog URL: {0}")]
    Url(#[from] url::ParseError),
}

impl From<reqwest::Error> for ImageryError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}
