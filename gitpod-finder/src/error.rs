#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API request failed with status code {code}: {body}")]
    Status { code: u16, body: String },
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQL(Vec<String>),
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("invalid base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("unsupported URL scheme {0:?}, expected http or https")]
    UnsupportedScheme(String),
}

#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    #[error("error fetching organizations: {0}")]
    Organizations(#[source] ApiError),
    #[error(transparent)]
    Output(#[from] std::io::Error),
}
