use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("no file provided")]
    MissingFile,

    #[error("unsupported media type for {filename}: {content_type}")]
    UnsupportedMediaType {
        filename: String,
        content_type: String,
    },

    #[error("pdf parse error: {0}")]
    PdfParse(String),

    #[error("regex error: {0}")]
    RegexError(#[from] regex::Error),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("url parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("invalid response from {backend}: {details}")]
    BackendResponse { backend: String, details: String },

    #[error("parse error: {0}")]
    Parse(String),
}

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("completion backend returned {status}: {details}")]
    BackendResponse { status: u16, details: String },

    #[error("completion backend has no credential configured")]
    NotConfigured,
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("conversation has no messages")]
    EmptyConversation,
}
