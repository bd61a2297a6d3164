use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to write sitemap XML: {0}")]
    Write(String),

    #[error("sitemap XML is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
