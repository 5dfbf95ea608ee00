use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum TransformError {
    #[error("input is not valid JSON: {0}")]
    #[diagnostic(code(xtract::transform::invalid_json))]
    InvalidJson(#[source] serde_json::Error),

    /// Input matched neither the standard nor the article post shape.
    #[error("post does not match a known shape: {0}")]
    #[diagnostic(
        code(xtract::transform::malformed_post),
        help("the value must carry `rest_id`, `core.user_results` and `legacy`")
    )]
    MalformedPost(#[source] serde_json::Error),

    #[error("quoted post {id} exceeds the quote depth limit of {limit}")]
    #[diagnostic(code(xtract::transform::quote_depth))]
    QuoteDepthExceeded { id: String, limit: usize },
}
