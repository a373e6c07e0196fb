use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The short service name is not part of the published interface. This is
    /// raised before anything goes out on the wire.
    #[error("service not found, id = <{0}>")]
    ServiceNotFound(String),
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a JSON-RPC error object.
    #[error("remote call failed ({code}): {message}")]
    Remote { code: i64, message: String },
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
    /// The response envelope carried neither a result nor an error.
    #[error("response carried neither result nor error")]
    NoResult,
}
