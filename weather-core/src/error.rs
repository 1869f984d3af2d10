use thiserror::Error;

/// Failure of a single fetch cycle.
///
/// Every variant is terminal for the in-flight fetch but never for the
/// process: the controller turns it into a message and stays interactive.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider answered the current-conditions request with 404.
    #[error("City not found: {city}")]
    CityNotFound { city: String },

    /// Any other provider failure: bad status, transport error, malformed JSON.
    #[error("{0}")]
    Provider(String),

    /// A blank city name reached the client.
    #[error("City name must not be empty")]
    EmptyCity,
}

impl FetchError {
    pub fn provider(msg: impl Into<String>) -> Self {
        FetchError::Provider(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::CityNotFound { .. })
    }
}
