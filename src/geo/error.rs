/// Error types for geocoding operations
///
/// These never surface as request failures: callers log them and degrade to
/// "coordinates unknown". The exception is `Config`, which aborts startup.
#[derive(Debug, thiserror::Error)]
pub enum GeoError {
    #[error("geocoder is not configured: {0}")]
    Config(String),

    #[error("geocoder returned HTTP {0}")]
    Provider(u16),

    #[error("geocoder request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("could not parse geocoder position {0:?}")]
    MalformedPosition(String),
}
