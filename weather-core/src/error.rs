use thiserror::Error;

/// Failure kinds of the weather pipeline.
///
/// The server maps these to HTTP statuses in exactly one place:
/// `CityNotFound` becomes 404, everything else 500. Display strings double
/// as the error bodies returned to the caller.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("City not found")]
    CityNotFound,

    #[error("Upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("Failed to parse upstream response: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Upstream returned status {status}: {body}")]
    UpstreamStatus {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Cap upstream bodies quoted in error messages. The cut must land on a
/// char boundary: error bodies routinely carry multibyte text (units like
/// `°C`, localized messages).
pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}
