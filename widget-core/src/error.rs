use thiserror::Error;

/// Failures of the weather step of the pipeline.
///
/// Geolocation problems never show up here: the position resolver
/// recovers from them by falling back to the configured coordinates.
#[derive(Debug, Error)]
pub enum WidgetError {
    #[error("Failed to send request to {service}")]
    Request {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read {service} response body")]
    Body {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} request failed with status {status}: {body}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse {service} JSON")]
    Parse {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{service} response is missing `{field}`")]
    MissingField {
        service: &'static str,
        field: &'static str,
    },
}

pub type Result<T, E = WidgetError> = std::result::Result<T, E>;

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
