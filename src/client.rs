use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::models::{AdRequest, AdResponse, RawAdResponse};
use crate::normalize::{self, NormalizeError};

/// How a generation attempt can fail. Everything the app shows the user
/// comes from the `Display` impls here.
#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The endpoint answered with a non-success status.
    #[error("{message}")]
    Http { status: StatusCode, message: String },

    /// The request never completed (DNS, refused connection, dropped socket).
    #[error("Network error: please check your connection and try again")]
    Network(#[source] reqwest::Error),

    /// Success status but the body is not the documented shape.
    #[error("{0}")]
    Malformed(String),
}

/// Error body the service sends on failure. FastAPI-style `detail`,
/// with `message` as a secondary convention.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
    message: Option<String>,
}

/// Thin wrapper around the ad-copy generation endpoint.
#[derive(Clone)]
pub struct GeneratorClient {
    client: Client,
    base_url: String,
}

impl GeneratorClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// POST the request to `{base}/generate` and return the normalized
    /// result. Either every section of the response is populated or this
    /// fails; a partial result is never handed back.
    pub async fn generate(&self, request: &AdRequest) -> Result<AdResponse, GenerateError> {
        let url = format!("{}/generate", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(GenerateError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let message = match response.json::<ErrorBody>().await {
                Ok(body) => body
                    .detail
                    .or(body.message)
                    .unwrap_or_else(|| status_message(status)),
                Err(_) => status_message(status),
            };
            return Err(GenerateError::Http { status, message });
        }

        let raw: RawAdResponse = response.json().await.map_err(|e| {
            tracing::warn!(error = %e, "generation response was not valid JSON");
            GenerateError::Malformed("Invalid response format from server".to_string())
        })?;

        normalize::normalize(raw).map_err(|e: NormalizeError| GenerateError::Malformed(e.to_string()))
    }
}

fn status_message(status: StatusCode) -> String {
    format!("Server error: {}", status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AdRequest;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn sample_request() -> AdRequest {
        AdRequest {
            product_name: "Lavender Mist".to_string(),
            description: "Calming".to_string(),
            target_audience: "Stressed professionals".to_string(),
            ..AdRequest::default()
        }
    }

    fn well_formed_body() -> serde_json::Value {
        serde_json::json!({
            "insights": {
                "pain_points": ["Stress"],
                "emotional_triggers": ["Calm"],
                "objections": ["Scent too strong"],
                "competitive_angle": "Pure lavender oil",
                "key_selling_points": ["Relaxes in seconds"],
                "recommended_keywords": ["lavender spray"],
                "demographics": "25-45, Urban",
                "targeting_interests": ["Wellness"],
                "behaviors": ["Shops online weekly"]
            },
            "variations": [
                {"headline": "H1", "primary_text": "B1", "cta": "C1", "angle": "Emotional"},
                {"headline": "H2", "primary_text": "B2", "cta": "C2", "angle": "Logical"},
                {"headline": "H3", "primary_text": "B3", "cta": "C3", "angle": "Scarcity"}
            ],
            "compliance": {"risk_level": "Low", "issues": [], "suggestions": []},
            "channel_opt": {"whatsapp": "wa", "sms": "sms"}
        })
    }

    #[tokio::test]
    async fn generate_returns_normalized_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .and(body_partial_json(
                serde_json::json!({"product_name": "Lavender Mist", "platform": "Instagram"}),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(well_formed_body()))
            .mount(&server)
            .await;

        let client = GeneratorClient::new(server.uri());
        let result = client.generate(&sample_request()).await.unwrap();
        assert_eq!(result.variations.len(), 3);
        assert_eq!(result.insights.demographics, "25-45, Urban");
    }

    #[tokio::test]
    async fn http_error_uses_detail_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"detail": "model overloaded"})),
            )
            .mount(&server)
            .await;

        let client = GeneratorClient::new(server.uri());
        let err = client.generate(&sample_request()).await.unwrap_err();
        match err {
            GenerateError::Http { status, message } => {
                assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
                assert_eq!(message, "model overloaded");
            }
            other => panic!("expected Http error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn http_error_falls_back_to_message_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(
                ResponseTemplate::new(422)
                    .set_body_json(serde_json::json!({"message": "bad campaign goal"})),
            )
            .mount(&server)
            .await;

        let client = GeneratorClient::new(server.uri());
        let err = client.generate(&sample_request()).await.unwrap_err();
        assert_eq!(err.to_string(), "bad campaign goal");
    }

    #[tokio::test]
    async fn http_error_with_plain_text_body_uses_status_line() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = GeneratorClient::new(server.uri());
        let err = client.generate(&sample_request()).await.unwrap_err();
        assert_eq!(err.to_string(), "Server error: 500 Internal Server Error");
    }

    #[tokio::test]
    async fn missing_section_is_malformed() {
        let server = MockServer::start().await;
        let mut body = well_formed_body();
        body.as_object_mut().unwrap().remove("compliance");

        Mock::given(method("POST"))
            .and(path("/generate"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&server)
            .await;

        let client = GeneratorClient::new(server.uri());
        let err = client.generate(&sample_request()).await.unwrap_err();
        match err {
            GenerateError::Malformed(message) => assert!(message.contains("compliance")),
            other => panic!("expected Malformed error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_network_error() {
        // Grab a port nothing is listening on.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = GeneratorClient::new(format!("http://127.0.0.1:{port}"));
        let err = client.generate(&sample_request()).await.unwrap_err();
        assert!(matches!(err, GenerateError::Network(_)));
        assert!(!err.to_string().is_empty());
    }
}
