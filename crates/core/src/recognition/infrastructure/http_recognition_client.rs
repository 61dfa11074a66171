use std::time::Duration;

use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::recognition::domain::enrollment_request::EnrollmentRequest;
use crate::recognition::domain::recognition_service::{RecognitionClientError, RecognitionService};
use crate::shared::detection::{Detection, RecognitionResult, SystemInfo};
use crate::shared::encoded_frame::EncodedFrame;

const UNKNOWN_ERROR: &str = "unknown error";

#[derive(Serialize)]
struct RecognizeBody<'a> {
    image: &'a str,
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    image: &'a str,
    name: &'a str,
}

#[derive(Deserialize)]
struct RecognizeResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    results: Vec<Detection>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct RegisterResponse {
    #[serde(default)]
    success: bool,
    error: Option<String>,
}

/// JSON-over-HTTP client for the recognition service.
///
/// Endpoints: `POST /recognize`, `POST /register`, `GET /status`.
pub struct HttpRecognitionClient {
    base_url: String,
    http: Client,
}

impl HttpRecognitionClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RecognitionClientError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RecognitionClientError::Network(e.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<R, RecognitionClientError> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .map_err(|e| RecognitionClientError::Network(e.to_string()))?;
        decode(response)
    }
}

fn decode<R: DeserializeOwned>(response: Response) -> Result<R, RecognitionClientError> {
    let status = response.status();
    if !status.is_success() {
        return Err(RecognitionClientError::Transport {
            status: status.as_u16(),
        });
    }
    response
        .json::<R>()
        .map_err(|e| RecognitionClientError::InvalidResponse(e.to_string()))
}

impl RecognitionService for HttpRecognitionClient {
    fn recognize(&self, image: &EncodedFrame) -> Result<RecognitionResult, RecognitionClientError> {
        let body = RecognizeBody {
            image: image.data_url(),
        };
        let response: RecognizeResponse = self.post("/recognize", &body)?;
        if !response.success {
            return Err(RecognitionClientError::Recognition(
                response.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            ));
        }
        Ok(RecognitionResult::new(response.results))
    }

    fn register(&self, request: &EnrollmentRequest) -> Result<(), RecognitionClientError> {
        let body = RegisterBody {
            image: request.image().data_url(),
            name: request.label(),
        };
        let response: RegisterResponse = self.post("/register", &body)?;
        if !response.success {
            return Err(RecognitionClientError::Registration(
                response.error.unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            ));
        }
        Ok(())
    }

    fn fetch_system_info(&self) -> Result<SystemInfo, RecognitionClientError> {
        self.http
            .get(self.url("/status"))
            .send()
            .map_err(|e| RecognitionClientError::Network(e.to_string()))
            .and_then(decode::<SystemInfo>)
            .map_err(|e| RecognitionClientError::InfoUnavailable(e.to_string()))
    }
}
