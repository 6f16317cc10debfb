// API client module: a small blocking HTTP client for the Gemini
// `generateContent` endpoint. Failures never escape `ask`; they come back
// as a printable error line so the UI can show every answer the same way.

use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::thread;
use std::time::Duration;

use crate::config::ApiSettings;
use crate::error::{Error, Result};
use crate::style::{Role, Theme};

/// Anything that can answer a composed prompt.
pub trait Assistant {
    fn ask(&self, prompt: &str) -> String;
}

/// Gemini client holding the HTTP client, the resolved endpoint and the key.
#[derive(Clone)]
pub struct AssistantClient {
    client: Client,
    endpoint: String,
    api_key: String,
    settings: ApiSettings,
    theme: Theme,
}

#[derive(Serialize, Debug)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize, Debug)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize, Debug)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize, Debug)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
struct ResponsePart {
    text: String,
}

impl AssistantClient {
    pub fn new(settings: ApiSettings, api_key: String, theme: Theme) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(Error::Client)?;
        let endpoint = format!(
            "{}/v1beta/models/{}:generateContent",
            settings.base_url.trim_end_matches('/'),
            settings.model
        );
        Ok(AssistantClient {
            client,
            endpoint,
            api_key,
            settings,
            theme,
        })
    }

    /// Send `prompt` and return the raw answer text, retrying transient
    /// failures with exponential backoff.
    pub fn generate(&self, prompt: &str) -> Result<String> {
        let mut attempt: u32 = 0;
        loop {
            match self.send(prompt) {
                Ok(text) => return Ok(text),
                Err(e) if e.is_retryable() && attempt < self.settings.max_retries => {
                    let delay = Duration::from_millis(self.settings.retry_base_delay_ms * 2u64.pow(attempt));
                    tracing::warn!(
                        "request failed (attempt {}/{}): {}, retrying in {:?}",
                        attempt + 1,
                        self.settings.max_retries + 1,
                        e,
                        delay
                    );
                    thread::sleep(delay);
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    fn send(&self, prompt: &str) -> Result<String> {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };
        // the key travels in the query string; keep it out of logs and errors
        tracing::debug!("POST {}", self.endpoint);
        let res = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .map_err(|e| Error::Http(e.without_url()))?;

        let status = res.status();
        if status != StatusCode::OK {
            let txt = res.text().unwrap_or_default();
            tracing::debug!("generation failed with {}: {}", status, txt);
            return Err(Error::Status {
                code: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let txt = res.text().map_err(|e| Error::Http(e.without_url()))?;
        let parsed: GenerateResponse =
            serde_json::from_str(&txt).map_err(|e| Error::MalformedResponse(e.to_string()))?;
        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| Error::MalformedResponse("no candidates in response".into()))?;
        Ok(candidate
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect::<Vec<_>>()
            .join("\n"))
    }
}

impl Assistant for AssistantClient {
    fn ask(&self, prompt: &str) -> String {
        match self.generate(prompt) {
            Ok(raw) => self.theme.format_response(&raw),
            Err(e) => format!("{} {}", self.theme.apply(Role::Error, "Error:"), e),
        }
    }
}
