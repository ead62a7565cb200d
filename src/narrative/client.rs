use crate::config::NarrativeParams;
use crate::error::{CareerError, CpResult};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Text-generation backend. Returns the model's raw completion.
pub trait NarrativeClient {
    fn complete(&self, endpoint: &str, model: &str, prompt: &str) -> CpResult<String>;
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Serialize)]
struct GenerateOptions {
    temperature: f64,
    num_predict: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

/// Non-streaming client for an Ollama-style `/api/generate` endpoint.
pub struct OllamaClient {
    http: Client,
    temperature: f64,
    max_tokens: u32,
}

impl OllamaClient {
    pub fn new(params: &NarrativeParams) -> CpResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(params.narrative_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            temperature: params.narrative_temperature,
            max_tokens: params.narrative_max_tokens,
        })
    }
}

impl NarrativeClient for OllamaClient {
    fn complete(&self, endpoint: &str, model: &str, prompt: &str) -> CpResult<String> {
        let body = GenerateRequest {
            model,
            prompt,
            stream: false,
            options: GenerateOptions {
                temperature: self.temperature,
                num_predict: self.max_tokens,
            },
        };

        debug!("POST {} model={}", endpoint, model);
        let reply: GenerateResponse = self
            .http
            .post(endpoint)
            .json(&body)
            .send()?
            .error_for_status()?
            .json()?;

        let text = reply.response.trim();
        if text.is_empty() {
            return Err(CareerError::Validation(format!(
                "{} returned an empty completion",
                model
            )));
        }
        Ok(text.to_string())
    }
}
