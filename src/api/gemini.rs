//! Google Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};

use crate::{advisory::Generate, prelude::*};

pub struct Api {
    client: Client,
    url: Url,
    api_key: String,
}

impl Api {
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com/";
    pub const DEFAULT_MODEL: &'static str = "gemini-2.5-flash";

    pub fn new(base_url: &Url, model: &str, api_key: String) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;
        let url = base_url
            .join(&format!("v1beta/models/{model}:generateContent"))
            .with_context(|| format!("invalid model name `{model}`"))?;
        Ok(Self { client, url, api_key })
    }

    #[instrument(skip_all)]
    pub async fn generate_content(&self, prompt: &str) -> Result<Option<String>> {
        info!(url = %self.url, "generating…");
        let response = self
            .client
            .post(self.url.clone())
            .header("x-goog-api-key", &self.api_key)
            .json(&Request::new(prompt))
            .send()
            .await?
            .error_for_status()?
            .json::<Response>()
            .await?;
        Ok(response.into_text())
    }
}

#[async_trait]
impl Generate for Api {
    async fn generate(&self, prompt: &str) -> Result<Option<String>> {
        self.generate_content(prompt).await
    }
}

#[derive(Serialize)]
struct Request<'a> {
    contents: [RequestContent<'a>; 1],
}

impl<'a> Request<'a> {
    const fn new(prompt: &'a str) -> Self {
        Self { contents: [RequestContent { parts: [RequestPart { text: prompt }] }] }
    }
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct Response {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl Response {
    /// Text of the first candidate, if there is any.
    fn into_text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}
