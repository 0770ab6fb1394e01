use clap::Parser;
use reqwest::Url;

use crate::{advisory::Advisor, api::gemini, prelude::*};

#[derive(Parser)]
pub struct GeminiArgs {
    /// Gemini API key. Without it, a fixed fallback message is printed instead of the advice.
    #[clap(long = "gemini-api-key", env = "GEMINI_API_KEY")]
    pub api_key: Option<String>,

    #[clap(
        long = "gemini-model",
        default_value = gemini::Api::DEFAULT_MODEL,
        env = "GEMINI_MODEL"
    )]
    pub model: String,

    #[clap(
        long = "gemini-base-url",
        default_value = gemini::Api::DEFAULT_BASE_URL,
        env = "GEMINI_BASE_URL"
    )]
    pub base_url: Url,

    /// Language the advice is written in.
    #[clap(long = "advice-language", default_value = "Chinese", env = "ADVICE_LANGUAGE")]
    pub language: String,
}

impl GeminiArgs {
    pub fn try_new_advisor(&self) -> Result<Advisor<gemini::Api>> {
        let api = self
            .api_key
            .clone()
            .map(|api_key| gemini::Api::new(&self.base_url, &self.model, api_key))
            .transpose()?;
        Ok(Advisor::new(api, self.language.clone()))
    }
}
