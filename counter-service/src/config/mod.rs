use crate::prompt::PromptTemplate;
use crate::services::providers::gemini::GEMINI_API_BASE;
use crate::services::providers::GenerationParams;
use secrecy::Secret;
use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

/// Model used for every counter lookup.
pub const COUNTER_MODEL: &str = "gemini-2.5-flash";

/// Low temperature keeps answers factual rather than creative.
pub const COUNTER_TEMPERATURE: f32 = 0.1;

/// Fixed generation settings for a counter lookup.
pub fn counter_generation_params() -> GenerationParams {
    GenerationParams {
        model: COUNTER_MODEL.to_string(),
        temperature: Some(COUNTER_TEMPERATURE),
    }
}

#[derive(Debug, Clone)]
pub struct CounterConfig {
    pub common: core_config::Config,
    pub gemini: GeminiSettings,
    pub prompt: PromptTemplate,
    pub otlp_endpoint: Option<String>,
}

#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Secret<String>,
    pub base_url: String,
}

impl CounterConfig {
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        Self::from_lookup(common_config, |key| env::var(key).ok())
    }

    /// Build the config from `common` plus whatever `lookup` returns for each
    /// service variable.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: Option<&str>| get_env(&lookup, key, default);

        let prompt = match lookup("COUNTER_PROMPT_TEMPLATE").filter(|t| !t.is_empty()) {
            Some(template) => PromptTemplate::new(template)
                .map_err(|e| AppError::config(format!("COUNTER_PROMPT_TEMPLATE: {}", e)))?,
            None => PromptTemplate::default(),
        };

        Ok(CounterConfig {
            common,
            gemini: GeminiSettings {
                api_key: Secret::new(get("GEMINI_API_KEY", None)?),
                base_url: get("GEMINI_API_BASE", Some(GEMINI_API_BASE))?,
            },
            prompt,
            otlp_endpoint: lookup("OTLP_ENDPOINT").filter(|e| !e.is_empty()),
        })
    }
}

fn get_env<F>(lookup: &F, key: &str, default: Option<&str>) -> Result<String, AppError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).filter(|val| !val.is_empty()) {
        Some(val) => Ok(val),
        None => match default {
            Some(def) => Ok(def.to_string()),
            None => Err(AppError::config(format!("{} is required but not set", key))),
        },
    }
}
