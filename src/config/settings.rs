use crate::config::SearchArgs;
use crate::utils::error::{Result, ScoutError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::fs;

/// Default query for domain subjects, scoped to the domain's own site.
pub const DEFAULT_QUERY_TEMPLATE: &str =
    "site:{subject} \"PROVIDER DIRECTORY\" \"FHIR\" -fire.ly -linkedin.com -google.com";

pub const SERP_API_KEY_VAR: &str = "SERP_API_KEY";

/// SERP request settings. Defaults mirror a plain US Google search; any field
/// can be overridden from the `[search]` table of a TOML config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub endpoint: String,
    pub engine: String,
    pub location: String,
    pub hl: String,
    pub gl: String,
    pub google_domain: String,
    pub num: u32,
    pub safe: String,
    pub query_template: String,

    /// Never read from the config file; comes from the CLI or the
    /// environment so keys stay out of committed files.
    #[serde(skip)]
    pub api_key: String,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://serpapi.com/search.json".to_string(),
            engine: "google".to_string(),
            location: "United States".to_string(),
            hl: "en".to_string(),
            gl: "us".to_string(),
            google_domain: "google.com".to_string(),
            num: 10,
            safe: "active".to_string(),
            query_template: DEFAULT_QUERY_TEMPLATE.to_string(),
            api_key: String::new(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default)]
    search: SearchSettings,
}

impl SearchSettings {
    /// Build the effective settings for a run: config file (if any), then CLI
    /// overrides, then the API key from the CLI or the environment.
    pub fn resolve(args: &SearchArgs) -> Result<Self> {
        let mut settings = match &args.config {
            Some(path) => {
                let content = fs::read_to_string(path)?;
                let file: SettingsFile = toml::from_str(&content)?;
                file.search
            }
            None => SearchSettings::default(),
        };

        if let Some(template) = &args.query_template {
            settings.query_template = template.clone();
        }

        settings.api_key = match &args.api_key {
            Some(key) => key.clone(),
            None => std::env::var(SERP_API_KEY_VAR).map_err(|_| {
                ScoutError::MissingConfigError {
                    field: format!("api_key (set --api-key or {})", SERP_API_KEY_VAR),
                }
            })?,
        };

        settings.validate()?;
        Ok(settings)
    }
}

impl Validate for SearchSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_url("endpoint", &self.endpoint)?;
        validation::validate_non_empty_string("engine", &self.engine)?;
        validation::validate_query_template("query_template", &self.query_template)?;
        validation::validate_range("num", self.num, 1, 100)?;
        validation::validate_non_empty_string("api_key", &self.api_key)?;
        Ok(())
    }
}
