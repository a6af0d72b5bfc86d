use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::domain::ScoringWeights;
use crate::error::{AppError, AppResult};
use crate::integrations::rmp::client::{
    DEFAULT_ENDPOINT, DEFAULT_SCHOOL_LEGACY_ID, DEFAULT_SCHOOL_NAME,
};
use crate::integrations::rmp::RmpClientConfig;
use crate::services::ResolverConfig;

#[derive(Parser, Debug, Clone)]
#[command(name = "rmp-lookup")]
#[command(about = "Look up RateMyProfessors ratings for instructor names")]
pub struct Config {
    /// RateMyProfessors GraphQL endpoint
    #[arg(long, env = "RMP_GRAPHQL_URL", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Legacy id of the institution every search is scoped to
    #[arg(long, env = "RMP_SCHOOL_ID", default_value_t = DEFAULT_SCHOOL_LEGACY_ID)]
    pub school_legacy_id: u32,

    /// Institution name used in requests and fallback links
    #[arg(long, env = "RMP_SCHOOL_NAME", default_value = DEFAULT_SCHOOL_NAME)]
    pub school_name: String,

    /// Candidates requested per search
    #[arg(long, env = "RMP_PAGE_SIZE", default_value_t = 25)]
    pub page_size: u32,

    /// HTTP timeout in seconds
    #[arg(long, env = "RMP_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// JSON file overriding the scoring weights
    #[arg(long, env = "RMP_WEIGHTS")]
    pub weights: Option<PathBuf>,

    /// Print messaging-boundary JSON instead of one line per name
    #[arg(long)]
    pub json: bool,

    /// Instructor names; read one per line from stdin when omitted
    pub names: Vec<String>,
}

impl Config {
    pub fn client_config(&self) -> RmpClientConfig {
        RmpClientConfig {
            endpoint: self.endpoint.clone(),
            school_legacy_id: self.school_legacy_id,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn resolver_config(&self) -> AppResult<ResolverConfig> {
        Ok(ResolverConfig {
            school_name: self.school_name.clone(),
            page_size: self.page_size,
            weights: self.load_weights()?,
        })
    }

    pub fn load_weights(&self) -> AppResult<ScoringWeights> {
        match &self.weights {
            Some(path) => {
                let text = std::fs::read_to_string(path)?;
                Ok(serde_json::from_str(&text)?)
            }
            None => Ok(ScoringWeights::default()),
        }
    }

    pub fn validate(&self) -> AppResult<()> {
        if self.page_size == 0 {
            return Err(AppError::Config("page size must be at least 1".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(AppError::Config("timeout must be at least 1 second".to_string()));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            school_legacy_id: DEFAULT_SCHOOL_LEGACY_ID,
            school_name: DEFAULT_SCHOOL_NAME.to_string(),
            page_size: 25,
            timeout_secs: 30,
            weights: None,
            json: false,
            names: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_parser_defaults() {
        let parsed = Config::parse_from(["rmp-lookup"]);
        let default = Config::default();
        assert_eq!(parsed.school_legacy_id, default.school_legacy_id);
        assert_eq!(parsed.page_size, default.page_size);
        assert_eq!(parsed.school_name, default.school_name);
        assert!(parsed.names.is_empty());
    }

    #[test]
    fn test_names_and_flags_parse() {
        let parsed =
            Config::parse_from(["rmp-lookup", "--page-size", "10", "--json", "J Smith", "Staff"]);
        assert_eq!(parsed.page_size, 10);
        assert!(parsed.json);
        assert_eq!(parsed.names, vec!["J Smith", "Staff"]);
    }

    #[test]
    fn test_zero_page_size_is_rejected() {
        let config = Config {
            page_size: 0,
            ..Config::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Config(_))));
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_missing_weights_file_is_an_error() {
        let config = Config {
            weights: Some(PathBuf::from("/nonexistent/rmp-weights.json")),
            ..Config::default()
        };
        assert!(matches!(config.load_weights(), Err(AppError::Io(_))));
    }

    #[test]
    fn test_resolver_config_carries_school_and_page_size() {
        let config = Config {
            school_name: "Test U".to_string(),
            page_size: 7,
            ..Config::default()
        };
        let resolver = config.resolver_config().unwrap();
        assert_eq!(resolver.school_name, "Test U");
        assert_eq!(resolver.page_size, 7);
        assert_eq!(resolver.weights, ScoringWeights::default());
    }
}
