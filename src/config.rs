//! Runtime configuration read from the environment (and `.env`).

use crate::analyzers::aggregate::DEFAULT_STORES;
use crate::error::ConfigError;
use crate::fetch::sheet_csv_url;

pub const DEFAULT_SHEET_NAME: &str = "Respostas";
pub const DEFAULT_SESSION_FILE: &str = ".survey_session.json";

#[derive(Debug, Clone)]
pub struct Config {
    /// Published spreadsheet id; required only to fetch from the sheet.
    pub sheet_id: Option<String>,
    pub sheet_name: String,
    /// Script endpoint receiving submissions.
    pub script_url: Option<String>,
    /// Known stores, in display order.
    pub stores: Vec<String>,
    pub dashboard_password: Option<String>,
    pub session_file: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let stores = match get("SURVEY_STORES") {
            Some(raw) => {
                let stores: Vec<String> = raw
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                if stores.is_empty() {
                    return Err(ConfigError::NoStores("SURVEY_STORES"));
                }
                stores
            }
            None => DEFAULT_STORES.iter().map(|s| s.to_string()).collect(),
        };

        Ok(Self {
            sheet_id: get("SURVEY_SHEET_ID"),
            sheet_name: get("SURVEY_SHEET_NAME").unwrap_or_else(|| DEFAULT_SHEET_NAME.to_string()),
            script_url: get("SURVEY_SCRIPT_URL"),
            stores,
            dashboard_password: get("DASHBOARD_PASSWORD"),
            session_file: get("SESSION_FILE").unwrap_or_else(|| DEFAULT_SESSION_FILE.to_string()),
        })
    }

    /// CSV export URL of the configured sheet.
    pub fn sheet_url(&self) -> Result<String, ConfigError> {
        let id = self
            .sheet_id
            .as_deref()
            .ok_or(ConfigError::Missing("SURVEY_SHEET_ID"))?;
        Ok(sheet_csv_url(id, &self.sheet_name))
    }

    pub fn script_url(&self) -> Result<&str, ConfigError> {
        self.script_url
            .as_deref()
            .ok_or(ConfigError::Missing("SURVEY_SCRIPT_URL"))
    }

    pub fn dashboard_password(&self) -> Result<&str, ConfigError> {
        self.dashboard_password
            .as_deref()
            .ok_or(ConfigError::Missing("DASHBOARD_PASSWORD"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.sheet_name, "Respostas");
        assert_eq!(cfg.stores, vec!["Barra Blue", "Shopping Recreio"]);
        assert_eq!(cfg.session_file, DEFAULT_SESSION_FILE);
        assert!(matches!(cfg.sheet_url(), Err(ConfigError::Missing("SURVEY_SHEET_ID"))));
        assert!(cfg.script_url().is_err());
        assert!(cfg.dashboard_password().is_err());
    }

    #[test]
    fn test_store_list_is_split_and_trimmed() {
        let cfg = config(&[("SURVEY_STORES", " Centro , Norte,, Sul ")]).unwrap();
        assert_eq!(cfg.stores, vec!["Centro", "Norte", "Sul"]);
    }

    #[test]
    fn test_store_list_of_only_commas_is_rejected() {
        assert!(matches!(
            config(&[("SURVEY_STORES", ",,")]),
            Err(ConfigError::NoStores(_))
        ));
    }

    #[test]
    fn test_sheet_url() {
        let cfg = config(&[("SURVEY_SHEET_ID", "abc"), ("SURVEY_SHEET_NAME", "Form")]).unwrap();
        assert_eq!(
            cfg.sheet_url().unwrap(),
            "https://docs.google.com/spreadsheets/d/abc/gviz/tq?tqx=out:csv&sheet=Form"
        );
    }

    #[test]
    fn test_blank_values_are_unset() {
        let cfg = config(&[("SURVEY_SCRIPT_URL", "  ")]).unwrap();
        assert!(cfg.script_url.is_none());
    }
}
