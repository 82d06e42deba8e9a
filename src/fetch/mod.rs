//! HTTP access to the published survey spreadsheet.

mod basic;
mod client;

pub use basic::BasicClient;
pub use client::HttpClient;

use reqwest::header::{CACHE_CONTROL, HeaderValue, PRAGMA};
use tracing::debug;

use crate::error::LoadError;

/// Builds the CSV export URL of a published Google Sheets tab.
pub fn sheet_csv_url(sheet_id: &str, sheet_name: &str) -> String {
    format!(
        "https://docs.google.com/spreadsheets/d/{sheet_id}/gviz/tq?tqx=out:csv&sheet={sheet_name}"
    )
}

/// GETs `url` as text, bypassing HTTP caches.
///
/// # Errors
///
/// [`LoadError::Transport`] when the request cannot complete and
/// [`LoadError::Status`] for a non-success status.
#[tracing::instrument(skip(client))]
pub async fn fetch_text<C: HttpClient>(client: &C, url: &str) -> Result<String, LoadError> {
    let parsed = reqwest::Url::parse(url).map_err(|e| LoadError::Url(e.to_string()))?;
    let mut req = reqwest::Request::new(reqwest::Method::GET, parsed);
    req.headers_mut()
        .insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
    req.headers_mut()
        .insert(PRAGMA, HeaderValue::from_static("no-cache"));

    let resp = client.execute(req).await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(LoadError::Status(status.as_u16()));
    }

    let text = resp.text().await?;
    debug!(bytes = text.len(), "Survey export received");
    Ok(text)
}

/// Reads the export from an `http(s)` URL or a local file path.
pub async fn read_source<C: HttpClient>(client: &C, source: &str) -> Result<String, LoadError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        fetch_text(client, source).await
    } else {
        let text = std::fs::read_to_string(source)?;
        debug!(bytes = text.len(), path = source, "Survey export read from file");
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sheet_csv_url() {
        assert_eq!(
            sheet_csv_url("abc123", "Respostas"),
            "https://docs.google.com/spreadsheets/d/abc123/gviz/tq?tqx=out:csv&sheet=Respostas"
        );
    }

    #[tokio::test]
    async fn test_read_source_from_file() {
        let path = std::env::temp_dir().join("survey_pulse_test_source.csv");
        std::fs::write(&path, "header\nrow\n").unwrap();

        let client = BasicClient::new().unwrap();
        let text = read_source(&client, path.to_str().unwrap()).await.unwrap();
        assert_eq!(text, "header\nrow\n");

        std::fs::remove_file(&path).unwrap();
    }

    #[tokio::test]
    async fn test_read_source_missing_file() {
        let client = BasicClient::new().unwrap();
        let result = read_source(&client, "/nonexistent/survey_pulse/export.csv").await;
        assert!(matches!(result, Err(LoadError::Io(_))));
    }
}
