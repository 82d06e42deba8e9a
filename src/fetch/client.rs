use async_trait::async_trait;
use reqwest::{Request, Response};

/// Transport used for both the export download and survey submission.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn execute(&self, req: Request) -> reqwest::Result<Response>;
}
