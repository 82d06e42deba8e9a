//! Survey submission to the hosted spreadsheet script.
//!
//! The script endpoint does not give a usable response, so a submission
//! counts as delivered once the request completes without a transport error.

use chrono::NaiveDateTime;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, warn};

use crate::error::SubmitError;
use crate::fetch::HttpClient;
use crate::record::Rating;

/// Timestamp layout written into the sheet (`19/10/2026, 14:30:00`).
pub const SUBMISSION_TIMESTAMP_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// Raw form input. Ratings stay `0` until the visitor picks a star.
#[derive(Debug, Clone, Default)]
pub struct SurveyForm {
    pub store: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub plate: String,
    pub service_rating: u8,
    pub recommendation_rating: u8,
    pub comment: Option<String>,
}

/// A reason the form cannot be sent yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    MissingStore,
    NameTooShort,
    InvalidPhone,
    InvalidEmail,
    InvalidPlate,
    ServiceNotRated,
    RecommendationNotRated,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            ValidationIssue::MissingStore => "no store selected",
            ValidationIssue::NameTooShort => "name must have at least 3 characters",
            ValidationIssue::InvalidPhone => "phone must have at least 10 characters",
            ValidationIssue::InvalidEmail => "email must contain '@'",
            ValidationIssue::InvalidPlate => "plate must have at least 7 characters",
            ValidationIssue::ServiceNotRated => "service rating must be between 1 and 5",
            ValidationIssue::RecommendationNotRated => {
                "recommendation rating must be between 1 and 5"
            }
        };
        f.write_str(msg)
    }
}

impl SurveyForm {
    /// Client-side completeness checks before sending. Returns every issue found.
    pub fn validate(&self) -> Result<(), Vec<ValidationIssue>> {
        let mut issues = Vec::new();

        if self.store.trim().is_empty() {
            issues.push(ValidationIssue::MissingStore);
        }
        if self.name.trim().chars().count() < 3 {
            issues.push(ValidationIssue::NameTooShort);
        }
        if self.phone.trim().chars().count() < 10 {
            issues.push(ValidationIssue::InvalidPhone);
        }
        if !self.email.contains('@') {
            issues.push(ValidationIssue::InvalidEmail);
        }
        if self.plate.trim().chars().count() < 7 {
            issues.push(ValidationIssue::InvalidPlate);
        }
        if Rating::new(i64::from(self.service_rating)).is_none() {
            issues.push(ValidationIssue::ServiceNotRated);
        }
        if Rating::new(i64::from(self.recommendation_rating)).is_none() {
            issues.push(ValidationIssue::RecommendationNotRated);
        }

        if issues.is_empty() {
            Ok(())
        } else {
            Err(issues)
        }
    }
}

/// JSON body posted to the script endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SurveySubmission {
    pub store: String,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub plate: String,
    pub service_rating: u8,
    pub recommendation_rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    pub timestamp: String,
}

impl SurveySubmission {
    /// Stamps `form` with `submitted_at` in the sheet's timestamp layout.
    pub fn new(form: SurveyForm, submitted_at: NaiveDateTime) -> Self {
        Self {
            store: form.store,
            name: form.name,
            phone: form.phone,
            email: form.email,
            plate: form.plate,
            service_rating: form.service_rating,
            recommendation_rating: form.recommendation_rating,
            comment: form.comment.filter(|c| !c.trim().is_empty()),
            timestamp: submitted_at
                .format(SUBMISSION_TIMESTAMP_FORMAT)
                .to_string(),
        }
    }
}

/// POSTs `submission` as JSON. The response is not inspected.
///
/// # Errors
///
/// Only transport-level failures are reported; a reply with any HTTP status
/// is treated as delivered.
#[tracing::instrument(skip(client, submission), fields(store = %submission.store))]
pub async fn submit_survey<C: HttpClient>(
    client: &C,
    url: &str,
    submission: &SurveySubmission,
) -> Result<(), SubmitError> {
    let parsed = reqwest::Url::parse(url).map_err(|e| SubmitError::Url(e.to_string()))?;
    let mut req = reqwest::Request::new(reqwest::Method::POST, parsed);
    req.headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    *req.body_mut() = Some(serde_json::to_vec(submission)?.into());

    let resp = client.execute(req).await?;
    debug!(status = resp.status().as_u16(), "Submission response received");
    info!("Survey submitted");
    Ok(())
}

/// Checks that the script endpoint answers a GET with a success status
/// and a JSON body.
#[tracing::instrument(skip(client))]
pub async fn check_endpoint<C: HttpClient>(client: &C, url: &str) -> bool {
    let Ok(parsed) = reqwest::Url::parse(url) else {
        warn!("Endpoint URL is invalid");
        return false;
    };

    let resp = match client
        .execute(reqwest::Request::new(reqwest::Method::GET, parsed))
        .await
    {
        Ok(resp) => resp,
        Err(e) => {
            warn!(error = %e, "Endpoint check failed");
            return false;
        }
    };

    let status = resp.status();
    if !status.is_success() {
        debug!(status = status.as_u16(), "Endpoint check returned non-success status");
        return false;
    }

    match resp.json::<serde_json::Value>().await {
        Ok(_) => true,
        Err(e) => {
            warn!(error = %e, "Endpoint did not answer with JSON");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn complete_form() -> SurveyForm {
        SurveyForm {
            store: "Barra Blue".into(),
            name: "Ana Souza".into(),
            phone: "21999990000".into(),
            email: "ana@example.com".into(),
            plate: "ABC1D23".into(),
            service_rating: 5,
            recommendation_rating: 4,
            comment: None,
        }
    }

    #[test]
    fn test_complete_form_is_valid() {
        assert_eq!(complete_form().validate(), Ok(()));
    }

    #[test]
    fn test_empty_form_reports_every_issue() {
        let issues = SurveyForm::default().validate().unwrap_err();
        assert_eq!(
            issues,
            vec![
                ValidationIssue::MissingStore,
                ValidationIssue::NameTooShort,
                ValidationIssue::InvalidPhone,
                ValidationIssue::InvalidEmail,
                ValidationIssue::InvalidPlate,
                ValidationIssue::ServiceNotRated,
                ValidationIssue::RecommendationNotRated,
            ]
        );
    }

    #[test]
    fn test_out_of_range_rating_is_rejected() {
        let form = SurveyForm {
            recommendation_rating: 6,
            ..complete_form()
        };
        assert_eq!(
            form.validate(),
            Err(vec![ValidationIssue::RecommendationNotRated])
        );
    }

    #[test]
    fn test_submission_json_shape() {
        let at = NaiveDate::from_ymd_opt(2026, 10, 19)
            .unwrap()
            .and_hms_opt(14, 30, 5)
            .unwrap();
        let submission = SurveySubmission::new(complete_form(), at);
        let json = serde_json::to_value(&submission).unwrap();

        assert_eq!(json["serviceRating"], 5);
        assert_eq!(json["recommendationRating"], 4);
        assert_eq!(json["timestamp"], "19/10/2026, 14:30:05");
        assert!(json.get("comment").is_none());
    }

    #[test]
    fn test_blank_comment_is_omitted() {
        let form = SurveyForm {
            comment: Some("   ".into()),
            ..complete_form()
        };
        let at = NaiveDate::from_ymd_opt(2026, 1, 2)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        assert_eq!(SurveySubmission::new(form, at).comment, None);
    }
}
