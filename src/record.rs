//! Validated survey submissions.

use serde::Serialize;
use std::fmt;

/// Comment substituted when a row has no free-text comment.
pub const NO_COMMENT: &str = "No comment";

/// Minimum number of columns a row needs to become a [`SurveyRecord`].
pub const MIN_FIELDS: usize = 9;

/// A star rating, always within `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Returns `None` for anything outside `1..=5`. Values are never clamped.
    pub fn new(value: i64) -> Option<Self> {
        if (Self::MIN as i64..=Self::MAX as i64).contains(&value) {
            Some(Self(value as u8))
        } else {
            None
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One survey row from the spreadsheet export.
///
/// Column order: `timestamp, store, name, phone, email, plate, serviceRating,
/// recommendationRating, comment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurveyRecord {
    submitted_at: String,
    store: String,
    customer_name: String,
    phone: String,
    email: String,
    plate: String,
    service_rating: Rating,
    recommendation_rating: Rating,
    comment: String,
}

impl SurveyRecord {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        submitted_at: impl Into<String>,
        store: impl Into<String>,
        customer_name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
        plate: impl Into<String>,
        service_rating: Rating,
        recommendation_rating: Rating,
        comment: Option<String>,
    ) -> Self {
        let comment = comment
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| NO_COMMENT.to_string());

        Self {
            submitted_at: submitted_at.into(),
            store: store.into(),
            customer_name: customer_name.into(),
            phone: phone.into(),
            email: email.into(),
            plate: plate.into(),
            service_rating,
            recommendation_rating,
            comment,
        }
    }

    /// Builds a record from already split fields.
    ///
    /// Returns `None` when there are fewer than [`MIN_FIELDS`] fields or when
    /// either rating is not a number in `1..=5`. Double quotes are removed from
    /// every value; extra columns past the comment are ignored.
    pub fn from_fields<S: AsRef<str>>(fields: &[S]) -> Option<Self> {
        if fields.len() < MIN_FIELDS {
            return None;
        }

        let service_rating = Rating::new(parse_leading_int(fields[6].as_ref())?)?;
        let recommendation_rating = Rating::new(parse_leading_int(fields[7].as_ref())?)?;

        let field = |i: usize| unquote(fields[i].as_ref());

        Some(Self::new(
            field(0),
            field(1),
            field(2),
            field(3),
            field(4),
            field(5),
            service_rating,
            recommendation_rating,
            Some(field(8)),
        ))
    }

    pub fn submitted_at(&self) -> &str {
        &self.submitted_at
    }

    pub fn store(&self) -> &str {
        &self.store
    }

    pub fn customer_name(&self) -> &str {
        &self.customer_name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn plate(&self) -> &str {
        &self.plate
    }

    pub fn service_rating(&self) -> Rating {
        self.service_rating
    }

    pub fn recommendation_rating(&self) -> Rating {
        self.recommendation_rating
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    /// True unless the comment is the [`NO_COMMENT`] placeholder.
    pub fn has_comment(&self) -> bool {
        self.comment != NO_COMMENT
    }

    /// Sum of both ratings, used for exact ordering.
    pub fn rating_sum(&self) -> u8 {
        self.service_rating.value() + self.recommendation_rating.value()
    }

    /// Mean of the two ratings.
    pub fn combined_score(&self) -> f64 {
        f64::from(self.rating_sum()) / 2.0
    }
}

fn unquote(value: &str) -> String {
    value.replace('"', "")
}

/// Reads an optional sign and the leading run of decimal digits, ignoring
/// whatever follows (`"4.5"` reads as 4). Returns `None` when no digit leads.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = unquote(raw);
    let s = s.trim();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits: &str = {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }

    // Anything too long to fit is out of range anyway.
    let value: i64 = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}
