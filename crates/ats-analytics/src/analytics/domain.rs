use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Organization whose records a dashboard is computed from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TenantId(pub String);

impl fmt::Display for TenantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CandidateId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ApplicationId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct InterviewId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OfferId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DepartmentId(pub String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProfileId(pub String);

/// UI language used for the few labels the dashboard carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl Locale {
    /// Parses a language tag such as `ar`, `ar-SA`, or `en_US`, or the first entry of an
    /// `Accept-Language` list. Anything else is English.
    pub fn parse(raw: &str) -> Self {
        let primary = raw
            .trim()
            .split([',', ';', '-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "ar" => Self::Ar,
            _ => Self::En,
        }
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }
}

/// Request-scoped tenant and language, passed explicitly to every stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    pub tenant_id: TenantId,
    pub locale: Locale,
}

impl TenantContext {
    pub fn new(tenant_id: impl Into<String>, locale: Locale) -> Self {
        Self {
            tenant_id: TenantId(tenant_id.into()),
            locale,
        }
    }
}

/// Funnel position of an application.
///
/// Values outside the fixed enumeration are kept as [`ApplicationStatus::Other`] so they can be
/// excluded from stage maps without failing deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum ApplicationStatus {
    New,
    Screening,
    Interviewing,
    Offered,
    Hired,
    Rejected,
    Other(String),
}

impl ApplicationStatus {
    /// Display order of the hiring funnel.
    pub const fn funnel() -> [Self; 6] {
        [
            Self::New,
            Self::Screening,
            Self::Interviewing,
            Self::Offered,
            Self::Hired,
            Self::Rejected,
        ]
    }

    /// Forward pipeline stages, terminal rejection excluded.
    pub const fn pipeline() -> [Self; 5] {
        [
            Self::New,
            Self::Screening,
            Self::Interviewing,
            Self::Offered,
            Self::Hired,
        ]
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::New => "new",
            Self::Screening => "screening",
            Self::Interviewing => "interviewing",
            Self::Offered => "offered",
            Self::Hired => "hired",
            Self::Rejected => "rejected",
            Self::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Screening => "Screening",
            Self::Interviewing => "Interviewing",
            Self::Offered => "Offered",
            Self::Hired => "Hired",
            Self::Rejected => "Rejected",
            Self::Other(_) => "Other",
        }
    }

    /// Reached at least the interview stage.
    pub fn is_interview_or_later(&self) -> bool {
        matches!(self, Self::Interviewing | Self::Offered | Self::Hired)
    }

    pub fn is_hired(&self) -> bool {
        matches!(self, Self::Hired)
    }
}

impl From<String> for ApplicationStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "new" => Self::New,
            "screening" => Self::Screening,
            "interviewing" => Self::Interviewing,
            "offered" => Self::Offered,
            "hired" => Self::Hired,
            "rejected" => Self::Rejected,
            _ => Self::Other(raw),
        }
    }
}

impl Serialize for ApplicationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum JobStatus {
    Draft,
    Published,
    Open,
    Closed,
    Paused,
    Archived,
    Other(String),
}

impl JobStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Paused => "paused",
            Self::Archived => "archived",
            Self::Other(raw) => raw,
        }
    }

    /// Accepting applications.
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Published | Self::Open)
    }
}

impl From<String> for JobStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "draft" => Self::Draft,
            "published" => Self::Published,
            "open" => Self::Open,
            "closed" => Self::Closed,
            "paused" => Self::Paused,
            "archived" => Self::Archived,
            _ => Self::Other(raw),
        }
    }
}

impl Serialize for JobStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum InterviewStatus {
    Scheduled,
    Confirmed,
    Completed,
    Cancelled,
    NoShow,
    Other(String),
}

impl InterviewStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Scheduled => "scheduled",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::NoShow => "no_show",
            Self::Other(raw) => raw,
        }
    }

    /// Still expected to happen.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Scheduled | Self::Confirmed)
    }
}

impl From<String> for InterviewStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "scheduled" => Self::Scheduled,
            "confirmed" => Self::Confirmed,
            "completed" => Self::Completed,
            "cancelled" | "canceled" => Self::Cancelled,
            "no_show" | "no-show" => Self::NoShow,
            _ => Self::Other(raw),
        }
    }
}

impl Serialize for InterviewStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize)]
#[serde(from = "String")]
pub enum OfferStatus {
    Offered,
    Hired,
    Rejected,
    Other(String),
}

impl OfferStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Offered => "offered",
            Self::Hired => "hired",
            Self::Rejected => "rejected",
            Self::Other(raw) => raw,
        }
    }
}

impl From<String> for OfferStatus {
    fn from(raw: String) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "offered" => Self::Offered,
            "hired" => Self::Hired,
            "rejected" => Self::Rejected,
            _ => Self::Other(raw),
        }
    }
}

impl Serialize for OfferStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub title: String,
    pub status: JobStatus,
    #[serde(default)]
    pub department_id: Option<DepartmentId>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Application {
    pub id: ApplicationId,
    pub status: ApplicationStatus,
    #[serde(default)]
    pub source: Option<String>,
    pub job_id: JobId,
    #[serde(default)]
    pub candidate_id: Option<CandidateId>,
    pub created_at: DateTime<Utc>,
    /// Last modification; stands in for the hire timestamp since stage changes are not logged.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Application {
    pub const DEFAULT_SOURCE: &'static str = "direct";

    pub fn source_label(&self) -> &str {
        self.source
            .as_deref()
            .map(str::trim)
            .filter(|source| !source.is_empty())
            .unwrap_or(Self::DEFAULT_SOURCE)
    }
}

/// Structured interviewer feedback, validated at load time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewFeedback {
    /// Overall rating on a 1..=5 scale.
    pub rating: u8,
    #[serde(default)]
    pub criteria_scores: BTreeMap<String, u8>,
}

impl InterviewFeedback {
    pub const MIN_SCORE: u8 = 1;
    pub const MAX_SCORE: u8 = 5;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    pub id: InterviewId,
    #[serde(default)]
    pub interviewer_id: Option<ProfileId>,
    pub status: InterviewStatus,
    pub scheduled_at: DateTime<Utc>,
    pub application_id: ApplicationId,
    #[serde(default)]
    pub feedback: Option<InterviewFeedback>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Offer {
    pub id: OfferId,
    #[serde(default)]
    pub application_id: Option<ApplicationId>,
    pub status: OfferStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub benefits: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: ProfileId,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl Profile {
    /// "First Last", then email, then the raw id.
    pub fn display_name(&self) -> String {
        let full = [self.first_name.as_deref(), self.last_name.as_deref()]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if !full.is_empty() {
            return full;
        }
        match self.email.as_deref().map(str::trim) {
            Some(email) if !email.is_empty() => email.to_string(),
            _ => self.id.0.clone(),
        }
    }
}

/// Everything one dashboard computation reads, fetched for a single tenant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSnapshot {
    #[serde(default)]
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub applications: Vec<Application>,
    #[serde(default)]
    pub interviews: Vec<Interview>,
    #[serde(default)]
    pub offers: Vec<Offer>,
    #[serde(default)]
    pub departments: Vec<Department>,
    #[serde(default)]
    pub profiles: Vec<Profile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_application_status_is_preserved() {
        let status: ApplicationStatus =
            serde_json::from_str("\"on_hold\"").expect("status deserializes");
        assert_eq!(status, ApplicationStatus::Other("on_hold".to_string()));
        assert_eq!(
            serde_json::to_string(&status).expect("status serializes"),
            "\"on_hold\""
        );
    }

    #[test]
    fn locale_codes_follow_the_primary_language_tag() {
        assert_eq!(Locale::parse("ar-SA").code(), "ar");
        assert_eq!(Locale::parse("ar,en;q=0.5").code(), "ar");
        assert_eq!(Locale::parse("fr-CA").code(), "en");
        assert_eq!(Locale::parse("").code(), "en");
    }

    #[test]
    fn statuses_are_case_insensitive() {
        assert_eq!(
            ApplicationStatus::from("Hired".to_string()),
            ApplicationStatus::Hired
        );
        assert!(JobStatus::from("PUBLISHED".to_string()).is_active());
        assert!(!JobStatus::from("draft".to_string()).is_active());
    }

    #[test]
    fn blank_source_falls_back_to_direct() {
        let application = Application {
            id: ApplicationId("a-1".to_string()),
            status: ApplicationStatus::New,
            source: Some("  ".to_string()),
            job_id: JobId("j-1".to_string()),
            candidate_id: None,
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: None,
        };
        assert_eq!(application.source_label(), "direct");
    }

    #[test]
    fn profile_display_name_falls_back_to_email_then_id() {
        let mut profile = Profile {
            id: ProfileId("p-1".to_string()),
            first_name: Some("Layla".to_string()),
            last_name: Some("Haddad".to_string()),
            email: Some("layla@example.com".to_string()),
        };
        assert_eq!(profile.display_name(), "Layla Haddad");

        profile.first_name = None;
        profile.last_name = Some(" ".to_string());
        assert_eq!(profile.display_name(), "layla@example.com");

        profile.email = None;
        assert_eq!(profile.display_name(), "p-1");
    }

    #[test]
    fn locale_parses_language_tags() {
        assert_eq!(Locale::parse("ar-SA"), Locale::Ar);
        assert_eq!(Locale::parse("AR"), Locale::Ar);
        assert_eq!(Locale::parse("en_US"), Locale::En);
        assert_eq!(Locale::parse("fr"), Locale::En);
        assert_eq!(Locale::parse(""), Locale::En);
    }
}
