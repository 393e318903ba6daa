use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::domain::{ApplicationStatus, DepartmentId, JobId, ProfileId};
use super::range::DateRangeToken;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub date_range: DateRangeToken,
    pub period_label: &'static str,
    pub period_start: DateTime<Utc>,
    pub period_end: DateTime<Utc>,
    pub overview: OverviewStats,
    pub hiring_funnel: Vec<FunnelStageEntry>,
    pub applications_by_source: Vec<SourceConversionEntry>,
    pub applications_trend: Vec<TrendPoint>,
    pub time_to_hire: TimeToHireStats,
    pub top_performing_jobs: Vec<JobPerformanceEntry>,
    pub team_activity: Vec<TeamActivityEntry>,
    pub pipeline_velocity: Vec<PipelineVelocityEntry>,
    pub period_comparison: Vec<PeriodComparisonEntry>,
    pub department_metrics: Vec<DepartmentMetricsEntry>,
    pub dropoff_analysis: Vec<DropoffEntry>,
    pub goals: Vec<GoalProgressEntry>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewStats {
    pub total_jobs: usize,
    pub active_jobs: usize,
    pub total_candidates: usize,
    pub total_applications: usize,
    pub total_interviews: usize,
    pub upcoming_interviews: usize,
    pub total_hires: usize,
    pub avg_time_to_hire: i64,
    pub offer_acceptance_rate: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelStageEntry {
    pub stage: ApplicationStatus,
    pub stage_label: &'static str,
    pub count: usize,
    pub percentage: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceConversionEntry {
    pub source: String,
    pub count: usize,
    pub interviews: usize,
    pub hires: usize,
    pub conversion_rate: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub applications: usize,
    pub hires: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeToHireStats {
    pub average: i64,
    /// Hires whose day span fell outside the accepted window.
    pub excluded_outliers: usize,
    pub by_department: Vec<DepartmentHireTime>,
    pub by_job: Vec<JobHireTime>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentHireTime {
    pub department: String,
    pub average_days: i64,
    pub hires: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobHireTime {
    pub job_id: JobId,
    pub job_title: String,
    pub average_days: i64,
    pub hires: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPerformanceEntry {
    pub job_id: JobId,
    pub title: String,
    pub department: String,
    pub applications: usize,
    pub interviews: usize,
    pub hires: usize,
    pub conversion_rate: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamActivityEntry {
    pub interviewer_id: ProfileId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub interviews: usize,
    pub completed_interviews: usize,
    pub applications_touched: usize,
    pub score: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineVelocityEntry {
    pub stage: ApplicationStatus,
    pub stage_label: &'static str,
    pub candidates: usize,
    /// Always zero: no stage transition timestamps exist to measure dwell time.
    pub avg_days: i64,
    pub computable: bool,
    pub note: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonMetric {
    Applications,
    Hires,
    Interviews,
}

impl ComparisonMetric {
    pub const fn ordered() -> [Self; 3] {
        [Self::Applications, Self::Hires, Self::Interviews]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Applications => "Applications",
            Self::Hires => "Hires",
            Self::Interviews => "Interviews",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodComparisonEntry {
    pub metric: ComparisonMetric,
    pub label: &'static str,
    pub current: usize,
    pub previous: usize,
    pub change: i64,
    pub change_percent: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DepartmentMetricsEntry {
    pub department_id: DepartmentId,
    pub name: String,
    pub open_jobs: usize,
    pub applications: usize,
    pub interviews: usize,
    pub hires: usize,
    pub avg_time_to_fill: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DropoffEntry {
    pub from_stage: ApplicationStatus,
    pub to_stage: ApplicationStatus,
    pub reached_from: usize,
    pub reached_to: usize,
    pub dropoff_count: usize,
    pub dropoff_rate: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalKind {
    MonthlyHires,
    InterviewPipeline,
    ApplicationTarget,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalStatus {
    InProgress,
    Achieved,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgressEntry {
    pub kind: GoalKind,
    pub title: &'static str,
    pub current: usize,
    pub target: usize,
    pub progress: i64,
    pub deadline: NaiveDate,
    pub status: GoalStatus,
}
