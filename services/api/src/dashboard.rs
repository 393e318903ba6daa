use crate::infra::{load_repository, parse_timestamp};
use ats_analytics::analytics::{
    AnalyticsService, DashboardStats, DateRangeToken, Locale, TenantContext,
};
use ats_analytics::config::AppConfig;
use ats_analytics::error::AppError;
use ats_analytics::telemetry::{self, LogSink};
use chrono::{DateTime, Utc};
use clap::Args;
use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct DashboardArgs {
    /// JSON dataset to read (defaults to ANALYTICS_DATASET_PATH)
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Tenant whose records are aggregated
    #[arg(long)]
    pub(crate) tenant: String,
    /// Reporting period: 7d, 30d, 90d, 12m, or all
    #[arg(long, default_value = "30d")]
    pub(crate) range: String,
    /// Label language (en or ar)
    #[arg(long, default_value = "en")]
    pub(crate) lang: String,
    /// Evaluate as of this RFC 3339 timestamp instead of now
    #[arg(long, value_parser = crate::infra::parse_timestamp)]
    pub(crate) now: Option<DateTime<Utc>>,
    /// Print the dashboard as JSON instead of a text summary
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct TenantsArgs {
    /// JSON dataset to read (defaults to ANALYTICS_DATASET_PATH)
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
}

pub(crate) async fn run_dashboard(args: DashboardArgs) -> Result<(), AppError> {
    let DashboardArgs {
        dataset,
        tenant,
        range,
        lang,
        now,
        json,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init_with_sink(&config.telemetry, LogSink::Stderr)?;

    let dataset = dataset.or_else(|| config.analytics.dataset_path.clone());
    let repository = Arc::new(load_repository(dataset.as_deref())?);
    let service = AnalyticsService::new(repository, &config.analytics);

    let tenant = TenantContext::new(tenant, Locale::parse(&lang));
    let now = now.unwrap_or_else(Utc::now);
    let stats = service
        .dashboard(&tenant, DateRangeToken::parse(&range), now)
        .await?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &stats).map_err(std::io::Error::from)?;
        writeln!(out)?;
    } else {
        write!(out, "{}", DashboardText::new(&tenant, &stats))?;
    }
    Ok(())
}

pub(crate) fn list_tenants(args: TenantsArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let dataset = args.dataset.or(config.analytics.dataset_path);
    let Some(path) = dataset else {
        println!("No dataset configured. Pass --dataset or set ANALYTICS_DATASET_PATH.");
        return Ok(());
    };

    let repository = ats_analytics::analytics::DatasetRepository::from_path(&path)?;
    println!("Tenants in {}", path.display());
    for tenant in repository.tenant_ids() {
        println!("- {tenant}");
    }
    Ok(())
}

/// Plain-text rendering of a dashboard for terminal demos.
pub(crate) struct DashboardText<'a> {
    tenant: &'a TenantContext,
    stats: &'a DashboardStats,
}

impl<'a> DashboardText<'a> {
    pub(crate) fn new(tenant: &'a TenantContext, stats: &'a DashboardStats) -> Self {
        Self { tenant, stats }
    }
}

impl fmt::Display for DashboardText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats;
        let overview = &stats.overview;

        writeln!(
            f,
            "Hiring dashboard for {} [{}]",
            self.tenant.tenant_id,
            self.tenant.locale.code()
        )?;
        writeln!(
            f,
            "Period: {} ({} -> {})",
            stats.period_label,
            stats.period_start.format("%Y-%m-%d"),
            stats.period_end.format("%Y-%m-%d")
        )?;

        writeln!(f, "\nOverview")?;
        writeln!(
            f,
            "- Jobs: {} total, {} active",
            overview.total_jobs, overview.active_jobs
        )?;
        writeln!(
            f,
            "- Applications: {} from {} candidates",
            overview.total_applications, overview.total_candidates
        )?;
        writeln!(
            f,
            "- Interviews: {} in period, {} upcoming",
            overview.total_interviews, overview.upcoming_interviews
        )?;
        writeln!(
            f,
            "- Hires: {} (avg {} days to hire, {} outliers excluded)",
            overview.total_hires, overview.avg_time_to_hire, stats.time_to_hire.excluded_outliers
        )?;
        writeln!(
            f,
            "- Offer acceptance: {}%",
            overview.offer_acceptance_rate
        )?;

        writeln!(f, "\nHiring funnel")?;
        for stage in &stats.hiring_funnel {
            writeln!(
                f,
                "- {}: {} ({}%)",
                stage.stage_label, stage.count, stage.percentage
            )?;
        }

        if stats.applications_by_source.is_empty() {
            writeln!(f, "\nSources: none")?;
        } else {
            writeln!(f, "\nSources")?;
            for source in &stats.applications_by_source {
                writeln!(
                    f,
                    "- {}: {} applications, {} interviews, {} hires ({}% conversion)",
                    source.source,
                    source.count,
                    source.interviews,
                    source.hires,
                    source.conversion_rate
                )?;
            }
        }

        if !stats.top_performing_jobs.is_empty() {
            writeln!(f, "\nTop jobs")?;
            for job in &stats.top_performing_jobs {
                writeln!(
                    f,
                    "- {} [{}]: {} applications, {} hires ({}%)",
                    job.title, job.department, job.applications, job.hires, job.conversion_rate
                )?;
            }
        }

        if !stats.team_activity.is_empty() {
            writeln!(f, "\nTeam activity")?;
            for member in &stats.team_activity {
                let rating = member
                    .average_rating
                    .map(|rating| format!(", avg rating {rating:.1}"))
                    .unwrap_or_default();
                writeln!(
                    f,
                    "- {}: score {} ({} interviews{})",
                    member.name, member.score, member.interviews, rating
                )?;
            }
        }

        writeln!(f, "\nPeriod comparison")?;
        for entry in &stats.period_comparison {
            writeln!(
                f,
                "- {}: {} vs {} ({:+}, {:+}%)",
                entry.label, entry.current, entry.previous, entry.change, entry.change_percent
            )?;
        }

        writeln!(f, "\nDrop-off")?;
        for entry in &stats.dropoff_analysis {
            writeln!(
                f,
                "- {} -> {}: {} lost ({}%)",
                entry.from_stage.label(),
                entry.to_stage.label(),
                entry.dropoff_count,
                entry.dropoff_rate
            )?;
        }

        writeln!(f, "\nGoals")?;
        for goal in &stats.goals {
            writeln!(
                f,
                "- {}: {}/{} ({}%) due {}",
                goal.title, goal.current, goal.target, goal.progress, goal.deadline
            )?;
        }

        Ok(())
    }
}
