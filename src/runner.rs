//! Concurrent report generation.
//!
//! Each member-month is a pure, synchronous computation. The [`ReportRunner`]
//! fans many of them out on tokio's blocking pool, every worker holding its
//! own `Arc` clone of the shared holiday snapshot and settings.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::calculation::{DutyAggregator, HolidayCalendar};
use crate::config::{ConfigLoader, EngineSettings};
use crate::error::{EngineError, EngineResult};
use crate::models::{CalendarEvent, ManualDutyEntry, Member, MemberMonthReport, YearMonth};

/// One member-month to produce a report for.
#[derive(Debug, Clone)]
pub struct ReportJob {
    /// The roster member.
    pub member: Member,
    /// The month to report.
    pub period: YearMonth,
    /// The member's calendar events for the fetch window.
    pub events: Vec<CalendarEvent>,
    /// Manual entries for everyone; filtered per member during aggregation.
    pub entries: Arc<Vec<ManualDutyEntry>>,
}

/// Builds one job per selected roster member.
///
/// With a `target_id`, only that member is selected (ids compare
/// case-insensitively); an unknown id is [`EngineError::MemberNotFound`].
/// Members without a calendar id are skipped. Events are looked up by
/// member id; members with no entry in `events_by_member` get none.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use std::sync::Arc;
/// use duty_hours_engine::models::{Member, YearMonth};
/// use duty_hours_engine::runner::jobs_for_members;
///
/// let members = vec![
///     Member::new("A", "Dr. A").with_calendar("a@cal"),
///     Member::new("C", "Dr. C"),
/// ];
/// let period = YearMonth::parse("202506").unwrap();
///
/// let jobs = jobs_for_members(&members, None, period, HashMap::new(), Arc::new(vec![])).unwrap();
/// assert_eq!(jobs.len(), 1);
///
/// let jobs = jobs_for_members(&members, Some("a"), period, HashMap::new(), Arc::new(vec![])).unwrap();
/// assert_eq!(jobs[0].member.name, "Dr. A");
///
/// assert!(jobs_for_members(&members, Some("Z"), period, HashMap::new(), Arc::new(vec![])).is_err());
/// ```
pub fn jobs_for_members(
    members: &[Member],
    target_id: Option<&str>,
    period: YearMonth,
    mut events_by_member: HashMap<String, Vec<CalendarEvent>>,
    entries: Arc<Vec<ManualDutyEntry>>,
) -> EngineResult<Vec<ReportJob>> {
    let target = target_id.map(str::to_uppercase);

    if let Some(target) = &target {
        if !members.iter().any(|m| m.matches_id(target)) {
            return Err(EngineError::MemberNotFound { id: target.clone() });
        }
    }

    let mut jobs = Vec::new();
    for member in members {
        if target.as_deref().is_some_and(|t| !member.matches_id(t)) {
            continue;
        }
        if !member.has_calendar() {
            warn!(member = %member.name, id = %member.id, "Member has no calendar id; skipping");
            continue;
        }
        jobs.push(ReportJob {
            member: member.clone(),
            period,
            events: events_by_member.remove(&member.id).unwrap_or_default(),
            entries: Arc::clone(&entries),
        });
    }

    Ok(jobs)
}

/// Produces member-month reports over a shared holiday snapshot.
#[derive(Debug, Clone)]
pub struct ReportRunner {
    calendar: Arc<HolidayCalendar>,
    settings: Arc<EngineSettings>,
}

impl ReportRunner {
    /// Creates a runner over the given settings and holiday snapshot.
    pub fn new(settings: EngineSettings, calendar: HolidayCalendar) -> Self {
        Self {
            calendar: Arc::new(calendar),
            settings: Arc::new(settings),
        }
    }

    /// Creates a runner from loaded configuration, returning the roster
    /// alongside it.
    pub fn from_config(config: ConfigLoader) -> (Self, Vec<Member>) {
        let (settings, calendar, members) = config.into_parts();
        (Self::new(settings, calendar), members)
    }

    /// Returns the holiday snapshot.
    pub fn calendar(&self) -> &HolidayCalendar {
        &self.calendar
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Produces one report synchronously.
    pub fn run_one(&self, job: &ReportJob) -> MemberMonthReport {
        DutyAggregator::new(&self.calendar, &self.settings).build_report(
            &job.member,
            job.period,
            &job.events,
            &job.entries,
        )
    }

    /// Produces all reports concurrently on the blocking pool.
    ///
    /// Reports come back in job order regardless of completion order. A
    /// worker that panics fails the whole run with
    /// [`EngineError::CalculationError`].
    pub async fn generate(&self, jobs: Vec<ReportJob>) -> EngineResult<Vec<MemberMonthReport>> {
        let started = Instant::now();
        let job_count = jobs.len();
        let mut set = JoinSet::new();

        for (index, job) in jobs.into_iter().enumerate() {
            let runner = self.clone();
            set.spawn_blocking(move || (index, runner.run_one(&job)));
        }

        let mut slots: Vec<Option<MemberMonthReport>> = vec![None; job_count];
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, report)) => slots[index] = Some(report),
                Err(err) => {
                    error!(error = %err, "Report worker failed");
                    set.abort_all();
                    return Err(EngineError::CalculationError {
                        message: format!("report worker failed: {}", err),
                    });
                }
            }
        }

        let reports: Vec<MemberMonthReport> = slots.into_iter().flatten().collect();
        info!(
            reports = reports.len(),
            duration_us = started.elapsed().as_micros() as u64,
            "Generated member-month reports"
        );
        Ok(reports)
    }
}
