use crate::checks::{AuditContext, Check, CheckSpec};
use crate::policy::RunFilters;
use crate::report::build_report;
use idpguard_types::{AuditReport, CheckResult, Metadata, RunMeta, ToolMeta, ids};
use std::any::Any;
use std::error::Error as StdError;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use time::OffsetDateTime;
use tracing::{debug, info_span, warn};

/// Runs registered checks in order and aggregates their results.
///
/// A check that returns an error or panics produces an `error` result; it
/// never stops the remaining checks.
pub struct Orchestrator {
    filters: RunFilters,
    checks: Vec<Box<dyn Check>>,
}

impl Orchestrator {
    pub fn new(filters: RunFilters) -> Self {
        Self {
            filters,
            checks: Vec::new(),
        }
    }

    pub fn register<C: Check + 'static>(&mut self, check: C) {
        self.checks.push(Box::new(check));
    }

    pub fn register_many<I, C>(&mut self, checks: I)
    where
        I: IntoIterator<Item = C>,
        C: Check + 'static,
    {
        for check in checks {
            self.register(check);
        }
    }

    pub fn registered(&self) -> impl Iterator<Item = &CheckSpec> {
        self.checks.iter().map(|c| c.spec())
    }

    /// Ids that a run would execute, in execution order.
    pub fn planned_checks(&self) -> Vec<&str> {
        self.selected().map(|c| c.spec().id.as_str()).collect()
    }

    fn selected(&self) -> impl Iterator<Item = &(dyn Check + 'static)> {
        self.checks
            .iter()
            .map(|c| c.as_ref())
            .filter(|c| self.filters.admits(c.spec()))
    }

    pub fn run(&self, ctx: &AuditContext<'_>) -> AuditReport {
        let started_at = OffsetDateTime::now_utc();
        let clock = Instant::now();

        let results: Vec<CheckResult> = self.selected().map(|check| execute(check, ctx)).collect();

        let ended_at = OffsetDateTime::now_utc();
        let meta = RunMeta {
            tool: ToolMeta {
                name: "idpguard".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            target: ctx.target.to_string(),
            started_at,
            ended_at,
            duration_ms: elapsed_ms(clock),
        };
        build_report(meta, results)
    }
}

fn execute(check: &dyn Check, ctx: &AuditContext<'_>) -> CheckResult {
    let spec = check.spec();
    let span = info_span!(parent: &ctx.span, "check", id = %spec.id, category = %spec.category);
    let _guard = span.enter();
    debug!("starting");

    let clock = Instant::now();
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| check.evaluate(ctx)));
    let duration_ms = elapsed_ms(clock);

    let result = match outcome {
        Ok(Ok(result)) => result,
        Ok(Err(err)) => {
            warn!(error = %err, "check returned an error");
            isolated_failure(spec, "error", err.to_string(), error_chain(&err))
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(error = %message, "check panicked");
            isolated_failure(spec, "panic", message, Vec::new())
        }
    };
    debug!(status = ?result.status(), duration_ms, "finished");
    result.with_duration_ms(duration_ms)
}

fn isolated_failure(spec: &CheckSpec, kind: &str, message: String, chain: Vec<String>) -> CheckResult {
    let metadata: Metadata = Metadata::builder()
        .insert(ids::META_ERROR, message.clone())
        .insert(ids::META_ERROR_KIND, kind)
        .insert_opt(ids::META_ERROR_CHAIN, (!chain.is_empty()).then_some(chain))
        .build();
    CheckResult::error(&spec.id, spec.category, format!("{} failed to run: {message}", spec.name))
        .with_metadata(metadata)
}

/// Messages of the error's `source()` chain, outermost cause first.
fn error_chain(err: &dyn StdError) -> Vec<String> {
    let mut chain = Vec::new();
    let mut source = err.source();
    while let Some(cause) = source {
        chain.push(cause.to_string());
        source = cause.source();
    }
    chain
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "check panicked with a non-string payload".to_string()
    }
}

fn elapsed_ms(clock: Instant) -> u64 {
    u64::try_from(clock.elapsed().as_millis()).unwrap_or(u64::MAX)
}
