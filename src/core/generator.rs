use crate::{
    core::prompt::{
        assemble_plan, build_day_prompt, build_plan_prompt, fallback_block, validate_block,
    },
    error::{LagError, Result},
    types::{DayBlock, SchedulePlan, TripParameters},
};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

/// Anything that turns a prompt into generated text.
///
/// Return [`LagError::Unavailable`] when the service cannot be reached at
/// all; any other error only costs the current day its generated advice.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Builds recovery plans one day at a time
#[derive(Debug)]
pub struct ScheduleGenerator<G> {
    generator: G,
    in_progress: AtomicBool,
}

/// Clears the in-progress flag when generation ends, however it ends.
struct InProgress<'a>(&'a AtomicBool);

impl<'a> InProgress<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| LagError::Busy)?;
        Ok(Self(flag))
    }
}

impl Drop for InProgress<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<G: TextGenerator> ScheduleGenerator<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            in_progress: AtomicBool::new(false),
        }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// True while a plan is being generated.
    pub fn is_generating(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }

    /// Generate Day 0 through Day N, one request per day, in order.
    ///
    /// Rejected or failed days get the fallback block. Only an unreachable
    /// service aborts, and then no partial plan is returned. A call made
    /// while another is still running fails with [`LagError::Busy`].
    pub async fn generate(&self, params: &TripParameters) -> Result<SchedulePlan> {
        let _guard = InProgress::acquire(&self.in_progress)?;
        let effective_days = params.effective_days();
        let mut plan = SchedulePlan::new();

        for day in 0..=effective_days {
            info!(
                day,
                from = %params.origin_timezone,
                to = %params.destination_timezone,
                age = %params.age_group,
                class = %params.flight_class,
                effective_days,
                "Generating recovery block"
            );

            let prompt = build_day_prompt(params, day);
            let block = match self.generator.generate(&prompt).await {
                Ok(response) => match validate_block(&response, day) {
                    Some(text) => DayBlock::generated(day, text),
                    None => {
                        warn!(day, "reply missing day marker, using fallback block");
                        DayBlock::fallback(day, fallback_block(day))
                    }
                },
                Err(err) if err.aborts_plan() => {
                    info!(day, error = %err, "generation service unavailable, aborting plan");
                    return Err(err);
                }
                Err(err) => {
                    warn!(day, error = %err, "generation failed, using fallback block");
                    DayBlock::fallback(day, fallback_block(day))
                }
            };

            plan.push(block);
        }

        info!(
            days = plan.len(),
            fallbacks = plan.fallback_count(),
            "Recovery plan complete"
        );
        Ok(plan)
    }

    /// Ask for the whole plan in one request, then split it into Day 0..=N.
    ///
    /// Days the reply leaves out, Day 0 included, get the fallback block.
    pub async fn generate_combined(&self, params: &TripParameters) -> Result<SchedulePlan> {
        let _guard = InProgress::acquire(&self.in_progress)?;
        let effective_days = params.effective_days();
        info!(effective_days, "Generating combined recovery plan");

        let raw = match self.generator.generate(&build_plan_prompt(params)).await {
            Ok(raw) => raw,
            Err(err) if err.aborts_plan() => {
                info!(error = %err, "generation service unavailable, aborting plan");
                return Err(err);
            }
            Err(err) => {
                warn!(error = %err, "combined generation failed, using fallback blocks");
                String::new()
            }
        };

        let plan = assemble_plan(&raw, effective_days);
        info!(
            days = plan.len(),
            fallbacks = plan.fallback_count(),
            "Combined recovery plan complete"
        );
        Ok(plan)
    }
}
