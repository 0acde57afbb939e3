use crate::seed::plan::SeedStep;
use crate::seed::progress::{ProgressSink, SeedEvent, StepStatus};
use crate::store::Backend;
use chrono::{DateTime, NaiveDate, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub const DEFAULT_BATCH_SIZE: usize = 50;

/// Everything a seeder needs besides its parent records: the injected
/// backend client, the progress sink, the RNG and the run's clock.
pub struct SeedContext<'a, B: Backend + ?Sized> {
    backend: &'a B,
    progress: &'a dyn ProgressSink,
    batch_size: usize,
    rng: StdRng,
    now: DateTime<Utc>,
}

impl<'a, B: Backend + ?Sized> SeedContext<'a, B> {
    pub fn new(backend: &'a B, progress: &'a dyn ProgressSink) -> Self {
        Self {
            backend,
            progress,
            batch_size: DEFAULT_BATCH_SIZE,
            rng: StdRng::from_entropy(),
            now: Utc::now(),
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Make generation reproducible.
    pub fn with_rng_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Pin "now" for date-relative generation.
    pub fn with_clock(mut self, now: DateTime<Utc>) -> Self {
        self.now = now;
        self
    }

    pub fn backend(&self) -> &'a B {
        self.backend
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    pub fn now(&self) -> DateTime<Utc> {
        self.now
    }

    pub fn today(&self) -> NaiveDate {
        self.now.date_naive()
    }

    pub fn emit(&self, event: SeedEvent) {
        self.progress.emit(&event);
    }

    pub fn progress(&self, step: SeedStep, message: impl Into<String>) {
        self.emit(SeedEvent::new(step, StepStatus::Progress, message));
    }

    pub fn warn(&self, step: SeedStep, message: impl Into<String>) {
        self.emit(SeedEvent::new(step, StepStatus::Warning, message));
    }

    /// Report a missing required parent; callers then return an empty result.
    pub fn skip(&self, step: SeedStep, missing: &str) {
        self.emit(SeedEvent::new(
            step,
            StepStatus::Skipped,
            format!("Skipping {}: Missing {} data.", step, missing),
        ));
    }
}
