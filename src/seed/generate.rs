//! Random value helpers shared by the seeders.

use crate::seed::context::SeedContext;
use crate::seed::plan::SeedStep;
use crate::store::Backend;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use rand::seq::SliceRandom;
use rand::Rng;

/// Length substituted for a parent window that ends before it starts.
pub const FALLBACK_WINDOW_DAYS: i64 = 90;

/// Inclusive date range a child record must fall within.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    /// Uniform date in the window.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> NaiveDate {
        self.start + Duration::days(rng.gen_range(0..=self.days()))
    }

    /// Uniform sub-window: two sampled dates, ordered.
    pub fn sample_window<R: Rng + ?Sized>(&self, rng: &mut R) -> DateWindow {
        let a = self.sample(rng);
        let b = self.sample(rng);
        DateWindow {
            start: a.min(b),
            end: a.max(b),
        }
    }
}

/// The window of a parent record, patched when its end precedes its start.
///
/// The patch is reported as a warning naming the parent so bad upstream
/// rows stay visible.
pub fn parent_window<B: Backend + ?Sized>(
    ctx: &SeedContext<'_, B>,
    step: SeedStep,
    parent: &str,
    parent_id: &str,
    start: NaiveDate,
    end: NaiveDate,
) -> DateWindow {
    if let Some(window) = DateWindow::new(start, end) {
        return window;
    }
    let patched = start + Duration::days(FALLBACK_WINDOW_DAYS);
    ctx.warn(
        step,
        format!(
            "{} {} ends before it starts ({} < {}); using {}..{} instead",
            parent, parent_id, end, start, start, patched
        ),
    );
    DateWindow {
        start,
        end: patched,
    }
}

/// Uniform in `1..=max`, or 0 when `max` is 0.
pub fn count_up_to<R: Rng + ?Sized>(rng: &mut R, max: usize) -> usize {
    if max == 0 {
        0
    } else {
        rng.gen_range(1..=max)
    }
}

/// Uniform in `0..=max`.
pub fn count_at_most<R: Rng + ?Sized>(rng: &mut R, max: usize) -> usize {
    rng.gen_range(0..=max)
}

pub fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    items.choose(rng)
}

/// `pick` from a word list that is never empty.
pub fn word<R: Rng + ?Sized>(rng: &mut R, words: &[&'static str]) -> &'static str {
    words.choose(rng).copied().unwrap_or_default()
}

/// Amount rounded to cents.
pub fn money<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    (rng.gen_range(min..max) * 100.0).round() / 100.0
}

pub fn phone<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!(
        "+1-{:03}-{:03}-{:04}",
        rng.gen_range(200..999),
        rng.gen_range(100..999),
        rng.gen_range(0..10000)
    )
}

/// Lowercase alphanumerics only, for emails and URLs.
pub fn slug(name: &str) -> String {
    name.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

pub fn days_before<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate, max_days: i64) -> NaiveDate {
    today - Duration::days(rng.gen_range(0..=max_days))
}

/// Timestamp up to `max_minutes` before `now`.
pub fn minutes_before<R: Rng + ?Sized>(
    rng: &mut R,
    now: DateTime<Utc>,
    max_minutes: i64,
) -> DateTime<Utc> {
    now - Duration::minutes(rng.gen_range(0..=max_minutes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::progress::{ProgressRecorder, StepStatus};
    use crate::store::MemoryBackend;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_samples_stay_inside_window() {
        let mut rng = StdRng::seed_from_u64(7);
        let window = DateWindow::new(date(2024, 1, 1), date(2024, 1, 10)).unwrap();
        for _ in 0..500 {
            assert!(window.contains(window.sample(&mut rng)));
            let inner = window.sample_window(&mut rng);
            assert!(inner.start <= inner.end);
            assert!(window.contains(inner.start) && window.contains(inner.end));
        }
    }

    #[test]
    fn test_single_day_window() {
        let mut rng = StdRng::seed_from_u64(1);
        let day = date(2024, 6, 1);
        let window = DateWindow::new(day, day).unwrap();
        assert_eq!(window.sample(&mut rng), day);
    }

    #[test]
    fn test_inverted_parent_window_is_patched_and_flagged() {
        let backend = MemoryBackend::new();
        let recorder = ProgressRecorder::new();
        let ctx = SeedContext::new(&backend, &recorder);

        let window = parent_window(
            &ctx,
            SeedStep::Milestones,
            "Project",
            "p-1",
            date(2024, 5, 1),
            date(2024, 4, 1),
        );

        assert_eq!(window.start, date(2024, 5, 1));
        assert_eq!(window.end, date(2024, 7, 30));
        let warnings = recorder.with_status(StepStatus::Warning);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("Project p-1 ends before it starts"));
    }

    #[test]
    fn test_counts_and_slugs() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(count_up_to(&mut rng, 0), 0);
        for _ in 0..100 {
            let n = count_up_to(&mut rng, 4);
            assert!((1..=4).contains(&n));
        }
        assert_eq!(slug("Apex Dynamics & Co."), "apexdynamicsco");
        let amount = money(&mut rng, 10.0, 20.0);
        assert_eq!((amount * 100.0).round() / 100.0, amount);
    }
}
