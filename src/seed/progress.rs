//! Structured progress reporting for seed runs.

use crate::seed::plan::SeedStep;
use parking_lot::Mutex;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    Started,
    Progress,
    Skipped,
    Warning,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeedEvent {
    pub step: SeedStep,
    pub status: StepStatus,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SeedEvent {
    pub fn new(step: SeedStep, status: StepStatus, message: impl Into<String>) -> Self {
        Self {
            step,
            status,
            message: message.into(),
            count: None,
            error: None,
        }
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }

    pub fn with_error(mut self, error: impl fmt::Display) -> Self {
        self.error = Some(format!("{:#}", error));
        self
    }
}

impl fmt::Display for SeedEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(error) = &self.error {
            write!(f, ": {}", error)?;
        }
        Ok(())
    }
}

/// Receives every event of a seed run, in order.
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: &SeedEvent);
}

impl<F> ProgressSink for F
where
    F: Fn(&SeedEvent) + Send + Sync,
{
    fn emit(&self, event: &SeedEvent) {
        self(event)
    }
}

/// Writes events through the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgress;

impl ProgressSink for LogProgress {
    fn emit(&self, event: &SeedEvent) {
        match event.status {
            StepStatus::Failed => log::error!("[{}] {}", event.step, event),
            StepStatus::Warning | StepStatus::Skipped => log::warn!("[{}] {}", event.step, event),
            StepStatus::Progress => log::debug!("[{}] {}", event.step, event),
            StepStatus::Started | StepStatus::Completed => {
                log::info!("[{}] {}", event.step, event)
            }
        }
    }
}

/// Collects events, optionally echoing them to the log.
#[derive(Debug, Default)]
pub struct ProgressRecorder {
    events: Mutex<Vec<SeedEvent>>,
    echo: bool,
}

impl ProgressRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn logging() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            echo: true,
        }
    }

    pub fn events(&self) -> Vec<SeedEvent> {
        self.events.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events.lock().iter().map(ToString::to_string).collect()
    }

    pub fn with_status(&self, status: StepStatus) -> Vec<SeedEvent> {
        self.events
            .lock()
            .iter()
            .filter(|event| event.status == status)
            .cloned()
            .collect()
    }

    pub fn for_step(&self, step: SeedStep) -> Vec<SeedEvent> {
        self.events
            .lock()
            .iter()
            .filter(|event| event.step == step)
            .cloned()
            .collect()
    }
}

impl ProgressSink for ProgressRecorder {
    fn emit(&self, event: &SeedEvent) {
        if self.echo {
            LogProgress.emit(event);
        }
        self.events.lock().push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recorder_keeps_order_and_filters() {
        let recorder = ProgressRecorder::new();
        recorder.emit(&SeedEvent::new(SeedStep::Regions, StepStatus::Started, "Seeding Regions"));
        recorder.emit(
            &SeedEvent::new(SeedStep::Regions, StepStatus::Completed, "Regions done").with_count(3),
        );
        recorder.emit(&SeedEvent::new(
            SeedStep::Projects,
            StepStatus::Skipped,
            "Skipping Projects: Missing companies data.",
        ));

        assert_eq!(recorder.events().len(), 3);
        assert_eq!(recorder.for_step(SeedStep::Regions).len(), 2);
        assert_eq!(recorder.with_status(StepStatus::Completed)[0].count, Some(3));
        assert_eq!(
            recorder.messages()[2],
            "Skipping Projects: Missing companies data."
        );
    }

    #[test]
    fn test_closure_sink_and_error_display() {
        let seen = Mutex::new(Vec::new());
        let sink = |event: &SeedEvent| seen.lock().push(event.to_string());
        sink.emit(
            &SeedEvent::new(SeedStep::Hr, StepStatus::Failed, "Failed to insert batch")
                .with_error("connection reset"),
        );
        assert_eq!(seen.lock()[0], "Failed to insert batch: connection reset");
    }

    #[test]
    fn test_event_serializes_without_empty_fields() {
        let event = SeedEvent::new(SeedStep::ChatGroups, StepStatus::Warning, "No projects");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["step"], "chat-groups");
        assert_eq!(json["status"], "warning");
        assert!(json.get("count").is_none());
    }
}
