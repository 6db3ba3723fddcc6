//! Progress handler trait and events

use crate::pipeline::Stage;
use std::time::Duration;

/// Events emitted while the pipeline runs
#[derive(Debug, Clone)]
pub enum ProgressEvent {
    /// A run of one or more stages started
    RunStarted { stages: usize },

    StageStarted { stage: Stage },

    StageComplete { stage: Stage, duration: Duration },

    /// Stage returned an error; the run stops here
    StageFailed { stage: Stage, error: String },

    /// Archive finished but some uploads failed
    ArchiveIncomplete { failed: usize },

    /// Every requested stage finished
    Completed { total_time: Duration },
}

/// Trait for handling progress events
pub trait ProgressHandler: Send + Sync {
    /// Called when a progress event occurs
    fn on_progress(&self, event: &ProgressEvent);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingHandler {
        count: Arc<AtomicUsize>,
    }

    impl ProgressHandler for CountingHandler {
        fn on_progress(&self, _event: &ProgressEvent) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_progress_events() {
        let count = Arc::new(AtomicUsize::new(0));
        let handler = CountingHandler {
            count: count.clone(),
        };

        handler.on_progress(&ProgressEvent::StageStarted {
            stage: Stage::Extract,
        });
        handler.on_progress(&ProgressEvent::StageComplete {
            stage: Stage::Extract,
            duration: Duration::from_millis(50),
        });
        handler.on_progress(&ProgressEvent::Completed {
            total_time: Duration::from_secs(5),
        });

        assert_eq!(count.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_event_debug() {
        let event = ProgressEvent::StageStarted {
            stage: Stage::Transform,
        };
        let debug_str = format!("{:?}", event);
        assert!(debug_str.contains("StageStarted"));
        assert!(debug_str.contains("Transform"));
    }
}
