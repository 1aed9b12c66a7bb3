use crate::summary::RunSummary;
use std::sync::mpsc::Sender;

/// Receives the progress of a rename batch.
///
/// Only the thread driving the batch calls these methods, so implementations
/// need no locking. All methods default to no-ops.
pub trait ProgressSink {
    fn on_start(&mut self, _total: usize) {}
    fn on_file_processed(&mut self, _file_name: &str, _processed: usize) {}
    fn on_failed(&mut self, _reason: &str) {}
    fn on_finished(&mut self, _summary: &RunSummary) {}
}

pub struct SilentSink;

impl ProgressSink for SilentSink {}

#[derive(Debug, Clone)]
pub enum ProgressEvent {
    Started { total: usize },
    FileProcessed { file_name: String, processed: usize },
    Failed { reason: String },
    Finished(RunSummary),
}

pub struct ChannelSink {
    sender: Sender<ProgressEvent>,
}

impl ChannelSink {
    pub fn new(sender: Sender<ProgressEvent>) -> Self {
        Self { sender }
    }

    fn send(&self, event: ProgressEvent) {
        // The receiver may be gone if the caller stopped listening.
        let _ = self.sender.send(event);
    }
}

impl ProgressSink for ChannelSink {
    fn on_start(&mut self, total: usize) {
        self.send(ProgressEvent::Started { total });
    }

    fn on_file_processed(&mut self, file_name: &str, processed: usize) {
        self.send(ProgressEvent::FileProcessed {
            file_name: file_name.to_string(),
            processed,
        });
    }

    fn on_failed(&mut self, reason: &str) {
        self.send(ProgressEvent::Failed {
            reason: reason.to_string(),
        });
    }

    fn on_finished(&mut self, summary: &RunSummary) {
        self.send(ProgressEvent::Finished(summary.clone()));
    }
}

#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingSink {
    pub started: Option<usize>,
    pub processed: Vec<(String, usize)>,
    pub failures: Vec<String>,
    pub finished: Vec<RunSummary>,
}

#[cfg(test)]
impl ProgressSink for RecordingSink {
    fn on_start(&mut self, total: usize) {
        self.started = Some(total);
    }

    fn on_file_processed(&mut self, file_name: &str, processed: usize) {
        self.processed.push((file_name.to_string(), processed));
    }

    fn on_failed(&mut self, reason: &str) {
        self.failures.push(reason.to_string());
    }

    fn on_finished(&mut self, summary: &RunSummary) {
        self.finished.push(summary.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::{ChannelSink, ProgressEvent, ProgressSink};
    use crate::summary::RunSummary;
    use std::path::Path;
    use std::sync::mpsc;

    #[test]
    fn channel_sink_forwards_events_in_order() {
        let (tx, rx) = mpsc::channel();
        let mut sink = ChannelSink::new(tx);
        sink.on_start(2);
        sink.on_file_processed("a.jpg", 1);
        sink.on_finished(&RunSummary::no_files_found(Path::new("dir")));
        drop(sink);

        let events: Vec<ProgressEvent> = rx.iter().collect();
        assert_eq!(events.len(), 3);
        assert!(matches!(events[0], ProgressEvent::Started { total: 2 }));
        assert!(matches!(
            &events[1],
            ProgressEvent::FileProcessed { file_name, processed: 1 } if file_name == "a.jpg"
        ));
        assert!(matches!(events[2], ProgressEvent::Finished(_)));
    }

    #[test]
    fn channel_sink_ignores_closed_receiver() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut sink = ChannelSink::new(tx);
        sink.on_failed("gone");
    }
}
