//! Fire-and-forget feedback notifications
//!
//! Haptics and sound live on the host side; the simulation only tags events
//! by category and moves on. No return value is ever consumed.

/// Notification categories emitted by the games
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    /// Small tactile blip: fire, jump, obstacle passed
    LightImpact,
    /// Positive event: pickup collected, enemy destroyed, level cleared, win
    Success,
    /// Caution event: life lost but the session continues
    Warning,
    /// Terminal failure: game over
    Error,
}

/// Receiver for feedback notifications
pub trait FeedbackSink {
    fn notify(&mut self, kind: FeedbackKind);
}

/// Sink that drops every notification
#[derive(Debug, Default)]
pub struct NullFeedback;

impl FeedbackSink for NullFeedback {
    fn notify(&mut self, _kind: FeedbackKind) {}
}

/// Sink that logs notifications (used by the headless demo)
#[derive(Debug, Default)]
pub struct LogFeedback;

impl FeedbackSink for LogFeedback {
    fn notify(&mut self, kind: FeedbackKind) {
        log::debug!("feedback: {:?}", kind);
    }
}

/// Sink that records notifications so tests can assert on them
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    pub events: Vec<FeedbackKind>,
}

impl RecordingFeedback {
    pub fn count(&self, kind: FeedbackKind) -> usize {
        self.events.iter().filter(|k| **k == kind).count()
    }
}

impl FeedbackSink for RecordingFeedback {
    fn notify(&mut self, kind: FeedbackKind) {
        self.events.push(kind);
    }
}
