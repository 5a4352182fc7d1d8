//! UI-facing state the renderer reads and the controller writes.

use std::collections::VecDeque;

use egui::Color32;

use crate::egui_app::ui::style;

/// Number of entries kept in the status log.
pub const STATUS_LOG_LIMIT: usize = 50;

/// Everything the renderer needs besides the capture grid itself.
#[derive(Clone, Debug)]
pub struct UiState {
    /// Footer badge and text.
    pub status: StatusBarState,
    /// Contents of the digit label field.
    pub label_input: String,
    /// Modal messages waiting to be acknowledged.
    pub notices: NoticeQueue,
    /// Training samples waiting for the next flush.
    pub queued_samples: usize,
    /// Requests sent but not yet answered.
    pub in_flight: usize,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            status: StatusBarState::idle(),
            label_input: String::new(),
            notices: NoticeQueue::default(),
            queued_samples: 0,
            in_flight: 0,
        }
    }
}

/// Tone of the status badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusTone {
    Idle,
    Busy,
    Info,
    Error,
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    /// Main status message text.
    pub text: String,
    /// Badge label shown next to the status.
    pub badge_label: String,
    /// Badge color.
    pub badge_color: Color32,
    /// Rolling status log entries, oldest first.
    pub log: Vec<String>,
}

impl StatusBarState {
    /// Status shown before the first action.
    pub fn idle() -> Self {
        Self {
            text: "Draw a digit to get started".into(),
            badge_label: "Idle".into(),
            badge_color: style::status_badge_color(StatusTone::Idle),
            log: Vec::new(),
        }
    }

    /// Replace the current message and append it to the log.
    pub fn set(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.text = text.into();
        self.badge_label = badge_label(tone).into();
        self.badge_color = style::status_badge_color(tone);
        self.log.push(self.text.clone());
        if self.log.len() > STATUS_LOG_LIMIT {
            let excess = self.log.len() - STATUS_LOG_LIMIT;
            self.log.drain(..excess);
        }
    }

    /// Concatenate log entries into a single displayable string.
    pub fn log_text(&self) -> String {
        self.log.join("\n")
    }
}

fn badge_label(tone: StatusTone) -> &'static str {
    match tone {
        StatusTone::Idle => "Idle",
        StatusTone::Busy => "Sending",
        StatusTone::Info => "Info",
        StatusTone::Error => "Error",
    }
}

/// Why a notice was raised.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    /// The action was rejected before anything was sent.
    Validation,
    /// A prediction came back.
    Prediction,
    /// The collaborator failed or could not be reached.
    Failure,
}

/// A blocking message the user must dismiss.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

/// Notices in arrival order; only the front one is shown.
#[derive(Clone, Debug, Default)]
pub struct NoticeQueue {
    pending: VecDeque<Notice>,
}

impl NoticeQueue {
    pub fn push(&mut self, kind: NoticeKind, message: impl Into<String>) {
        self.pending.push_back(Notice {
            kind,
            message: message.into(),
        });
    }

    /// Notice currently on screen.
    pub fn current(&self) -> Option<&Notice> {
        self.pending.front()
    }

    /// Drop the notice on screen, revealing the next one.
    pub fn dismiss(&mut self) -> Option<Notice> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notice> {
        self.pending.iter()
    }
}
