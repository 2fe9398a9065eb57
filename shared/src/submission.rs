//! Single-attempt contact form submission.
//!
//! `Idle -> Pending -> Sent` is the only path. A transport failure leaves the
//! form in `Pending` with the button disabled. There is no retry, so a failed
//! send keeps showing the "sending" label until the page is reloaded.

use crate::locale::{Locale, StatusText};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Pending,
    Sent,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionEvent {
    FormSubmitted,
    ResponseReceived,
    TransportFailed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubmissionEffect {
    /// Show `label`, disable the button, then issue the request.
    BeginSending { label: &'static str },
    /// Show `label` and disable the name, email and message fields.
    MarkSent { label: &'static str },
    /// Log only, the visible state stays as it is.
    ReportFailure,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Submission {
    state: SubmissionState,
    text: StatusText,
}

impl Submission {
    pub fn new(locale: Locale) -> Self {
        Self { state: SubmissionState::Idle, text: locale.status_text() }
    }

    pub fn state(&self) -> SubmissionState {
        self.state
    }

    pub fn handle(&mut self, event: SubmissionEvent) -> Option<SubmissionEffect> {
        match (self.state, event) {
            (SubmissionState::Idle, SubmissionEvent::FormSubmitted) => {
                self.state = SubmissionState::Pending;
                Some(SubmissionEffect::BeginSending { label: self.text.sending })
            }
            (SubmissionState::Pending, SubmissionEvent::ResponseReceived) => {
                self.state = SubmissionState::Sent;
                Some(SubmissionEffect::MarkSent { label: self.text.sent })
            }
            (SubmissionState::Pending, SubmissionEvent::TransportFailed) => Some(SubmissionEffect::ReportFailure),
            _ => None,
        }
    }
}
