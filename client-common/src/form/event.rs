use std::time::Duration;

use common::api;
use derivative::Derivative;
use derive_more::Display;

use super::field::FieldId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Button,
    Outside,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Valid,
    Incorrect,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Changed,
    IncorrectPassword,
    Mismatch,
    Failed(String),
}

impl From<api::Result<()>> for SubmitOutcome {
    fn from(r: api::Result<()>) -> Self {
        match r {
            Ok(()) => SubmitOutcome::Changed,
            Err(api::Error::IncorrectPassword) => SubmitOutcome::IncorrectPassword,
            Err(api::Error::PasswordMismatch) => SubmitOutcome::Mismatch,
            Err(api::Error::UnexpectedStatus(s)) => SubmitOutcome::Failed(format!("server answered {}", s)),
            Err(api::Error::ClientSideError(e)) => SubmitOutcome::Failed(format!("{:#}", e)),
        }
    }
}

/// Message shown above the form after a submission.
#[derive(Debug, Display, Clone, PartialEq, Eq)]
pub enum Flash {
    #[display("Password changed successfully!")]
    Changed,
    #[display("Current password is incorrect!")]
    IncorrectPassword,
    #[display("The new passwords do not match!")]
    Mismatch,
    #[display("Error changing the password: {_0}")]
    Failed(String),
}

impl Flash {
    pub fn is_success(&self) -> bool {
        matches!(self, Flash::Changed)
    }
}

impl From<SubmitOutcome> for Flash {
    fn from(o: SubmitOutcome) -> Self {
        match o {
            SubmitOutcome::Changed => Flash::Changed,
            SubmitOutcome::IncorrectPassword => Flash::IncorrectPassword,
            SubmitOutcome::Mismatch => Flash::Mismatch,
            SubmitOutcome::Failed(reason) => Flash::Failed(reason),
        }
    }
}

/// Everything the hosting page can tell the controller.
#[derive(Derivative, Clone, PartialEq, Eq)]
#[derivative(Debug)]
pub enum Event {
    Open,
    Close(CloseReason),
    CloseAnimationDone,
    Input(FieldId, #[derivative(Debug="ignore")] String),
    CurrentBlur,
    CheckDone { generation: u64, outcome: CheckOutcome },
    ToggleVisibility(FieldId),
    Submit,
    SubmitDone { submission: u64, outcome: SubmitOutcome },
}

/// Work a transition asks the host to carry out. Its result comes back as an `Event`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Remote(RemoteCall),
    /// deliver `Event::CloseAnimationDone` once the delay has elapsed
    CloseAfter(Duration),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteCall {
    CheckCurrent { generation: u64, req: api::ValidatePassword },
    ChangePassword { submission: u64, req: api::ChangePassword },
}
