//! Framework independent state of the password change modal.
//!
//! `FormState::update` is the whole controller: it takes the current state and one `Event`,
//! and returns the next state plus the `Effect`s the host has to run. Hosts (the yew component,
//! the cli, `Controller`) only render the state and feed effect results back as events.

use common::{api, consts::CLOSE_ANIMATION, password::PasswordRequirements};
use derivative::Derivative;
use tracing::{debug, trace};

pub mod event;
pub mod field;
pub mod visibility;

pub use event::{CheckOutcome, CloseReason, Effect, Event, Flash, RemoteCall, SubmitOutcome};
pub use field::{FeedbackKind, FieldId, FieldState, Notice};
pub use visibility::{Toggle, Visibility, TOGGLES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    Closed,
    Open,
    /// playing the exit animation, hidden once `Event::CloseAnimationDone` arrives
    Closing,
}

impl Default for Modal {
    fn default() -> Self {
        Modal::Closed
    }
}

impl Modal {
    pub fn is_visible(self) -> bool {
        self != Modal::Closed
    }
}

#[derive(Derivative, Default, Clone, PartialEq, Eq)]
#[derivative(Debug)]
pub struct Values {
    #[derivative(Debug="ignore")]
    pub current: String,
    #[derivative(Debug="ignore")]
    pub new: String,
    #[derivative(Debug="ignore")]
    pub confirm: String,
}

impl Values {
    pub fn get(&self, field: FieldId) -> &str {
        match field {
            FieldId::Current => &self.current,
            FieldId::New => &self.new,
            FieldId::Confirm => &self.confirm,
        }
    }

    fn set(&mut self, field: FieldId, value: String) {
        match field {
            FieldId::Current => self.current = value,
            FieldId::New => self.new = value,
            FieldId::Confirm => self.confirm = value,
        }
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FormState {
    modal: Modal,
    values: Values,
    current: FieldState,
    new: FieldState,
    confirm: FieldState,
    requirements: PasswordRequirements,
    visibility: Visibility,
    submitting: bool,
    flash: Option<Flash>,
    // bumped whenever an in-flight current password check becomes irrelevant
    generation: u64,
    // same for the password change request
    submission: u64,
}

impl FormState {
    pub fn modal(&self) -> Modal {
        self.modal
    }

    pub fn value(&self, field: FieldId) -> &str {
        self.values.get(field)
    }

    pub fn field(&self, field: FieldId) -> &FieldState {
        match field {
            FieldId::Current => &self.current,
            FieldId::New => &self.new,
            FieldId::Confirm => &self.confirm,
        }
    }

    pub fn requirements(&self) -> PasswordRequirements {
        self.requirements
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    pub fn submitting(&self) -> bool {
        self.submitting
    }

    pub fn flash(&self) -> Option<&Flash> {
        self.flash.as_ref()
    }

    #[cfg(test)]
    pub(crate) fn generation(&self) -> u64 {
        self.generation
    }

    pub fn can_submit(&self) -> bool {
        can_submit(&self.current, &self.new, &self.confirm)
    }

    pub fn submit_enabled(&self) -> bool {
        self.can_submit() && !self.submitting
    }

    pub fn update(mut self, event: Event) -> (Self, Vec<Effect>) {
        let mut effects = Vec::new();

        match event {
            Event::Open => {
                trace!("opening modal");
                self = self.cleared(Modal::Open);
                self.flash = None;
            }
            Event::Close(reason) => {
                if self.modal == Modal::Open {
                    debug!(?reason, "closing modal");
                    self.modal = Modal::Closing;
                    effects.push(Effect::CloseAfter(CLOSE_ANIMATION));
                }
            }
            Event::CloseAnimationDone => {
                // a reopen during the animation wins
                if self.modal == Modal::Closing {
                    self = self.cleared(Modal::Closed);
                }
            }
            Event::Input(field, value) => {
                self.values.set(field, value);
                match field {
                    FieldId::Current => {
                        self.current = FieldState::default();
                        self.generation += 1;
                    }
                    FieldId::New => self.revalidate_new(),
                    FieldId::Confirm => self.revalidate_confirm(),
                }
            }
            Event::CurrentBlur => {
                let current_password = self.values.current.trim().to_owned();
                self.generation += 1;
                if current_password.is_empty() {
                    self.current = FieldState::error(Notice::CurrentPasswordMissing);
                } else {
                    self.current = FieldState::pending();
                    effects.push(Effect::Remote(RemoteCall::CheckCurrent {
                        generation: self.generation,
                        req: api::ValidatePassword { current_password },
                    }));
                }
            }
            Event::CheckDone { generation, outcome } => {
                if generation != self.generation {
                    debug!(generation, latest = self.generation, "discarding stale password check");
                } else {
                    trace!(?outcome, "password check done");
                    self.current = match outcome {
                        CheckOutcome::Valid => FieldState::success(),
                        CheckOutcome::Incorrect => FieldState::error(Notice::CurrentPasswordIncorrect),
                        CheckOutcome::Failed => FieldState::error(Notice::ValidationFailed),
                    };
                }
            }
            Event::ToggleVisibility(field) => {
                self.visibility = self.visibility.toggled(field);
            }
            Event::Submit => {
                if self.submit_enabled() {
                    self.submitting = true;
                    self.submission += 1;
                    debug!(submission = self.submission, "submitting password change");
                    effects.push(Effect::Remote(RemoteCall::ChangePassword {
                        submission: self.submission,
                        req: api::ChangePassword {
                            current_password: self.values.current.trim().to_owned(),
                            new_password: self.values.new.trim().to_owned(),
                            confirm_password: self.values.confirm.trim().to_owned(),
                        },
                    }));
                } else {
                    trace!(submitting = self.submitting, "submit ignored");
                }
            }
            Event::SubmitDone { submission, outcome } => {
                if submission != self.submission || !self.submitting {
                    debug!(submission, latest = self.submission, "discarding stale password change reply");
                } else {
                    self.submitting = false;
                    let changed = outcome == SubmitOutcome::Changed;
                    self.flash = Some(outcome.into());
                    if changed && self.modal == Modal::Open {
                        self.modal = Modal::Closing;
                        effects.push(Effect::CloseAfter(CLOSE_ANIMATION));
                    }
                }
            }
        }

        (self, effects)
    }

    /// Empty form, no feedback, every field invalid. Any in-flight check or submission is orphaned.
    fn cleared(self, modal: Modal) -> Self {
        Self {
            modal,
            visibility: self.visibility,
            flash: self.flash,
            generation: self.generation + 1,
            submission: self.submission + 1,
            ..Self::default()
        }
    }

    fn revalidate_new(&mut self) {
        let new = self.values.new.trim();
        let current = self.values.current.trim();
        let confirm = self.values.confirm.trim();

        self.requirements = PasswordRequirements::check(new);
        let requirements_met = self.requirements.met();

        self.new = if new.is_empty() {
            FieldState::error(Notice::NewPasswordMissing)
        } else if !requirements_met {
            FieldState::error(Notice::RequirementsUnmet)
        } else if new == current && !current.is_empty() {
            FieldState::error(Notice::SameAsCurrent)
        } else {
            FieldState::success()
        };

        // the confirmation must follow the new password as it is typed
        if confirm != new {
            self.confirm = FieldState::error(Notice::Mismatch);
        } else if !confirm.is_empty() && requirements_met {
            self.confirm = FieldState::success();
        }
    }

    fn revalidate_confirm(&mut self) {
        let confirm = self.values.confirm.trim();
        let new = self.values.new.trim();

        self.confirm = if confirm.is_empty() {
            FieldState::error(Notice::ConfirmationMissing)
        } else if confirm != new {
            FieldState::error(Notice::Mismatch)
        } else {
            FieldState::success()
        };
    }
}

pub fn can_submit(current: &FieldState, new: &FieldState, confirm: &FieldState) -> bool {
    current.valid && new.valid && confirm.valid
}
