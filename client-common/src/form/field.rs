use derive_more::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    Current,
    New,
    Confirm,
}

impl FieldId {
    pub const ALL: [FieldId; 3] = [FieldId::Current, FieldId::New, FieldId::Confirm];

    /// id of the `<input>` element, also the name of the form field
    pub fn input_id(self) -> &'static str {
        match self {
            FieldId::Current => "current_password",
            FieldId::New => "new_password",
            FieldId::Confirm => "confirm_password",
        }
    }

    pub fn feedback_id(self) -> &'static str {
        match self {
            FieldId::Current => "currentPasswordFeedback",
            FieldId::New => "newPasswordFeedback",
            FieldId::Confirm => "confirmPasswordFeedback",
        }
    }
}

/// Every message that can show up beneath a field.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    #[display("Fill in the current password.")]
    CurrentPasswordMissing,
    #[display("Verifying...")]
    Verifying,
    #[display("Current password is incorrect.")]
    CurrentPasswordIncorrect,
    #[display("Error validating the password.")]
    ValidationFailed,
    #[display("Enter a new password.")]
    NewPasswordMissing,
    #[display("The password does not meet the requirements.")]
    RequirementsUnmet,
    #[display("The new password must differ from the current one.")]
    SameAsCurrent,
    #[display("Confirm the new password.")]
    ConfirmationMissing,
    #[display("Passwords do not match.")]
    Mismatch,
    #[display("✓")]
    Ok,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackKind {
    Neutral,
    Error,
    Success,
}

impl Notice {
    pub fn kind(self) -> FeedbackKind {
        match self {
            Notice::Verifying => FeedbackKind::Neutral,
            Notice::Ok => FeedbackKind::Success,
            _ => FeedbackKind::Error,
        }
    }
}

/// Validity flag and feedback message of one field.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FieldState {
    pub valid: bool,
    pub notice: Option<Notice>,
}

impl FieldState {
    pub fn error(notice: Notice) -> Self {
        Self { valid: false, notice: Some(notice) }
    }

    pub fn success() -> Self {
        Self { valid: true, notice: Some(Notice::Ok) }
    }

    pub fn pending() -> Self {
        Self { valid: false, notice: Some(Notice::Verifying) }
    }

    pub fn kind(&self) -> FeedbackKind {
        self.notice.map_or(FeedbackKind::Neutral, Notice::kind)
    }

    pub fn text(&self) -> String {
        self.notice.map(|n| n.to_string()).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleared_field_is_neutral_and_empty() {
        let f = FieldState::default();
        assert!(!f.valid);
        assert_eq!(f.kind(), FeedbackKind::Neutral);
        assert_eq!(f.text(), "");
    }

    #[test]
    fn kinds() {
        assert_eq!(FieldState::pending().kind(), FeedbackKind::Neutral);
        assert_eq!(FieldState::success().kind(), FeedbackKind::Success);
        assert_eq!(FieldState::error(Notice::Mismatch).kind(), FeedbackKind::Error);
        assert_eq!(FieldState::error(Notice::Mismatch).text(), "Passwords do not match.");
    }
}
