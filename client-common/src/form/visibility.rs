use super::field::FieldId;

/// Binds a visibility toggle control to the field it reveals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Toggle {
    pub control_id: &'static str,
    pub target: FieldId,
}

pub const TOGGLES: [Toggle; 3] = [
    Toggle { control_id: "toggleCurrentPassword", target: FieldId::Current },
    Toggle { control_id: "toggleNewPassword", target: FieldId::New },
    Toggle { control_id: "toggleConfirmPassword", target: FieldId::Confirm },
];

/// Which fields are currently rendered in plain text.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    current: bool,
    new: bool,
    confirm: bool,
}

impl Visibility {
    pub fn is_revealed(&self, field: FieldId) -> bool {
        match field {
            FieldId::Current => self.current,
            FieldId::New => self.new,
            FieldId::Confirm => self.confirm,
        }
    }

    pub fn toggled(mut self, field: FieldId) -> Self {
        let flag = match field {
            FieldId::Current => &mut self.current,
            FieldId::New => &mut self.new,
            FieldId::Confirm => &mut self.confirm,
        };
        *flag = !*flag;
        self
    }

    /// value of the input's `type` attribute
    pub fn input_type(&self, field: FieldId) -> &'static str {
        if self.is_revealed(field) { "text" } else { "password" }
    }
}
