use crate::consts::MIN_PASSWORD_LEN;

/// The local strength rules a new password must satisfy.
/// Only ASCII letters and digits count, and the length is counted in characters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PasswordRequirements {
    pub length: bool,
    pub letter: bool,
    pub number: bool,
}

impl PasswordRequirements {
    pub fn check(password: &str) -> Self {
        Self {
            length: password.chars().count() >= MIN_PASSWORD_LEN,
            letter: password.chars().any(|c| c.is_ascii_alphabetic()),
            number: password.chars().any(|c| c.is_ascii_digit()),
        }
    }

    pub fn met(&self) -> bool {
        self.length && self.letter && self.number
    }
}

pub fn meets_requirements(password: &str) -> bool {
    PasswordRequirements::check(password).met()
}
