use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /* expected and normal business logic related errors that must be handled by the client */

    #[error("IncorrectPassword")]
    IncorrectPassword,
    #[error("PasswordMismatch")]
    PasswordMismatch,

    /* the server answered, but not with anything we know how to interpret */
    #[error("UnexpectedStatus({0})")]
    UnexpectedStatus(u16),

    /* transport, encoding and decoding failures. Reported to the user as a generic error. */
    #[error("ClientSideError({0:#})")]
    ClientSideError(eyre::Report),
}

// eyre::Report isn't a std::error::Error, so thiserror's #[from] can't be used here
impl From<eyre::Report> for Error {
    fn from(e: eyre::Report) -> Self {
        Self::ClientSideError(e)
    }
}

impl Error {
    /// Maps a non-2xx status of the password change endpoint to the business error it stands for.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::IncorrectPassword,
            400 | 422 => Self::PasswordMismatch,
            s => Self::UnexpectedStatus(s),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
