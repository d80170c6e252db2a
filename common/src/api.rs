mod error;
mod rpc;

pub use error::{Error, Result};
pub use rpc::{ChangePassword, Rpc, ValidatePassword, ValidatePasswordRet};
