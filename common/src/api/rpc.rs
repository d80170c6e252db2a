use derivative::Derivative;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

// --- Trait

pub trait Rpc: Serialize {
    const DISPLAY_NAME: &'static str;
    type Ret: DeserializeOwned; // our deserialized structs will need to be self owned to be easily given back from rpc calls
}

// --- Rpc Structs

/// Asks the server whether `current_password` is the logged-in account's password.
#[derive(Derivative, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[derivative(Debug)]
pub struct ValidatePassword {
    #[derivative(Debug="ignore")]
    pub current_password: String,
}
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatePasswordRet {
    #[serde(default)] // a body without `valid` counts as a rejection
    pub valid: bool,
}
impl Rpc for ValidatePassword {
    const DISPLAY_NAME: &'static str = "ValidatePassword";
    type Ret = ValidatePasswordRet;
}

/// Sent form-encoded, like the html form it replaces. The server answers with a status code only.
#[derive(Derivative, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[derivative(Debug)]
pub struct ChangePassword {
    #[derivative(Debug="ignore")]
    pub current_password: String,
    #[derivative(Debug="ignore")]
    pub new_password: String,
    #[derivative(Debug="ignore")]
    pub confirm_password: String,
}
impl Rpc for ChangePassword {
    const DISPLAY_NAME: &'static str = "ChangePassword";
    type Ret = ();
}
