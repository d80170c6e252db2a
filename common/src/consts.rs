use std::time::Duration;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const CLOSE_ANIMATION: Duration = Duration::from_millis(300);
pub const CONFIG_PATH: &str = "config.toml";

// DOM contract of the hosting page
/// carries the data attributes, the modal itself is rendered next to it
pub const MODAL_ELEMENT_ID: &str = "passwordModal";
pub const MOUNT_ROOT_ID: &str = "passwordModalRoot";
pub const VALIDATE_URL_ATTRIBUTE: &str = "data-validate-url";
pub const CHANGE_URL_ATTRIBUTE: &str = "data-change-url";
