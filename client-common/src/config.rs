use std::path::Path;

use derivative::Derivative;
use eyre::WrapErr;
use serde::Deserialize;
use url::Url;

/// Where the modal sends its requests. In the browser this comes from the modal's data attributes.
#[derive(Derivative, Deserialize, Clone, PartialEq, Eq)]
#[derivative(Debug)]
pub struct ModalConfig {
    pub validate_url: Url,
    pub change_url: Url,
    /// sent as the `Cookie` header, for clients that don't have the browser's session
    #[derivative(Debug="ignore")]
    #[serde(default)]
    pub session_cookie: Option<String>,
}

impl ModalConfig {
    pub fn new(validate_url: Url, change_url: Url) -> Self {
        Self { validate_url, change_url, session_cookie: None }
    }

    /// Attribute values may be relative to the page, as server-side templates usually emit them.
    pub fn from_attributes(base: &Url, validate_url: &str, change_url: &str) -> eyre::Result<Self> {
        eyre::ensure!(!validate_url.is_empty() && !change_url.is_empty(), "missing endpoint url");
        Ok(Self::new(
            base.join(validate_url).wrap_err_with(|| format!("invalid validate url {:?}", validate_url))?,
            base.join(change_url).wrap_err_with(|| format!("invalid change url {:?}", change_url))?,
        ))
    }

    pub fn from_toml(s: &str) -> eyre::Result<Self> {
        toml::from_str(s).wrap_err("failed to parse config")
    }

    pub fn load(path: impl AsRef<Path>) -> eyre::Result<Self> {
        let path = path.as_ref();
        let buf = std::fs::read_to_string(path).wrap_err_with(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&buf)
    }
}
