//! Credentials required to operate the NOWPayments API.
//!
//! Loaded from a JSON file of the form:
//!
//! ```json
//! {
//!   "apiKey": "...",
//!   "ipnSecretKey": "...",
//!   "login": "merchant@example.com",
//!   "password": "...",
//!   "server": "https://api-sandbox.nowpayments.io"
//! }
//! ```
//!
//! The sandbox environment is selected simply by pointing `server` at
//! [`SANDBOX_BASE_URL`].

use std::path::Path;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::Error;

/// Base URL of the production API.
pub const PRODUCTION_BASE_URL: &str = "https://api.nowpayments.io";

/// Base URL of the sandbox API, for non-production testing.
pub const SANDBOX_BASE_URL: &str = "https://api-sandbox.nowpayments.io";

/// API credentials. All fields are required.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    /// API key, sent as the `x-api-key` header on every request.
    pub api_key: String,

    /// IPN secret key, paired with the API key when instant payment
    /// notifications are configured on the merchant account.
    pub ipn_secret_key: String,

    /// Account email, exchanged for a JWT on privileged routes.
    pub login: String,

    /// Account password, exchanged together with [`Self::login`].
    pub password: String,

    /// Base URL of the API server (production or sandbox).
    pub server: String,
}

impl Credentials {
    /// Reads and validates credentials from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or parsed,
    /// or if any field fails validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| Error::Config(format!("read {}: {e}", path.as_ref().display())))?;
        let credentials: Self =
            serde_json::from_str(&content).map_err(|e| Error::Config(format!("parse: {e}")))?;
        credentials.validate()?;
        Ok(credentials)
    }

    /// Checks that every field is present and the server URL parses.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first offending field.
    pub fn validate(&self) -> Result<(), Error> {
        if self.api_key.is_empty() {
            return Err(Error::Config("API key is missing".into()));
        }
        if self.ipn_secret_key.is_empty() {
            return Err(Error::Config("IPN secret key is missing".into()));
        }
        if self.login.is_empty() {
            return Err(Error::Config("login is missing".into()));
        }
        if self.password.is_empty() {
            return Err(Error::Config("password is missing".into()));
        }
        if self.server.is_empty() {
            return Err(Error::Config("server URL is missing".into()));
        }
        Url::parse(&self.server)
            .map_err(|e| Error::Config(format!("server URL parsing: {e}")))?;
        Ok(())
    }

    /// Returns true when the configured server is the sandbox.
    #[must_use]
    pub fn is_sandbox(&self) -> bool {
        self.server.trim_end_matches('/') == SANDBOX_BASE_URL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Credentials {
        Credentials {
            api_key: "key".into(),
            ipn_secret_key: "key".into(),
            login: "mylogin".into(),
            password: "mypass".into(),
            server: "http://some.tld".into(),
        }
    }

    #[test]
    fn valid_credentials_pass() {
        assert!(valid().validate().is_ok());
    }

    #[test]
    fn each_missing_field_is_rejected() {
        let cases: [(&str, fn(&mut Credentials)); 5] = [
            ("API key", |c| c.api_key.clear()),
            ("IPN secret key", |c| c.ipn_secret_key.clear()),
            ("login", |c| c.login.clear()),
            ("password", |c| c.password.clear()),
            ("server", |c| c.server.clear()),
        ];
        for (name, clear) in cases {
            let mut credentials = valid();
            clear(&mut credentials);
            let err = credentials.validate().unwrap_err();
            assert!(matches!(err, Error::Config(_)), "{name} not rejected");
        }
    }

    #[test]
    fn unparseable_server_url_is_rejected() {
        let mut credentials = valid();
        credentials.server = "not a url".into();
        assert!(credentials.validate().is_err());
    }

    #[test]
    fn sandbox_detection_matches_known_constant() {
        let mut credentials = valid();
        assert!(!credentials.is_sandbox());
        credentials.server = SANDBOX_BASE_URL.to_owned();
        assert!(credentials.is_sandbox());
        credentials.server = format!("{SANDBOX_BASE_URL}/");
        assert!(credentials.is_sandbox());
    }

    #[test]
    fn json_field_names_match_the_config_file_format() {
        let credentials: Credentials = serde_json::from_str(
            r#"{"apiKey":"k","ipnSecretKey":"s","login":"l","password":"p","server":"http://some.tld"}"#,
        )
        .unwrap();
        assert_eq!(credentials.api_key, "k");
        assert_eq!(credentials.login, "l");
        assert_eq!(credentials.server, "http://some.tld");
    }
}
