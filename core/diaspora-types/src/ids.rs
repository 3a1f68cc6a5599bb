//! Identifier types used throughout the federation core.
//!
//! - [`DiasporaId`]: the `user@domain` global identifier of a person
//! - [`Guid`]: the opaque identifier of an entity instance

use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::Error;

/// Minimum length of an entity GUID.
pub const GUID_MIN_LENGTH: usize = 16;

/// Maximum length of an entity GUID.
pub const GUID_MAX_LENGTH: usize = 255;

const DIASPORA_ID_MAX_LENGTH: usize = 255;

/// A person's global identifier, `user@host[:port]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiasporaId {
    username: String,
    host: String,
}

impl DiasporaId {
    /// Parses and validates a diaspora ID.
    pub fn parse(s: &str) -> crate::Result<Self> {
        let invalid = || Error::InvalidDiasporaId(s.to_string());

        if s.is_empty() || s.len() > DIASPORA_ID_MAX_LENGTH {
            return Err(invalid());
        }
        let (username, host) = s.split_once('@').ok_or_else(invalid)?;
        if !is_valid_username(username) || !is_valid_host(host) {
            return Err(invalid());
        }

        Ok(Self {
            username: username.to_string(),
            host: host.to_string(),
        })
    }

    /// Returns true if `s` is a syntactically valid diaspora ID.
    #[must_use]
    pub fn is_valid(s: &str) -> bool {
        Self::parse(s).is_ok()
    }

    /// The part before the `@`.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The pod host, including the port if one was given.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }
}

fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_'))
}

fn is_valid_host(host: &str) -> bool {
    let (domain, port) = match host.rsplit_once(':') {
        Some((domain, port)) => (domain, Some(port)),
        None => (host, None),
    };

    if let Some(port) = port {
        match port.parse::<u16>() {
            Ok(p) if p > 0 && port.chars().all(|c| c.is_ascii_digit()) => {}
            _ => return false,
        }
    }

    !domain.is_empty()
        && domain.split('.').all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

impl fmt::Display for DiasporaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.username, self.host)
    }
}

impl FromStr for DiasporaId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Unique identifier for an entity instance.
///
/// Any ASCII alphanumeric string of 16 to 255 characters is a valid GUID;
/// freshly generated GUIDs are 32 hex characters from a random UUID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Guid(String);

impl Guid {
    /// Generates a new random GUID.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Parses and validates a GUID.
    pub fn parse(s: &str) -> crate::Result<Self> {
        if Self::is_valid(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(Error::InvalidGuid(s.to_string()))
        }
    }

    /// Returns true if `s` is a syntactically valid GUID.
    #[must_use]
    pub fn is_valid(s: &str) -> bool {
        (GUID_MIN_LENGTH..=GUID_MAX_LENGTH).contains(&s.len())
            && s.chars().all(|c| c.is_ascii_alphanumeric())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Default for Guid {
    fn default() -> Self {
        Self::generate()
    }
}

impl fmt::Display for Guid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Guid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Guid> for String {
    fn from(guid: Guid) -> Self {
        guid.0
    }
}
