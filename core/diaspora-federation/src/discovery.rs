//! Data the host returns for WebFinger and hCard lookups.
//!
//! Fetching and rendering these documents is left to the host; the library
//! only passes them through the discovery callbacks.

use serde::{Deserialize, Serialize};

/// WebFinger data for a local person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebFinger {
    /// `acct:user@pod`
    pub acct_uri: String,
    pub alias_url: String,
    pub hcard_url: String,
    pub seed_url: String,
    pub profile_url: String,
    pub atom_url: String,
    pub salmon_url: String,
    pub guid: String,
    /// PEM encoded.
    pub public_key: String,
}

/// hCard data for a local person.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HCard {
    pub guid: String,
    pub nickname: String,
    pub full_name: String,
    pub url: String,
    pub photo_large_url: String,
    pub photo_medium_url: String,
    pub photo_small_url: String,
    /// PEM encoded.
    pub public_key: String,
    pub searchable: bool,
    pub first_name: String,
    pub last_name: String,
}
