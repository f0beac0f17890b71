use std::collections::BTreeMap;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// What is stored per chat user. The user id is the map key, not a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRegistration {
    pub handle: String,
    pub timezone: Tz,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub display_name: String,
}

/// On-disk shape of the registry file.
pub type RegistryMap = BTreeMap<String, UserRegistration>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisteredUser {
    pub user_id: String,
    pub registration: UserRegistration,
}

impl RegisteredUser {
    pub fn display_name(&self) -> &str {
        if self.registration.display_name.is_empty() {
            &self.user_id
        } else {
            &self.registration.display_name
        }
    }
}
