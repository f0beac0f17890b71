mod model;

use std::cmp::Ordering;

use tokio::sync::RwLock;

pub use model::*;

use crate::{
    platform::{process_handle, PlatformError},
    storage::{StorageError, Store},
};

use super::timezone::{self, TimezoneError};

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error(transparent)]
    Timezone(#[from] TimezoneError),
    #[error("Invalid handle: {0}")]
    InvalidHandle(String),
    #[error("No registration for user {0}")]
    NoRegistration(String),
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<PlatformError> for RegistryError {
    fn from(error: PlatformError) -> Self {
        RegistryError::InvalidHandle(error.to_string())
    }
}

// Telegram ids are numeric; anything else sorts after them by text.
fn compare_user_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Chat user -> judge handle mapping, mirrored to its store after every change.
pub struct UserRegistry {
    store: Box<dyn Store<RegistryMap>>,
    users: RwLock<RegistryMap>,
}

impl UserRegistry {
    pub fn new(store: Box<dyn Store<RegistryMap>>) -> Self {
        Self {
            store,
            users: RwLock::new(RegistryMap::new()),
        }
    }

    /// Replaces the in-memory map with whatever the store holds. A store that
    /// was never written starts the registry empty.
    pub async fn load(&self) -> Result<usize, RegistryError> {
        let loaded = match self.store.load().await? {
            Some(users) => {
                info!("User data loaded: {} registrations", users.len());
                users
            }
            None => {
                info!("No existing user data found. Starting fresh.");
                RegistryMap::new()
            }
        };

        let count = loaded.len();
        *self.users.write().await = loaded;
        Ok(count)
    }

    pub async fn register(
        &self,
        user_id: &str,
        display_name: &str,
        handle: &str,
        raw_timezone: &str,
    ) -> Result<RegisteredUser, RegistryError> {
        let timezone = timezone::resolve(raw_timezone)?;
        let handle = process_handle(handle)?;

        let registration = UserRegistration {
            handle,
            timezone,
            display_name: display_name.trim().to_string(),
        };

        let mut users = self.users.write().await;
        let previous = users.insert(user_id.to_string(), registration.clone());

        if let Err(e) = self.store.save(&users).await {
            error!("Failed to save user data after registering {}: {}", user_id, e);
            match previous {
                Some(previous) => users.insert(user_id.to_string(), previous),
                None => users.remove(user_id),
            };
            return Err(e.into());
        }

        info!(
            "Registered {} as {} ({})",
            user_id, registration.handle, registration.timezone
        );

        Ok(RegisteredUser {
            user_id: user_id.to_string(),
            registration,
        })
    }

    pub async fn get(&self, user_id: &str) -> Result<RegisteredUser, RegistryError> {
        self.users
            .read()
            .await
            .get(user_id)
            .map(|registration| RegisteredUser {
                user_id: user_id.to_string(),
                registration: registration.clone(),
            })
            .ok_or_else(|| RegistryError::NoRegistration(user_id.to_string()))
    }

    /// Current registrations ordered by numeric user id.
    pub async fn list(&self) -> Vec<RegisteredUser> {
        let mut users = self
            .users
            .read()
            .await
            .iter()
            .map(|(user_id, registration)| RegisteredUser {
                user_id: user_id.clone(),
                registration: registration.clone(),
            })
            .collect::<Vec<_>>();

        users.sort_by(|a, b| compare_user_ids(&a.user_id, &b.user_id));
        users
    }

    /// Snapshot for a bulk stats pass over every registered user.
    pub async fn all_handles(&self) -> Vec<RegisteredUser> {
        self.list().await
    }
}
