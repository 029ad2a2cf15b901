//! Process-lifetime storage kept entirely in memory.
//!
//! Nothing survives a restart. Each operation takes its map's lock exactly
//! once, so the duplicate check and the insert cannot interleave with another
//! registration.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

use crate::{
    app_error::{AppError, AppResult},
    application::use_cases::{user::UserRepo, waitlist::WaitlistRepo},
    domain::entities::{
        user::{NewUser, User},
        waitlist_entry::WaitlistEntry,
    },
};

#[derive(Default)]
pub struct InMemoryPersistence {
    waitlist: Mutex<HashMap<String, WaitlistEntry>>,
    users: Mutex<HashMap<Uuid, User>>,
}

impl InMemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store. A later entry with an email already seeded is dropped.
    pub fn with_entries(entries: Vec<WaitlistEntry>) -> Self {
        let mut map = HashMap::new();
        for entry in entries {
            map.entry(entry.email.clone()).or_insert(entry);
        }
        Self {
            waitlist: Mutex::new(map),
            users: Mutex::default(),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> AppResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| AppError::Storage("in-memory store lock poisoned".into()))
}

#[async_trait]
impl WaitlistRepo for InMemoryPersistence {
    async fn insert(&self, entry: &WaitlistEntry) -> AppResult<WaitlistEntry> {
        let mut waitlist = lock(&self.waitlist)?;
        match waitlist.entry(entry.email.clone()) {
            Entry::Occupied(_) => Err(AppError::DuplicateEmail),
            Entry::Vacant(slot) => Ok(slot.insert(entry.clone()).clone()),
        }
    }

    async fn get_by_email(&self, email: &str) -> AppResult<Option<WaitlistEntry>> {
        Ok(lock(&self.waitlist)?.get(email).cloned())
    }

    async fn count(&self) -> AppResult<i64> {
        Ok(lock(&self.waitlist)?.len() as i64)
    }

    async fn list(&self) -> AppResult<Vec<WaitlistEntry>> {
        let mut entries: Vec<WaitlistEntry> = lock(&self.waitlist)?.values().cloned().collect();
        entries.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(entries)
    }
}

#[async_trait]
impl UserRepo for InMemoryPersistence {
    async fn create(&self, new_user: &NewUser) -> AppResult<User> {
        let mut users = lock(&self.users)?;
        if users.values().any(|u| u.username == new_user.username) {
            return Err(AppError::Conflict("Username already taken".into()));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username.clone(),
            password: SecretString::from(new_user.password.expose_secret().to_owned()),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(lock(&self.users)?.get(&id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> AppResult<Option<User>> {
        Ok(lock(&self.users)?
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}
