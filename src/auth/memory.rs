//! In-memory `UserStore` for tests. Counts every call so tests can assert
//! that a code path never reached storage.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::repo::UserStore;
use crate::auth::repo_types::User;
use crate::error::StoreError;

#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<Uuid, User>>,
    calls: AtomicUsize,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        self.hit();
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        self.hit();
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_active_token(
        &self,
        id: Uuid,
        scope: &str,
        token: &str,
    ) -> Result<Option<User>, StoreError> {
        self.hit();
        Ok(self
            .users
            .lock()
            .unwrap()
            .get(&id)
            .filter(|u| u.tokens.iter().any(|t| t.access == scope && t.token == token))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, StoreError> {
        self.hit();
        let mut users: Vec<User> = self.users.lock().unwrap().values().cloned().collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn save(&self, user: &User) -> Result<(), StoreError> {
        self.hit();
        let mut users = self.users.lock().unwrap();
        if users
            .values()
            .any(|u| u.id != user.id && u.email == user.email)
        {
            return Err(StoreError::DuplicateEmail);
        }
        users.insert(user.id, user.clone());
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        self.hit();
        Ok(self.users.lock().unwrap().remove(&id).is_some())
    }
}
