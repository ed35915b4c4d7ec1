//! In-process user store

use std::collections::HashMap;
use std::sync::RwLock;

use super::{touch, CardStore, User};
use crate::error::Result;

/// Users held in a process-wide map
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: RwLock<HashMap<String, User>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `users`
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let map = users.into_iter().map(|u| (u.id.clone(), u)).collect();
        Self {
            users: RwLock::new(map),
        }
    }

    /// All users, sorted by id
    pub fn snapshot(&self) -> Vec<User> {
        let users = self.users.read().unwrap_or_else(|e| e.into_inner());
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by(|a, b| a.id.cmp(&b.id));
        all
    }

    pub(crate) fn insert(&self, user: User) {
        let mut users = self.users.write().unwrap_or_else(|e| e.into_inner());
        users.insert(user.id.clone(), user);
    }
}

impl CardStore for MemoryStore {
    fn get(&self, user_id: &str) -> Result<Option<User>> {
        let users = self.users.read().unwrap_or_else(|e| e.into_inner());
        Ok(users.get(user_id).cloned())
    }

    fn put(&self, user: User) -> Result<User> {
        let user = touch(user);
        self.insert(user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_then_get() {
        let store = MemoryStore::new();
        assert!(store.get("u1").unwrap().is_none());

        let user = User::new("u1");
        let created = user.created_at;
        let stored = store.put(user).unwrap();
        assert!(stored.updated_at >= created);

        let fetched = store.get("u1").unwrap().unwrap();
        assert_eq!(fetched, stored);
    }

    #[test]
    fn test_snapshot_sorted() {
        let store = MemoryStore::with_users(vec![User::new("b"), User::new("a")]);
        let ids: Vec<String> = store.snapshot().into_iter().map(|u| u.id).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }
}
