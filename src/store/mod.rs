//! Card storage collaborator
//!
//! The planner core never reads storage directly; callers take a card
//! snapshot from a `CardStore` and pass it in.

mod file;
mod memory;
mod service;

pub use file::{FileStore, PersistPolicy};
pub use memory::MemoryStore;
pub use service::CardService;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::error::Result;

/// User id used when the boundary does not resolve a tenant
pub const DEFAULT_USER_ID: &str = "default-user";

/// A card owner and their cards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub cards: Vec<Card>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    pub fn new(id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            email: None,
            name: None,
            cards: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn card(&self, card_id: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.id == card_id)
    }
}

/// Get/put access to users and their cards
pub trait CardStore: Send + Sync {
    /// Fetch a user by id
    fn get(&self, user_id: &str) -> Result<Option<User>>;

    /// Insert or replace a user, stamping `updated_at`. Returns the stored value.
    fn put(&self, user: User) -> Result<User>;
}

impl<T: CardStore + ?Sized> CardStore for Box<T> {
    fn get(&self, user_id: &str) -> Result<Option<User>> {
        (**self).get(user_id)
    }

    fn put(&self, user: User) -> Result<User> {
        (**self).put(user)
    }
}

impl<T: CardStore + ?Sized> CardStore for &T {
    fn get(&self, user_id: &str) -> Result<Option<User>> {
        (**self).get(user_id)
    }

    fn put(&self, user: User) -> Result<User> {
        (**self).put(user)
    }
}

pub(crate) fn touch(mut user: User) -> User {
    user.updated_at = Utc::now();
    user
}
