//! Card CRUD on top of a `CardStore`

use log::info;
use uuid::Uuid;

use super::{CardStore, User, DEFAULT_USER_ID};
use crate::cards::{Card, CardPatch, NewCard, DEFAULT_CURRENCY};
use crate::error::{PlannerError, Result};

/// Card operations scoped to a single user
#[derive(Debug)]
pub struct CardService<S: CardStore> {
    store: S,
    user_id: String,
    default_currency: String,
}

impl<S: CardStore> CardService<S> {
    pub fn new(store: S) -> Self {
        Self::for_user(store, DEFAULT_USER_ID)
    }

    pub fn for_user(store: S, user_id: impl Into<String>) -> Self {
        Self {
            store,
            user_id: user_id.into(),
            default_currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Currency assigned to new cards that do not specify one
    pub fn with_default_currency(mut self, currency: impl Into<String>) -> Self {
        self.default_currency = currency.into();
        self
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Fetch the user, creating an empty one on first access
    pub fn user(&self) -> Result<User> {
        match self.store.get(&self.user_id)? {
            Some(user) => Ok(user),
            None => self.store.put(User::new(self.user_id.clone())),
        }
    }

    /// Snapshot of the user's cards; an unknown user has none
    pub fn list_cards(&self) -> Result<Vec<Card>> {
        Ok(self
            .store
            .get(&self.user_id)?
            .map(|u| u.cards)
            .unwrap_or_default())
    }

    pub fn get_card(&self, card_id: &str) -> Result<Card> {
        self.store
            .get(&self.user_id)?
            .and_then(|user| user.card(card_id).cloned())
            .ok_or_else(|| card_not_found(card_id))
    }

    pub fn add_card(&self, card: NewCard) -> Result<Card> {
        let mut added = self.add_cards(vec![card])?;
        added
            .pop()
            .ok_or_else(|| PlannerError::invalid("no card to add"))
    }

    /// Validate and add several cards in one write
    pub fn add_cards(&self, cards: Vec<NewCard>) -> Result<Vec<Card>> {
        for card in &cards {
            card.validate()?;
        }

        let mut user = self.user()?;
        let added: Vec<Card> = cards
            .into_iter()
            .map(|new_card| new_card.into_card(Uuid::new_v4().to_string(), &self.default_currency))
            .collect();

        user.cards.extend(added.iter().cloned());
        self.store.put(user)?;
        info!("Added {} card(s) for user {}", added.len(), self.user_id);
        Ok(added)
    }

    pub fn update_card(&self, card_id: &str, patch: &CardPatch) -> Result<Card> {
        let mut user = self.user()?;
        let index = user
            .cards
            .iter()
            .position(|c| c.id == card_id)
            .ok_or_else(|| card_not_found(card_id))?;

        let updated = patch.apply_to(&user.cards[index]);
        updated.validate()?;
        user.cards[index] = updated.clone();
        self.store.put(user)?;
        Ok(updated)
    }

    pub fn delete_card(&self, card_id: &str) -> Result<()> {
        let mut user = self.user()?;
        let before = user.cards.len();
        user.cards.retain(|c| c.id != card_id);
        if user.cards.len() == before {
            return Err(card_not_found(card_id));
        }
        self.store.put(user)?;
        info!("Deleted card {} for user {}", card_id, self.user_id);
        Ok(())
    }
}

fn card_not_found(card_id: &str) -> PlannerError {
    PlannerError::not_found(format!("Card not found: {}", card_id))
}
