//! Card data structures and CSV import

mod data;
pub mod loader;

pub use data::{Card, CardPatch, NewCard, DEFAULT_CURRENCY};
pub use loader::{load_cards, load_cards_from_reader};
