//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod error;
pub mod identifiers;
pub mod item;
pub mod key_action;

// Re-export for convenience
pub use error::{AppError, InputError, ParseError};
pub use identifiers::{InvalidItemId, InvalidSection, ItemId, ItemKey, Section};
pub use item::StackItem;
pub use key_action::KeyAction;
