//! Core domain entities.
//!
//! The registry has a single entity, [`ShortLink`], with a separate
//! [`NewShortLink`] input struct for admission (the same "New Type" split the
//! persistence layer expects: ids, timestamps and counters are assigned by
//! the store, never by callers).

pub mod short_link;

pub use short_link::{NewShortLink, ShortLink};
