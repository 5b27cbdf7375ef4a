//! File-backed resources: saves, translations, and maps.
//!
//! Every store recovers locally where it can. A missing or corrupt save is
//! replaced by the default record, missing translations fall back to the
//! built-in tables, and a missing map is reported as a distinct
//! [`MapError::NotFound`] so the caller can substitute [`generate_pasture`].

pub mod error;
pub mod map;
pub mod save;
pub mod translate;

pub use tui_pasture_core as core;
pub use tui_pasture_types as types;

pub use error::{MapError, StoreError};
pub use map::{generate_pasture, MapStore};
pub use save::{PlayerRecord, SaveData, SaveStore, Settings, TimeRecord};
pub use translate::Translator;
