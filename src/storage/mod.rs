//! Persistent slots and the on-disk format of the profile collection.

pub mod migrations;
pub mod slots;

pub use migrations::{decode_profiles, encode_profiles, CURRENT_SCHEMA_VERSION};
pub use slots::{FileSlotStorage, MemorySlotStorage, SlotStorage};
