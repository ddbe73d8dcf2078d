//! Service-provider profiles: the record shape, schedule synthesis, id
//! issuance and the write-through store.

pub mod availability;
pub mod id;
pub mod model;
pub mod store;

pub use availability::{resolve_availability, AvailabilitySelection};
pub use id::ProfileIdGenerator;
pub use model::{FlexibleHour, LocalProfile, ProfilePatch, ProfileStatus, WEEK_DAYS};
pub use store::{ProfileStore, SharedProfileStore};
