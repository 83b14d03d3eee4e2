#![deny(missing_docs)]
#![doc = "Core identifiers, errors and deterministic seeding shared by the gift exchange crates."]

pub mod errors;
mod participant;
pub mod provenance;
pub mod rng;

pub use errors::{ErrorInfo, SantaError};
pub use participant::{Participant, Roster};
pub use provenance::{RunProvenance, SchemaVersion};
pub use rng::{derive_substream_seed, RngHandle};
