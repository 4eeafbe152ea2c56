//! PostgreSQL store implementations.

mod nudge_store;
mod profile_store;

pub use nudge_store::PgNudgeStore;
pub use profile_store::PgProfileStore;
