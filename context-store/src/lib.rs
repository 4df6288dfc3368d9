//! Storage for the singleton company-context document and the Q&A log.

pub mod accessor;
pub mod config;
pub mod errors;
pub mod memory;
pub mod model;
pub mod store;
pub mod supabase;

pub use accessor::ContextAccessor;
pub use config::{StoreBackend, StoreConfig};
pub use errors::{ContextError, StoreError};
pub use memory::InMemoryStore;
pub use model::{CONTEXT_ID, ContextDocument, FALLBACK_CONTEXT, QaLogEntry};
pub use store::ContextStore;
pub use supabase::SupabaseStore;
