//! Application services behind the HTTP handlers.

pub mod generation;
pub mod notes;
pub mod view_cache;

pub use generation::GenerationService;
pub use notes::{NoteService, Repositories};
pub use view_cache::{CacheStats, ViewCache, ViewGeneration};
