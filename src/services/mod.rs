//! Orchestration services over the task domain.
//!
//! - [`TaskRepository`]: typed CRUD and query façade over a store
//! - [`CollectionView`]: pure filtered-view and count derivation
//! - [`ReorderCoordinator`]: drag-to-reorder state machine with rollback

mod reorder;
mod repository;
mod view;

pub use reorder::{DragState, ReorderCoordinator, ReorderOutcome};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
pub use view::{CollectionView, TaskCounts, TaskStats, matches_query};
