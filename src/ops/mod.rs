pub mod progress;
pub mod reorder;
pub mod task_store;
