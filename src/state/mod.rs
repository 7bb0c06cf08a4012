//! State held by the sorting session.

pub mod categories;
pub mod navigation;

pub use categories::{CategoryStore, CategoryView};
pub use navigation::{ImageEntry, NavigationState};
