//! Reusable UI components

pub mod loading;
pub mod navbar;
pub mod sidebar;

pub use loading::{remote_view, EmptyRow, LoadingSpinner};
pub use navbar::Navbar;
pub use sidebar::Sidebar;
