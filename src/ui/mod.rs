//! UI module: the rendering capability the session draws through, and the
//! console shell that binds typed commands to session operations.
//!
//! The session never talks to a concrete toolkit. It calls the four
//! `ViewRenderer` methods and the shell decides how they look.

pub mod console;
pub mod handlers;
mod state_helpers;

use crate::image_loader::Preview;
use crate::state::CategoryView;

pub use console::ConsoleView;
pub use handlers::Shell;
pub use state_helpers::*;

/// Passive rendering collaborator.
pub trait ViewRenderer {
    /// `None` means "no image" (empty folder or undecodable file).
    fn render_preview(&mut self, preview: Option<&Preview>);
    fn render_status(&mut self, status: &str);
    fn render_categories(&mut self, categories: &[CategoryView]);
    /// Hard, user-visible warning (settings could not be saved).
    fn render_warning(&mut self, message: &str);
}
