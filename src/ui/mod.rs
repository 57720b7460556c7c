//! Ratatui front-end for the service ledger. Everything here is presentation:
//! the screens render whatever the store's listing and search operations
//! return, and every mutation goes straight back through the store. No record
//! state is cached on this side beyond the ids of the rows on screen.

mod app;
mod forms;
mod helpers;
mod screens;
mod terminal;

pub use app::App;
pub use terminal::run_app;
