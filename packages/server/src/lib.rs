//! Secret Santa bot server library.
//!
//! Organizers create gift-exchange rooms, invitees join through a shared link, and the
//! bot draws a single-cycle giver → receiver assignment and tells every giver privately.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

pub mod config;
