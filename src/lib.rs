//! listview
//!
//! Search, filter, sort and paging engine for record-management list screens.
//!
//! The host owns an already-fetched record collection and a
//! [`state::ListViewState`] per mounted screen; [`view_state::ListViewEngine`]
//! turns the two into a memoized [`view_state::View`]. Screens are described
//! by [`config::ScreenConfig`], either the built-in presets or TOML sections.

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view_state;

// Glue between the shell (files, command line) and the pure core
pub mod integration;

#[cfg(test)]
mod test_harness;

#[cfg(test)]
mod tests;
