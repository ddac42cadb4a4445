//! Report renderers.
//!
//! - [`terminal`] — colored summary box and tables for plate checks, form
//!   errors and issued passes; respects `--verbose` / `--quiet`.
//!
//! JSON output is produced directly from the serializable models in `main`.

pub mod terminal;
