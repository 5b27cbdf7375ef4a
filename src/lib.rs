//! TUI Pasture (workspace facade crate).
//!
//! Re-exports the member crates under one name so binaries, integration
//! tests, and benches can write `tui_pasture::{core,engine,input,store,term,types}`.

pub use tui_pasture_core as core;
pub use tui_pasture_engine as engine;
pub use tui_pasture_input as input;
pub use tui_pasture_store as store;
pub use tui_pasture_term as term;
pub use tui_pasture_types as types;
