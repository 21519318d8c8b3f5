//! # voxa-shared
//!
//! Domain types and pure helpers shared by every Voxa crate.
//!
//! Everything here is plain data: no I/O, no async, no state.  The structs
//! derive `Serialize`/`Deserialize` so they can be handed directly to the
//! UI layer.

pub mod constants;
pub mod password;
pub mod types;
