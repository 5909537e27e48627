//! Testing infrastructure for framelens integration tests.
//!
//! - `TestWorld`: a client wired to recording doubles, with the
//!   observations kept accessible to the test
//! - `recorders`: standalone recording implementations of the external
//!   collaborator traits

pub mod recorders;
pub mod world;

pub use recorders::{FormatterCall, RecordingEngine, RecordingFormatters, RecordingLog};
pub use world::TestWorld;
