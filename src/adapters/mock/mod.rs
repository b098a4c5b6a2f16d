//! Mock adapters for testing.
//!
//! Test doubles for the trait abstractions: a manually-advanced clock, a
//! recording transport, and a recording event sink.

mod clock;
mod sink;
mod transport;

pub use clock::MockClock;
pub use sink::RecordingSink;
pub use transport::{MockTransport, RecordedPost};
