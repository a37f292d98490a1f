//! Port definitions for hexagonal architecture.
//!
//! These traits define the boundaries between the domain core and external adapters.

mod detector;
mod frame_output;
mod session_sink;
mod tick_source;

pub use detector::Detector;
pub use frame_output::FrameOutput;
pub use session_sink::{SessionEvent, SessionSink};
pub use tick_source::{Tick, TickSource};
