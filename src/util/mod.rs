//! Shared utilities.
//!
//! Frame pacing for hosts that drive their own refresh loop.

pub mod frame_timing;
