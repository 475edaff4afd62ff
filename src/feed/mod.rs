//! Live analysis feed.
//!
//! - [`buffer`]: The bounded [`LiveFeedBuffer`]
//! - [`samples`]: Demo entries the periodic refresh seeds the feed with
//!
//! The buffer itself is single-owner: it lives inside the session state and is
//! only touched by the event loop, which serializes periodic reseeding against
//! prepends from completed submissions.

pub mod buffer;
pub mod samples;

pub use buffer::{LiveFeedBuffer, FEED_CAPACITY};
pub use samples::sample_entries;
