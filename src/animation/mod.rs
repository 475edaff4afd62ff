//! Time-boxed interpolation of displayed metrics.
//!
//! Animations are split into a pure half and a timed half:
//!
//! ```text
//! Tween (steps, interval) ──► Ticker (tokio task) ──► Event::*Tick { generation, step }
//!                                                          │
//!                      ConfidenceGauge / CounterBoard ◄────┘ apply_step
//! ```
//!
//! The pure types own the displayed values and decide what a given step means.
//! The [`Ticker`] only produces step numbers on a clock and can be cancelled at
//! any time. Because every tick carries the generation that scheduled it, the
//! display is only ever written by the most recent animation.
//!
//! # Modules
//!
//! - [`tween`]: Fixed-step schedules
//! - [`confidence`]: Confidence percentage and radial gauge geometry
//! - [`counters`]: Stat-card count-up
//! - [`ticker`]: Cancellable tokio tick driver

pub mod confidence;
pub mod counters;
pub mod ticker;
pub mod tween;

pub use confidence::{ConfidenceGauge, GAUGE_CIRCUMFERENCE, GAUGE_RADIUS};
pub use counters::CounterBoard;
pub use ticker::Ticker;
pub use tween::Tween;
