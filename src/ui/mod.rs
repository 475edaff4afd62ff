//! Dashboard rendering layer with component-based architecture.
//!
//! This module turns view models into ANSI-styled terminal frames through
//! composable panel components. It provides theme support and a render surface
//! seam so the runtime can drive a real terminal or a recording test double.
//!
//! # Architecture
//!
//! ```text
//! SessionState → compute_viewmodel → DashboardViewModel → RenderSurface → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable dashboard state
//! - [`renderer`]: Frame buffer and top-level rendering coordinator
//! - [`components`]: Composable panel renderers
//! - [`helpers`]: Shared rendering utilities (bars, wrapping, markup)
//! - [`surface`]: Render targets
//! - [`theme`]: Color scheme definitions and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod surface;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_viewmodel, Frame};
pub use surface::{AnsiSurface, RenderSurface};
pub use theme::Theme;
pub use viewmodel::{
    ChartRow, ChartView, DashboardViewModel, ExplanationView, FeedItemView, FooterInfo,
    HeaderInfo, InputPanel, NoticeView, ResultPanel, StatCards,
};
