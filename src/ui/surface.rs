//! Render targets for dashboard frames.

use crate::ui::renderer::render_viewmodel;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DashboardViewModel;
use std::io::Write;

/// Where the runtime sends each recomputed view model.
pub trait RenderSurface {
    fn render(&mut self, vm: &DashboardViewModel, theme: &Theme);
}

/// Writes ANSI frames of a fixed size to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnsiSurface {
    rows: usize,
    cols: usize,
}

impl AnsiSurface {
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }
}

impl RenderSurface for AnsiSurface {
    fn render(&mut self, vm: &DashboardViewModel, theme: &Theme) {
        let frame = render_viewmodel(vm, theme, self.rows, self.cols);

        let mut stdout = std::io::stdout().lock();
        if let Err(e) = stdout
            .write_all(frame.as_bytes())
            .and_then(|()| stdout.flush())
        {
            tracing::warn!(error = %e, "failed to write frame");
        }
    }
}
