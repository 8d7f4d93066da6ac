// ── Render notification ──

/// Receives the "cached data changed, redraw" signal after a successful
/// category refresh.
pub trait RenderNotifier: Send + Sync {
    fn render(&self);
}

impl<F> RenderNotifier for F
where
    F: Fn() + Send + Sync,
{
    fn render(&self) {
        self();
    }
}

/// Notifier that ignores every render request.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRender;

impl RenderNotifier for NoRender {
    fn render(&self) {}
}
