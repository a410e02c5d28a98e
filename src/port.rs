use crate::scroll::sample::HeaderVisualState;

/// What the scroll synchronizer reads from and writes to the page.
///
/// The browser implementation lives in `dom::DomScrollPort`; tests use an
/// in-memory recorder. Implementations skip writes whose target element is
/// missing.
pub trait ScrollPort {
    fn viewport_width(&self) -> f64;
    fn menu_open(&self) -> bool;

    /// `ratio` is already clamped to [0, 1].
    fn set_progress(&mut self, ratio: f64);
    fn set_header(&mut self, state: HeaderVisualState);

    /// Speed factors of the parallax nodes, in document order.
    fn parallax_speeds(&self) -> &[f64];
    fn set_parallax_offset(&mut self, index: usize, offset: f64);
}
