//! Rendering interface consumed by the session core.

use crate::models::MessageRole;

/// Display surface implemented by the presentation layer.
///
/// The core only hands over semantic content; colors, fonts, and layout are
/// the implementor's business. All calls happen on the UI loop.
pub trait Renderer {
    /// Show the transient "thinking" indicator for an in-flight call.
    fn show_thinking(&mut self);

    /// Remove the thinking indicator.
    fn hide_thinking(&mut self);

    /// Render one finished message.
    fn render_message(&mut self, role: MessageRole, display_name: &str, text: &str);

    /// Render one frame of the breathing animation.
    fn render_breathing_frame(&mut self, label: &str, scale: f64);
}
