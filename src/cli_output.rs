//! Line-based terminal renderer.
//!
//! Minimal presentation layer for the binary: plain stdout lines for
//! messages, a single overwritten status line for the thinking indicator
//! and the breathing circle.

use std::io::{self, Write};

use crate::models::MessageRole;
use crate::render::Renderer;

/// Width of the breathing scale bar at rest (scale 1.0).
const BREATH_BAR_WIDTH: f64 = 14.0;

/// Renderer writing to stdout.
#[derive(Debug, Default)]
pub struct TerminalRenderer {
    /// Whether the status line currently holds transient content
    status_line_active: bool,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn clear_status_line(&mut self) {
        if self.status_line_active {
            print!("\r{}\r", " ".repeat(72));
            io::stdout().flush().ok();
            self.status_line_active = false;
        }
    }

    fn write_status_line(&mut self, text: &str) {
        print!("\r{}\r  {text}", " ".repeat(72));
        io::stdout().flush().ok();
        self.status_line_active = true;
    }
}

impl Renderer for TerminalRenderer {
    fn show_thinking(&mut self) {
        self.write_status_line("Solace is listening…");
    }

    fn hide_thinking(&mut self) {
        self.clear_status_line();
    }

    fn render_message(&mut self, role: MessageRole, display_name: &str, text: &str) {
        self.clear_status_line();
        match role {
            MessageRole::User => println!("\n{display_name} ◆"),
            MessageRole::Assistant => println!("\n✦ {display_name}"),
        }
        for line in text.lines() {
            println!("  {line}");
        }
        io::stdout().flush().ok();
    }

    fn render_breathing_frame(&mut self, label: &str, scale: f64) {
        let width = (BREATH_BAR_WIDTH * scale).round() as usize;
        self.write_status_line(&format!("({:<19}) {}", label, "●".repeat(width)));
    }
}
