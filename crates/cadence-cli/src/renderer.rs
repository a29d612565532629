//! Terminal rendering module for plan output
//!
//! Plan text from the core crate is plain text with a few recognizable
//! shapes (headings, the `===` underline, item marks, error lines). The
//! rich renderer colors those with termimad; the plain renderer prints the
//! text unchanged.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// How a single line of output is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineStyle {
    Heading,
    Rule,
    Error,
    Body,
}

fn classify(line: &str) -> LineStyle {
    let trimmed = line.trim_start();
    if !trimmed.is_empty() && trimmed.chars().all(|c| c == '=') {
        LineStyle::Rule
    } else if trimmed.starts_with("Plan: ")
        || trimmed.starts_with("Plan completed")
        || trimmed == "Available plans:"
        || trimmed == "Items:"
        || trimmed == "Changes made:"
    {
        LineStyle::Heading
    } else if trimmed.starts_with("Error") || trimmed.starts_with("Execution failed") {
        LineStyle::Error
    } else {
        LineStyle::Body
    }
}

/// Terminal renderer that can switch between rich and plain text output
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    /// Create a new terminal renderer
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();

        skin.set_headers_fg(Color::Blue);
        skin.bold.set_fg(Color::Yellow);
        skin.italic.set_fg(Color::Magenta);
        skin.code_block.set_bg(Color::AnsiValue(238));
        skin.inline_code.set_bg(Color::AnsiValue(238));

        Self { rich_enabled, skin }
    }

    /// Render plan text to the terminal
    pub fn render(&self, text: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{text}");
            return Ok(());
        }

        for line in text.lines() {
            match classify(line) {
                LineStyle::Heading => println!("\x1b[1;34m{line}\x1b[0m"),
                LineStyle::Rule => println!("\x1b[2m{line}\x1b[0m"),
                LineStyle::Error => println!("\x1b[31m{line}\x1b[0m"),
                LineStyle::Body => {
                    self.skin.print_inline(line);
                    println!();
                }
            }
        }
        Ok(())
    }
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.rich_enabled);
    }

    #[test]
    fn test_default_is_rich() {
        let renderer = TerminalRenderer::default();
        assert!(renderer.rich_enabled);
    }

    #[test]
    fn test_classify_plan_lines() {
        assert_eq!(classify("Plan: Launch (ID: launch)"), LineStyle::Heading);
        assert_eq!(classify("==========="), LineStyle::Rule);
        assert_eq!(classify("Items:"), LineStyle::Heading);
        assert_eq!(classify("0. [✓] Content: Announce"), LineStyle::Body);
        assert_eq!(classify("   Notes: Error: boom"), LineStyle::Body);
        assert_eq!(classify("Error executing item 2: boom"), LineStyle::Error);
        assert_eq!(classify("Plan completed:"), LineStyle::Heading);
        assert_eq!(classify(""), LineStyle::Body);
    }
}
