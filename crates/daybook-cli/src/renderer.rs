//! Markdown output for the terminal.
//!
//! Outlines, summaries and status lines are produced as markdown by the
//! core library. With color enabled they go through a termimad skin;
//! otherwise the markdown is printed as is, which keeps output stable for
//! scripts and tests.

use anyhow::Result;
use termimad::{crossterm::style::Color, MadSkin};

/// Prints markdown either styled or as plain text.
pub struct TerminalRenderer {
    rich_enabled: bool,
    skin: MadSkin,
}

impl TerminalRenderer {
    pub fn new(rich_enabled: bool) -> Self {
        let mut skin = MadSkin::default();
        skin.set_headers_fg(Color::Cyan);
        skin.bold.set_fg(Color::Green);
        skin.italic.set_fg(Color::DarkGrey);
        skin.inline_code.set_fg(Color::Yellow);
        skin.bullet.set_fg(Color::DarkCyan);

        Self { rich_enabled, skin }
    }

    pub fn is_rich(&self) -> bool {
        self.rich_enabled
    }

    /// Prints `markdown` to stdout.
    pub fn render(&self, markdown: &str) -> Result<()> {
        if !self.rich_enabled {
            print!("{markdown}");
            return Ok(());
        }

        for line in markdown.lines() {
            match heading_level(line) {
                // Keep the hashes so nesting stays visible in long outlines
                Some(_) => println!("\x1b[1;36m{line}\x1b[0m"),
                None => {
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

/// Level of a markdown ATX heading, if `line` is one.
fn heading_level(line: &str) -> Option<usize> {
    let level = line.chars().take_while(|c| *c == '#').count();
    let rest = &line[level..];
    ((1..=6).contains(&level) && (rest.is_empty() || rest.starts_with(' '))).then_some(level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_renderer() {
        let renderer = TerminalRenderer::new(false);
        assert!(!renderer.is_rich());
    }

    #[test]
    fn test_default_is_rich() {
        assert!(TerminalRenderer::default().is_rich());
    }

    #[test]
    fn test_heading_level() {
        assert_eq!(heading_level("# Planner Outline"), Some(1));
        assert_eq!(heading_level("### January 2024 (`month-2024-01`)"), Some(3));
        assert_eq!(heading_level("#hashtag"), None);
        assert_eq!(heading_level("- Pages: 43"), None);
        assert_eq!(heading_level("####### too deep"), None);
    }
}
