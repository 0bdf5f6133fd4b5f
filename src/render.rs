//! Colored terminal rendering for promogen-core types.

use owo_colors::OwoColorize;
use promogen_core::folder::EventFolder;
use promogen_core::index::{IndexEntry, IndexWarning};
use promogen_core::publish::StepLog;

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for IndexEntry {
    fn render(&self) -> String {
        let when = self.starts_at.format("%a %d %b %Y %H:%M").to_string();
        let title = if self.title.is_empty() {
            "(untitled)".to_string()
        } else {
            self.title.clone()
        };
        format!("   {} {} {}", when.dimmed(), title, self.folder.dimmed())
    }
}

impl Render for IndexWarning {
    fn render(&self) -> String {
        match self {
            IndexWarning::MissingImage { folder, image } => {
                format!("   Missing image in {}: {}", folder, image)
                    .yellow()
                    .to_string()
            }
        }
    }
}

impl Render for StepLog {
    fn render(&self) -> String {
        let mut lines = Vec::new();
        if self.success {
            lines.push(format!("   {} {}", "✓".green(), self.command));
        } else {
            lines.push(format!("   {} {}", "✗".red(), self.command.red()));
        }

        for output in [&self.stdout, &self.stderr] {
            lines.extend(
                output
                    .lines()
                    .filter(|l| !l.trim().is_empty())
                    .map(|l| format!("      {}", l.dimmed())),
            );
        }

        lines.join("\n")
    }
}

impl Render for EventFolder {
    fn render(&self) -> String {
        format!("📁 {}", self.path.display())
    }
}

pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
