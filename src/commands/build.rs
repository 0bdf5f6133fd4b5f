use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use promogen_core::index::build_index;
use promogen_core::project::Project;

use crate::render::{Render, pluralize};

pub fn run(project: &Project) -> Result<()> {
    let report = build_index(project.events_dir()).with_context(|| {
        format!(
            "Index not written; fix the event folder and run `promogen build` again ({})",
            project.events_dir().display()
        )
    })?;

    for warning in &report.warnings {
        println!("{}", warning.render());
    }

    for entry in &report.entries {
        println!("{}", entry.render());
    }

    let count = report.entries.len();
    println!(
        "{}",
        format!(
            "  Wrote {} with {} {}",
            report.index_path.display(),
            count,
            pluralize("event", count)
        )
        .green()
    );

    Ok(())
}
