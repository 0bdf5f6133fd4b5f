use anyhow::Result;
use owo_colors::OwoColorize;
use promogen_core::config::PromogenConfig;
use promogen_core::index::read_index;
use promogen_core::project::Project;

pub fn run(config: &PromogenConfig, project: &Project) -> Result<()> {
    let indexed = read_index(project.events_dir())?;

    println!("{}", "promogen".bold());
    println!("   config:  {}", PromogenConfig::config_path()?.display());
    println!("   root:    {}", project.root().display());
    println!("   events:  {}", project.events_dir().display());
    println!(
        "   index:   {} {}",
        project.index_path().display(),
        format!("({} indexed)", indexed.len()).dimmed()
    );
    println!(
        "   publish: {} → {}/{}{}",
        config.publish.branch_prefix,
        config.publish.remote,
        config.publish.base_branch,
        if config.publish.sync_fork {
            ", fork sync on"
        } else {
            ""
        }
    );

    Ok(())
}
