use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use owo_colors::OwoColorize;
use promogen_core::config::PromogenConfig;
use promogen_core::index::read_index;
use promogen_core::project::Project;
use promogen_core::publish::{GitHubPublisher, PublishOutcome, PublishRequest, Publisher};
use promogen_core::tools::SystemRunner;

use crate::render::Render;
use crate::utils::tui::create_spinner;

pub struct PublishOptions {
    pub message: Option<String>,
    pub base: Option<String>,
    pub sync_fork: bool,
    pub build: bool,
    pub open: bool,
}

pub async fn run(project: &Project, config: &PromogenConfig, options: PublishOptions) -> Result<()> {
    if options.build {
        super::build::run(project)?;
        println!();
    }

    let folders = read_index(project.events_dir())?;
    let request = build_request(project, config, &options, &folders, Local::now());

    let spinner = create_spinner(format!("  Publishing to {}", request.base));
    let result = GitHubPublisher::new(SystemRunner).publish(&request).await;
    spinner.finish_and_clear();

    let outcome = result.context("Publishing failed; event folders on disk are unchanged")?;

    for step in outcome.log() {
        println!("{}", step.render());
    }
    println!();

    match outcome {
        PublishOutcome::Opened { url, branch, .. } => {
            println!("{}", format!("  Opened pull request from {}", branch).green());
            println!("  {}", url);
            if options.open {
                open::that(&url).with_context(|| format!("Could not open {}", url))?;
            }
        }
        PublishOutcome::NothingToPublish { .. } => {
            println!(
                "{}",
                format!("  No changes under {} to publish", request.pathspec).yellow()
            );
        }
    }

    Ok(())
}

fn build_request(
    project: &Project,
    config: &PromogenConfig,
    options: &PublishOptions,
    folders: &[String],
    now: DateTime<Local>,
) -> PublishRequest {
    let publish = &config.publish;
    let message = options
        .message
        .clone()
        .unwrap_or_else(|| format!("Update events ({})", now.format("%Y-%m-%d %H:%M")));

    let mut body = String::from("Event folders updated with promogen.\n");
    if !folders.is_empty() {
        body.push_str("\nIndexed events:\n");
        for folder in folders {
            body.push_str(&format!("- {}\n", folder));
        }
    }

    PublishRequest {
        repo: project.root().to_path_buf(),
        pathspec: project.events_pathspec(),
        remote: publish.remote.clone(),
        base: options
            .base
            .clone()
            .unwrap_or_else(|| publish.base_branch.clone()),
        branch: format!("{}{}", publish.branch_prefix, now.format("%Y%m%d-%H%M%S")),
        commit_message: message.clone(),
        title: message,
        body,
        sync_fork: options.sync_fork,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::path::{Path, PathBuf};

    fn make_options() -> PublishOptions {
        PublishOptions {
            message: None,
            base: None,
            sync_fork: true,
            build: false,
            open: false,
        }
    }

    #[test]
    fn request_uses_config_defaults_and_timestamped_branch() {
        let project = Project::new(PathBuf::from("/site"), Path::new("events"));
        let config = PromogenConfig::default();
        let now = Local.with_ymd_and_hms(2026, 10, 17, 9, 5, 3).unwrap();
        let folders = vec!["2026-03-07-rock-and-roll-night".to_string()];

        let request = build_request(&project, &config, &make_options(), &folders, now);

        assert_eq!(request.repo, PathBuf::from("/site"));
        assert_eq!(request.pathspec, "events/");
        assert_eq!(request.remote, "origin");
        assert_eq!(request.base, "main");
        assert_eq!(request.branch, "events/20261017-090503");
        assert_eq!(request.commit_message, "Update events (2026-10-17 09:05)");
        assert_eq!(request.title, request.commit_message);
        assert!(request.body.contains("- 2026-03-07-rock-and-roll-night"));
        assert!(request.sync_fork);
    }

    #[test]
    fn request_honours_overrides() {
        let project = Project::new(PathBuf::from("/site"), Path::new("events"));
        let config = PromogenConfig::default();
        let now = Local.with_ymd_and_hms(2026, 10, 17, 9, 5, 3).unwrap();
        let mut options = make_options();
        options.message = Some("Add spring line-up".to_string());
        options.base = Some("staging".to_string());
        options.sync_fork = false;

        let request = build_request(&project, &config, &options, &[], now);

        assert_eq!(request.base, "staging");
        assert_eq!(request.commit_message, "Add spring line-up");
        assert!(!request.body.contains("Indexed events"));
        assert!(!request.sync_fork);
    }
}
