//! Publishing event folders upstream as a GitHub pull request.
//!
//! Folder and index code never depends on this module; it only sees the
//! files on disk. `Publisher` is the whole interface: a request goes in, a
//! PR URL (or the reason there was nothing to do) comes out.

use std::future::Future;
use std::path::PathBuf;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::{PromoError, PromoResult};
use crate::tools::{SystemRunner, Tool, ToolOutput, ToolRunner, render_command};

#[derive(Debug, Clone)]
pub struct PublishRequest {
    /// Local clone of the site repository.
    pub repo: PathBuf,
    /// Pathspec staged and committed, e.g. `events/`.
    pub pathspec: String,
    pub remote: String,
    /// Branch the PR targets and the new branch starts from.
    pub base: String,
    /// New branch to create.
    pub branch: String,
    pub commit_message: String,
    pub title: String,
    pub body: String,
    /// Bring the fork's base branch up to date with its parent first.
    pub sync_fork: bool,
}

/// One external command and what it printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepLog {
    pub command: String,
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Opened {
        url: String,
        branch: String,
        log: Vec<StepLog>,
    },
    NothingToPublish {
        log: Vec<StepLog>,
    },
}

impl PublishOutcome {
    pub fn log(&self) -> &[StepLog] {
        match self {
            PublishOutcome::Opened { log, .. } | PublishOutcome::NothingToPublish { log } => log,
        }
    }
}

pub trait Publisher {
    fn publish(
        &self,
        request: &PublishRequest,
    ) -> impl Future<Output = PromoResult<PublishOutcome>> + Send;
}

/// Subset of `gh repo view --json nameWithOwner,owner,parent`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepoView {
    name_with_owner: String,
    owner: Owner,
    parent: Option<ParentRepo>,
}

#[derive(Debug, Deserialize)]
struct Owner {
    login: String,
}

#[derive(Debug, Deserialize)]
struct ParentRepo {
    name: String,
    owner: Owner,
}

impl RepoView {
    /// PRs go to the parent when this is a fork, otherwise to the repo itself.
    fn upstream(&self) -> String {
        match &self.parent {
            Some(parent) => format!("{}/{}", parent.owner.login, parent.name),
            None => self.name_with_owner.clone(),
        }
    }
}

/// git + gh implementation of `Publisher`.
#[derive(Debug, Clone, Default)]
pub struct GitHubPublisher<R = SystemRunner> {
    runner: R,
}

impl<R: ToolRunner + Sync> GitHubPublisher<R> {
    pub fn new(runner: R) -> Self {
        GitHubPublisher { runner }
    }
}

impl<R: ToolRunner + Sync> Publisher for GitHubPublisher<R> {
    async fn publish(&self, request: &PublishRequest) -> PromoResult<PublishOutcome> {
        let mut session = Session {
            runner: &self.runner,
            request,
            log: Vec::new(),
        };

        let view = session
            .run(Tool::Gh, &["repo", "view", "--json", "nameWithOwner,owner,parent"])
            .await?;
        let repo: RepoView = serde_json::from_str(&view.stdout).map_err(|e| {
            PromoError::format(format!("Unexpected `gh repo view` output: {e}"))
        })?;

        if request.sync_fork && repo.parent.is_some() {
            let synced = session
                .run(
                    Tool::Gh,
                    &[
                        "repo",
                        "sync",
                        repo.name_with_owner.as_str(),
                        "--branch",
                        request.base.as_str(),
                    ],
                )
                .await;
            if let Err(e) = synced {
                warn!(error = %e, "fork sync failed, continuing");
            }
        }

        session.run(Tool::Git, &["checkout", request.base.as_str()]).await?;
        session
            .run(Tool::Git, &["pull", request.remote.as_str(), request.base.as_str()])
            .await?;

        let status = session
            .run(Tool::Git, &["status", "--porcelain", "--", request.pathspec.as_str()])
            .await?;
        if status.stdout.trim().is_empty() {
            info!(pathspec = %request.pathspec, "no changes to publish");
            return Ok(PublishOutcome::NothingToPublish { log: session.log });
        }

        session
            .run(Tool::Git, &["checkout", "-b", request.branch.as_str()])
            .await?;
        session
            .run(Tool::Git, &["add", "--", request.pathspec.as_str()])
            .await?;
        session
            .run(Tool::Git, &["commit", "-m", request.commit_message.as_str()])
            .await?;
        session
            .run(Tool::Git, &["push", "-u", request.remote.as_str(), request.branch.as_str()])
            .await?;

        let upstream = repo.upstream();
        let head = format!("{}:{}", repo.owner.login, request.branch);
        let pr = session
            .run(
                Tool::Gh,
                &[
                    "pr",
                    "create",
                    "--repo",
                    upstream.as_str(),
                    "--base",
                    request.base.as_str(),
                    "--head",
                    head.as_str(),
                    "--title",
                    request.title.as_str(),
                    "--body",
                    request.body.as_str(),
                ],
            )
            .await?;

        let url = pr
            .stdout
            .lines()
            .map(str::trim)
            .rfind(|line| !line.is_empty())
            .ok_or_else(|| PromoError::format("`gh pr create` printed no PR URL"))?
            .to_string();

        info!(%url, "opened pull request");
        Ok(PublishOutcome::Opened {
            url,
            branch: request.branch.clone(),
            log: session.log,
        })
    }
}

/// Runs steps in the request's repository and records each one.
struct Session<'a, R> {
    runner: &'a R,
    request: &'a PublishRequest,
    log: Vec<StepLog>,
}

impl<R: ToolRunner + Sync> Session<'_, R> {
    async fn run(&mut self, tool: Tool, args: &[&str]) -> PromoResult<ToolOutput> {
        let command = render_command(tool, args);
        let result = self.runner.run(tool, args, &self.request.repo).await;

        let entry = match &result {
            Ok(output) => StepLog {
                command,
                stdout: output.stdout.clone(),
                stderr: output.stderr.clone(),
                success: true,
            },
            Err(PromoError::ExternalTool { stdout, stderr, .. }) => StepLog {
                command,
                stdout: stdout.clone(),
                stderr: stderr.clone(),
                success: false,
            },
            Err(e) => StepLog {
                command,
                stdout: String::new(),
                stderr: e.to_string(),
                success: false,
            },
        };
        info!(command = %entry.command, success = entry.success, "{}", entry.stdout.trim_end());
        self.log.push(entry);

        result
    }
}
