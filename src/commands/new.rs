use std::path::PathBuf;

use anyhow::Result;
use chrono::Local;
use clap::Args;
use dialoguer::Input;
use owo_colors::OwoColorize;
use promogen_core::PromoResult;
use promogen_core::config::PromogenConfig;
use promogen_core::event::NewEvent;
use promogen_core::folder::{CoverSource, EventFolder, ExistingFolder};
use promogen_core::project::Project;
use promogen_core::validate::{validate_date, validate_ticket_url, validate_time, validate_title};

use crate::render::Render;

#[derive(Args, Debug, Default)]
pub struct NewArgs {
    /// Event date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,

    /// Event title
    #[arg(long)]
    pub title: Option<String>,

    /// Start time (HH:MM, 00:00 when empty)
    #[arg(long)]
    pub time: Option<String>,

    /// Location text
    #[arg(long)]
    pub location: Option<String>,

    /// Short description
    #[arg(long)]
    pub description: Option<String>,

    /// Coupon code
    #[arg(long)]
    pub coupon: Option<String>,

    /// Ticket URL
    #[arg(long)]
    pub ticket: Option<String>,

    /// Your link (instagram/whatsapp/etc)
    #[arg(long)]
    pub promoter: Option<String>,

    /// Custom slug instead of one derived from the title
    #[arg(long)]
    pub slug: Option<String>,

    /// Image to copy as cover.jpg (an empty placeholder is created otherwise)
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Rewrite the folder if it already exists
    #[arg(long)]
    pub force: bool,
}

pub fn run(project: &Project, config: &PromogenConfig, args: NewArgs) -> Result<()> {
    let interactive = args.title.is_none() || args.date.is_none();
    let existing = if args.force {
        ExistingFolder::Overwrite
    } else {
        ExistingFolder::Fail
    };

    let (event, cover) = if interactive {
        let answers = prompt_missing(args, &config.default_time)?;
        println!();
        answers
    } else {
        from_args(args)
    };

    let placeholder = matches!(cover, CoverSource::Placeholder);
    let folder = EventFolder::create(project.events_dir(), &event, cover, existing)?;

    println!("{}", format!("  Created: {}", folder.render()).green());
    println!("   - meta.json");
    if placeholder {
        println!("   - cover.jpg (placeholder, replace with the real image)");
    } else {
        println!("   - cover.jpg");
    }
    println!();
    println!("Next:");
    println!("  promogen build");

    Ok(())
}

/// Flags only; whatever is missing stays empty and fails validation.
fn from_args(args: NewArgs) -> (NewEvent, CoverSource) {
    let cover = cover_source(args.image);
    let event = NewEvent {
        title: args.title.unwrap_or_default(),
        date: args.date.unwrap_or_default(),
        time: args.time.unwrap_or_default(),
        location: args.location.unwrap_or_default(),
        description: args.description.unwrap_or_default(),
        ticket_url: args.ticket.unwrap_or_default(),
        promoter_url: args.promoter.unwrap_or_default(),
        coupon_code: args.coupon.unwrap_or_default(),
        slug: args.slug,
    };
    (event, cover)
}

fn cover_source(image: Option<PathBuf>) -> CoverSource {
    match image {
        Some(path) if !path.as_os_str().is_empty() => CoverSource::Copy(path),
        _ => CoverSource::Placeholder,
    }
}

/// Ask for every field not given on the command line, like the event form.
fn prompt_missing(args: NewArgs, default_time: &str) -> Result<(NewEvent, CoverSource)> {
    let today = Local::now().format("%Y-%m-%d").to_string();

    let title = match args.title {
        Some(t) => t,
        None => prompt_with_retry("  Title", None, validate_title)?,
    };
    let date = match args.date {
        Some(d) => d,
        None => prompt_with_retry("  Date (YYYY-MM-DD)", Some(&today), validate_date)?,
    };
    let time = match args.time {
        Some(t) => t,
        None => prompt_with_retry("  Time (HH:MM)", Some(default_time), validate_time)?,
    };
    let location = optional_or_prompt(args.location, "  Where? (skip)")?;
    let ticket_url = match args.ticket {
        Some(t) => t,
        None => prompt_with_retry("  Ticket URL", None, validate_ticket_url)?,
    };
    let coupon_code = optional_or_prompt(args.coupon, "  Coupon (skip)")?;
    let description = optional_or_prompt(args.description, "  Short description (skip)")?;
    let promoter_url = optional_or_prompt(args.promoter, "  Your link (skip)")?;

    let image = match args.image {
        Some(path) => Some(path),
        None => prompt_image()?,
    };

    let event = NewEvent {
        title,
        date,
        time,
        location,
        description,
        ticket_url,
        promoter_url,
        coupon_code,
        slug: args.slug,
    };
    Ok((event, cover_source(image)))
}

/// Prompt the user with retry on validation errors.
fn prompt_with_retry<F>(prompt: &str, default: Option<&str>, validate: F) -> Result<String>
where
    F: Fn(&str) -> PromoResult<String>,
{
    loop {
        let mut input = Input::<String>::new().with_prompt(prompt);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        let answer = input.interact_text()?;

        match validate(&answer) {
            Ok(value) => return Ok(value),
            Err(e) => eprintln!("  {}", e.to_string().red()),
        }
    }
}

fn optional_or_prompt(value: Option<String>, prompt: &str) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(Input::<String>::new()
            .with_prompt(prompt)
            .default(String::new())
            .show_default(false)
            .interact_text()?),
    }
}

fn prompt_image() -> Result<Option<PathBuf>> {
    loop {
        let answer: String = Input::new()
            .with_prompt("  Cover image path (skip for placeholder)")
            .default(String::new())
            .show_default(false)
            .interact_text()?;

        let answer = answer.trim();
        if answer.is_empty() {
            return Ok(None);
        }

        let path = PathBuf::from(answer);
        if path.is_file() {
            return Ok(Some(path));
        }
        eprintln!("  {}", format!("No such file: {}", path.display()).red());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promogen_core::PromoError;
    use tempfile::TempDir;

    fn make_args() -> NewArgs {
        NewArgs {
            date: Some("2026-03-07".to_string()),
            title: Some("Rock & Roll Night!!".to_string()),
            time: Some("22:00".to_string()),
            ticket: Some("https://tickets.example/rock".to_string()),
            coupon: Some("ROCK10".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn from_args_maps_flags_to_fields() {
        let (event, cover) = from_args(make_args());

        assert_eq!(event.title, "Rock & Roll Night!!");
        assert_eq!(event.coupon_code, "ROCK10");
        assert!(event.location.is_empty());
        assert!(matches!(cover, CoverSource::Placeholder));
        assert_eq!(
            event.validate().unwrap().folder_name,
            "2026-03-07-rock-and-roll-night"
        );
    }

    #[test]
    fn from_args_without_ticket_fails_validation() {
        let mut args = make_args();
        args.ticket = None;

        let (event, _) = from_args(args);
        assert!(matches!(event.validate(), Err(PromoError::Format(_))));
    }

    #[test]
    fn image_flag_selects_copy() {
        assert!(matches!(
            cover_source(Some(PathBuf::from("flyer.png"))),
            CoverSource::Copy(_)
        ));
        assert!(matches!(
            cover_source(Some(PathBuf::new())),
            CoverSource::Placeholder
        ));
    }

    #[test]
    fn run_creates_folder_and_rejects_duplicate() {
        let dir = TempDir::new().unwrap();
        let project = Project::new(dir.path().to_path_buf(), std::path::Path::new("events"));
        let config = PromogenConfig::default();

        run(&project, &config, make_args()).unwrap();
        assert!(
            dir.path()
                .join("events/2026-03-07-rock-and-roll-night/meta.json")
                .is_file()
        );

        let err = run(&project, &config, make_args()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PromoError>(),
            Some(PromoError::Collision(_))
        ));

        let mut forced = make_args();
        forced.force = true;
        run(&project, &config, forced).unwrap();
    }
}
