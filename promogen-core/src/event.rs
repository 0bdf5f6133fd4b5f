//! Event record stored as `meta.json` in each event folder.

use std::path::Path;

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::PromoResult;
use crate::json::{read_json, write_json};
use crate::slug::slugify;
use crate::validate::{
    DEFAULT_TIME, parse_date, parse_time, validate_date, validate_slug, validate_ticket_url,
    validate_time, validate_title,
};

pub const META_FILE: &str = "meta.json";
pub const COVER_FILE: &str = "cover.jpg";

fn default_time() -> String {
    DEFAULT_TIME.to_string()
}

/// `"time": null` reads as midnight, like a missing time.
fn time_or_default<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_else(default_time))
}

fn default_image() -> String {
    COVER_FILE.to_string()
}

/// The contents of `meta.json`. Field order here is the order on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMeta {
    pub title: String,
    pub date: String,
    #[serde(default = "default_time", deserialize_with = "time_or_default")]
    pub time: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub ticket_url: String,
    #[serde(default)]
    pub promoter_url: String,
    #[serde(default)]
    pub coupon_code: String,
    #[serde(default = "default_image")]
    pub image: String,
}

impl EventMeta {
    pub fn load(path: &Path) -> PromoResult<Self> {
        read_json(path)
    }

    pub fn save(&self, path: &Path) -> PromoResult<()> {
        write_json(path, self)
    }

    /// Combined date and time; a blank time counts as midnight.
    pub fn starts_at(&self) -> PromoResult<NaiveDateTime> {
        let date = parse_date(&self.date)?;
        let time = parse_time(&self.time)?;
        Ok(date.and_time(time))
    }

    pub fn folder_name(&self, slug: &str) -> String {
        format!("{}-{}", self.date, slug)
    }
}

/// Raw field values for a new event, as typed by the user.
#[derive(Debug, Clone, Default)]
pub struct NewEvent {
    pub title: String,
    pub date: String,
    pub time: String,
    pub location: String,
    pub description: String,
    pub ticket_url: String,
    pub promoter_url: String,
    pub coupon_code: String,
    /// Overrides the slug derived from the title.
    pub slug: Option<String>,
}

/// A `NewEvent` that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEvent {
    pub meta: EventMeta,
    pub folder_name: String,
}

impl NewEvent {
    pub fn validate(&self) -> PromoResult<ValidEvent> {
        let title = validate_title(&self.title)?;
        let date = validate_date(&self.date)?;
        let time = validate_time(&self.time)?;
        let ticket_url = validate_ticket_url(&self.ticket_url)?;

        let slug = match self.slug.as_deref().map(str::trim) {
            Some(custom) if !custom.is_empty() => validate_slug(custom)?,
            _ => slugify(&title),
        };

        let meta = EventMeta {
            title,
            date,
            time,
            location: self.location.trim().to_string(),
            description: self.description.trim().to_string(),
            ticket_url,
            promoter_url: self.promoter_url.trim().to_string(),
            coupon_code: self.coupon_code.trim().to_string(),
            image: default_image(),
        };
        let folder_name = meta.folder_name(&slug);

        Ok(ValidEvent { meta, folder_name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PromoError;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn make_new_event() -> NewEvent {
        NewEvent {
            title: "Rock & Roll Night!!".to_string(),
            date: "2026-03-07".to_string(),
            time: "22:00".to_string(),
            location: " The Barby ".to_string(),
            ticket_url: "https://tickets.example/rock".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn validate_derives_folder_name_from_title() {
        let valid = make_new_event().validate().unwrap();
        assert_eq!(valid.folder_name, "2026-03-07-rock-and-roll-night");
        assert_eq!(valid.meta.title, "Rock & Roll Night!!");
        assert_eq!(valid.meta.location, "The Barby");
        assert_eq!(valid.meta.image, "cover.jpg");
    }

    #[test]
    fn validate_uses_custom_slug() {
        let mut event = make_new_event();
        event.slug = Some("spring-opening".to_string());
        assert_eq!(
            event.validate().unwrap().folder_name,
            "2026-03-07-spring-opening"
        );

        event.slug = Some("  ".to_string());
        assert_eq!(
            event.validate().unwrap().folder_name,
            "2026-03-07-rock-and-roll-night"
        );

        event.slug = Some("Not A Slug".to_string());
        assert!(event.validate().is_err());
    }

    #[test]
    fn validate_defaults_blank_time() {
        let mut event = make_new_event();
        event.time = String::new();
        assert_eq!(event.validate().unwrap().meta.time, "00:00");
    }

    #[test]
    fn validate_requires_title_and_ticket() {
        let mut event = make_new_event();
        event.title = " ".to_string();
        assert!(matches!(event.validate(), Err(PromoError::Format(_))));

        let mut event = make_new_event();
        event.ticket_url = String::new();
        assert!(matches!(event.validate(), Err(PromoError::Format(_))));
    }

    #[test]
    fn starts_at_combines_date_and_time() {
        let meta = make_new_event().validate().unwrap().meta;
        assert_eq!(
            meta.starts_at().unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 7)
                .unwrap()
                .and_hms_opt(22, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn starts_at_treats_blank_time_as_midnight() {
        let mut meta = make_new_event().validate().unwrap().meta;
        meta.time = String::new();
        assert_eq!(
            meta.starts_at().unwrap(),
            NaiveDate::from_ymd_opt(2026, 3, 7)
                .unwrap()
                .and_hms_opt(0, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn meta_round_trips_through_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(META_FILE);

        let mut meta = make_new_event().validate().unwrap().meta;
        meta.description = "ערב רוק עם הפתעות".to_string();
        meta.coupon_code = "ROCK10".to_string();
        meta.save(&path).unwrap();

        assert_eq!(EventMeta::load(&path).unwrap(), meta);
    }

    proptest! {
        #[test]
        fn prop_meta_round_trips_through_json(
            title in any::<String>(),
            location in any::<String>(),
            description in any::<String>(),
            ticket_url in any::<String>(),
            coupon_code in any::<String>(),
            hour in 0u32..24,
            minute in 0u32..60,
        ) {
            let dir = TempDir::new().unwrap();
            let path = dir.path().join(META_FILE);
            let meta = EventMeta {
                title,
                date: "2026-03-07".to_string(),
                time: format!("{hour:02}:{minute:02}"),
                location,
                description,
                ticket_url,
                promoter_url: String::new(),
                coupon_code,
                image: COVER_FILE.to_string(),
            };

            meta.save(&path).unwrap();
            prop_assert_eq!(EventMeta::load(&path).unwrap(), meta);
        }
    }

    #[test]
    fn meta_is_written_in_fixed_field_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(META_FILE);
        make_new_event().validate().unwrap().meta.save(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let keys: Vec<&str> = content
            .lines()
            .filter_map(|l| l.trim().strip_prefix('"'))
            .filter_map(|l| l.split('"').next())
            .collect();
        assert_eq!(
            keys,
            [
                "title",
                "date",
                "time",
                "location",
                "description",
                "ticket_url",
                "promoter_url",
                "coupon_code",
                "image"
            ]
        );
    }

    #[test]
    fn meta_fills_optional_fields_when_reading() {
        let meta: EventMeta =
            serde_json::from_str(r#"{"title": "", "date": "2026-01-01"}"#).unwrap();
        assert_eq!(meta.time, "00:00");
        assert_eq!(meta.image, "cover.jpg");
        assert!(meta.location.is_empty());
    }

    #[test]
    fn meta_reads_null_time_as_midnight() {
        let meta: EventMeta =
            serde_json::from_str(r#"{"title": "x", "date": "2026-01-01", "time": null}"#).unwrap();
        assert_eq!(meta.time, "00:00");
    }

    #[test]
    fn meta_requires_title_and_date() {
        assert!(serde_json::from_str::<EventMeta>(r#"{"title": "x"}"#).is_err());
        assert!(serde_json::from_str::<EventMeta>(r#"{"date": "2026-01-01"}"#).is_err());
    }
}
