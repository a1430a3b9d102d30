use chrono::{DateTime, Datelike, Utc};
use rust_embed::Embed;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

use crate::motion::MotionConfig;

pub const PORTFOLIO_FILE: &str = "portfolio.json";

static PORTFOLIO: LazyLock<Portfolio> = LazyLock::new(|| {
    load(PORTFOLIO_FILE).unwrap_or_else(|e| {
        log::error!("falling back to empty portfolio: {e}");
        Portfolio::default()
    })
});

#[derive(Embed)]
#[folder = "content"]
pub struct ContentAssets;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("Content file not found: {0}")]
    NotFound(String),
    #[error("Couldn't parse content: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Portfolio {
    pub owner: String,
    pub role: String,
    pub headline: String,
    pub tagline: String,
    pub resume: Resume,
    pub nav: Vec<NavLink>,
    pub logos: Vec<String>,
    pub education: Vec<Education>,
    pub skills: Vec<SkillGroup>,
    pub experience: Vec<Role>,
    pub contact: Contact,
    pub motion: MotionConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Resume {
    pub href: String,
    pub file_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Education {
    pub year: String,
    pub title: String,
    pub org: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillGroup {
    pub name: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Role {
    pub company: String,
    pub role: String,
    pub period: String,
    pub bullets: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub heading: String,
    pub pitch_title: String,
    pub pitch: String,
    pub location: String,
    pub email: String,
    pub whatsapp_number: String,
    pub whatsapp_display: String,
    pub whatsapp_message: String,
    pub linkedin_url: String,
    pub linkedin_display: String,
    pub github_url: String,
    pub phone: String,
}

pub fn parse(raw: &str) -> Result<Portfolio, ContentError> {
    Ok(serde_json::from_str(raw)?)
}

pub fn load(name: &str) -> Result<Portfolio, ContentError> {
    let file = ContentAssets::get(name).ok_or_else(|| ContentError::NotFound(name.to_string()))?;
    Ok(serde_json::from_slice(&file.data)?)
}

/// Page data embedded at compile time, parsed on first use.
pub fn portfolio() -> &'static Portfolio {
    &PORTFOLIO
}

/// Year the site was built, for the footer.
pub fn build_year() -> i32 {
    DateTime::parse_from_rfc3339(env!("BUILD_TIME"))
        .map(|time| time.year())
        .unwrap_or_else(|_| Utc::now().year())
}
