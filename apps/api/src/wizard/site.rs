//! Builds the website record and share links shown on the Success view.

use anyhow::Context;
use chrono::Utc;
use rand::Rng;
use serde::Serialize;
use url::Url;
use uuid::Uuid;

use crate::session::models::{Customization, ParsedResume, WebsiteRecord, WebsiteStatus};

/// Lowercased name with every whitespace run collapsed to one `-`.
pub fn slug(name: &str) -> String {
    name.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Host the site for `resume` is served on: `<slug>.<site_domain>`.
pub fn site_host(resume: &ParsedResume, site_domain: &str) -> String {
    format!("{}.{}", slug(&resume.personal_info.name), site_domain)
}

pub fn website_record(
    resume: &ParsedResume,
    customization: &Customization,
    site_domain: &str,
) -> WebsiteRecord {
    let info = &resume.personal_info;
    WebsiteRecord {
        id: Uuid::new_v4().to_string(),
        name: format!("{} - {}", info.name, info.title),
        url: site_host(resume, site_domain),
        template: customization.template,
        status: WebsiteStatus::Live,
        created_at: Utc::now(),
        views: rand::rng().random_range(10..60),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLinks {
    pub twitter: String,
    pub linkedin: String,
    pub facebook: String,
}

/// Share links for a site at `host` (no scheme).
pub fn share_links(host: &str) -> anyhow::Result<ShareLinks> {
    let site = format!("https://{host}");
    let text = format!("Check out my new professional website: {site}");

    let twitter = Url::parse_with_params("https://twitter.com/intent/tweet", &[("text", &text)])
        .context("building twitter share link")?;
    let linkedin = Url::parse_with_params(
        "https://www.linkedin.com/sharing/share-offsite/",
        &[("url", &site)],
    )
    .context("building linkedin share link")?;
    let facebook = Url::parse_with_params("https://www.facebook.com/sharer/sharer.php", &[("u", &site)])
        .context("building facebook share link")?;

    Ok(ShareLinks {
        twitter: twitter.into(),
        linkedin: linkedin.into(),
        facebook: facebook.into(),
    })
}
