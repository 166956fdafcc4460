//! Dashboard: the profile's deployed websites with search and summary stats.

use std::collections::HashSet;

use serde::Serialize;

use crate::session::models::{WebsiteRecord, WebsiteStatus};
use crate::wizard::catalog;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_websites: usize,
    pub live_websites: usize,
    pub total_views: u64,
    pub templates_used: usize,
}

pub fn compute_stats(websites: &[WebsiteRecord]) -> DashboardStats {
    DashboardStats {
        total_websites: websites.len(),
        live_websites: websites
            .iter()
            .filter(|w| w.status == WebsiteStatus::Live)
            .count(),
        total_views: websites.iter().map(|w| u64::from(w.views)).sum(),
        templates_used: websites
            .iter()
            .map(|w| w.template)
            .collect::<HashSet<_>>()
            .len(),
    }
}

/// Case-insensitive match of `query` against the site name or its template
/// (id or display name). An empty query keeps everything.
pub fn search<'a>(websites: &'a [WebsiteRecord], query: &str) -> Vec<&'a WebsiteRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return websites.iter().collect();
    }
    websites
        .iter()
        .filter(|w| {
            w.name.to_lowercase().contains(&needle)
                || w.template.as_str().contains(&needle)
                || catalog::template(w.template)
                    .name
                    .to_lowercase()
                    .contains(&needle)
        })
        .collect()
}
