use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ────────────────────────────────────────────────────────────────────────────
// Identity
// ────────────────────────────────────────────────────────────────────────────

/// A registered identity. The stored credential set keeps `password_hash`;
/// the current-session copy never does.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CredentialRecord {
    pub fn without_password(&self) -> Self {
        Self {
            password_hash: None,
            ..self.clone()
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wizard artifacts
// ────────────────────────────────────────────────────────────────────────────

/// Metadata of the selected resume file. File bytes are never kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub name: String,
    pub size: u64,
    pub mime_type: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PlanId {
    Basic,
    Pro,
    Enterprise,
}

impl PlanId {
    pub const fn as_str(self) -> &'static str {
        match self {
            PlanId::Basic => "basic",
            PlanId::Pro => "pro",
            PlanId::Enterprise => "enterprise",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateId {
    ProfessionalExecutive,
    CreativePortfolio,
    MinimalModern,
}

impl TemplateId {
    pub const ALL: [TemplateId; 3] = [
        TemplateId::ProfessionalExecutive,
        TemplateId::CreativePortfolio,
        TemplateId::MinimalModern,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            TemplateId::ProfessionalExecutive => "professional-executive",
            TemplateId::CreativePortfolio => "creative-portfolio",
            TemplateId::MinimalModern => "minimal-modern",
        }
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Written by Preview on deploy, read by Success.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Customization {
    pub template: TemplateId,
    pub color_scheme: String,
    pub deployed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WebsiteStatus {
    Live,
    Draft,
    Processing,
}

/// One "deployed" site. The list under `user_websites` is append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WebsiteRecord {
    pub id: String,
    pub name: String,
    pub url: String,
    pub template: TemplateId,
    pub status: WebsiteStatus,
    pub created_at: DateTime<Utc>,
    pub views: u32,
}

// ────────────────────────────────────────────────────────────────────────────
// Parsed resume document
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ParsedResume {
    pub personal_info: PersonalInfo,
    pub work_experience: Vec<WorkExperience>,
    pub education: Vec<Education>,
    pub skills: Vec<SkillGroup>,
    pub certifications: Vec<Certification>,
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub email: String,
    pub phone: String,
    pub location: String,
    pub linkedin: String,
    pub website: String,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkExperience {
    pub company: String,
    pub position: String,
    pub duration: String,
    pub location: String,
    pub description: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub year: String,
    pub gpa: Option<String>,
    pub relevant: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkillGroup {
    pub category: String,
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub year: String,
    pub id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub results: String,
    pub technologies: Vec<String>,
}
