use std::fmt;

/// Named session keys. All live in one flat namespace per profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    /// Current session user, password hash stripped.
    User,
    /// Registered credential set, password hashes included.
    Users,
    UploadedFile,
    SelectedPlan,
    ParsedData,
    SelectedTemplate,
    Customizations,
    Websites,
}

impl SessionKey {
    pub const ALL: [SessionKey; 8] = [
        SessionKey::User,
        SessionKey::Users,
        SessionKey::UploadedFile,
        SessionKey::SelectedPlan,
        SessionKey::ParsedData,
        SessionKey::SelectedTemplate,
        SessionKey::Customizations,
        SessionKey::Websites,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            SessionKey::User => "resume2website_user",
            SessionKey::Users => "resume2website_users",
            SessionKey::UploadedFile => "resume2website_uploaded_file",
            SessionKey::SelectedPlan => "resume2website_selected_plan",
            SessionKey::ParsedData => "resume2website_parsed_data",
            SessionKey::SelectedTemplate => "resume2website_selected_template",
            SessionKey::Customizations => "resume2website_customizations",
            SessionKey::Websites => "user_websites",
        }
    }
}

impl fmt::Display for SessionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
