/// Tabs of the settings page. Values are displayed only; nothing is saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsTab {
    General,
    Notifications,
    Security,
    Appearance,
}

impl SettingsTab {
    pub const ALL: [SettingsTab; 4] = [
        SettingsTab::General,
        SettingsTab::Notifications,
        SettingsTab::Security,
        SettingsTab::Appearance,
    ];

    /// Unknown or missing names select the first tab.
    pub fn parse(name: Option<&str>) -> Self {
        match name.map(str::trim) {
            Some("notifications") => SettingsTab::Notifications,
            Some("security") => SettingsTab::Security,
            Some("appearance") => SettingsTab::Appearance,
            _ => SettingsTab::General,
        }
    }

    pub fn slug(self) -> &'static str {
        match self {
            SettingsTab::General => "general",
            SettingsTab::Notifications => "notifications",
            SettingsTab::Security => "security",
            SettingsTab::Appearance => "appearance",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SettingsTab::General => "General",
            SettingsTab::Notifications => "Notifications",
            SettingsTab::Security => "Security",
            SettingsTab::Appearance => "Appearance",
        }
    }
}

/// One read-only setting row.
#[derive(Debug, Clone)]
pub struct SettingDisplay {
    pub label: &'static str,
    pub value: String,
    pub description: &'static str,
}

/// Rows shown on `tab`, filled from the running configuration.
pub fn settings_for(tab: SettingsTab, app_name: &str, login_url: &str) -> Vec<SettingDisplay> {
    match tab {
        SettingsTab::General => vec![
            SettingDisplay {
                label: "Application name",
                value: app_name.to_string(),
                description: "Shown in the header and page titles",
            },
            SettingDisplay {
                label: "Time zone",
                value: "Server local time".to_string(),
                description: "Used for \"today\" in the calendar",
            },
        ],
        SettingsTab::Notifications => vec![SettingDisplay {
            label: "Onboarding confirmations",
            value: "Enabled".to_string(),
            description: "Confirmation page after a successful onboarding",
        }],
        SettingsTab::Security => vec![
            SettingDisplay {
                label: "Sign-in page",
                value: login_url.to_string(),
                description: "Anonymous requests are redirected here",
            },
            SettingDisplay {
                label: "CSRF protection",
                value: "Enabled".to_string(),
                description: "Every form carries a per-session token",
            },
        ],
        SettingsTab::Appearance => vec![SettingDisplay {
            label: "Theme",
            value: "Light".to_string(),
            description: "Dashboard color scheme",
        }],
    }
}
