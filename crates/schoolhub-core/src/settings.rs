//! Account settings and password change records
//!
//! The settings screen edits a flat record with one named field per option.
//! Records are validated before they are sent anywhere.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use validator::Validate;

/// Colour theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Light theme
    Light,
    /// Dark theme
    Dark,
    /// Follow the operating system
    #[default]
    System,
}

/// Boolean options that can be flipped from the settings screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// Email notifications
    EmailNotifications,
    /// Push notifications
    PushNotifications,
    /// Course update notices
    CourseUpdates,
    /// Assignment due-date reminders
    AssignmentReminders,
    /// Profile visible to other users
    ProfileVisible,
    /// Email address shown on the profile
    ShowEmail,
}

/// Per-user account settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AccountSettings {
    /// Send notifications by email
    pub email_notifications: bool,
    /// Send push notifications
    pub push_notifications: bool,
    /// Notify about course updates
    pub course_updates: bool,
    /// Remind about upcoming assignments
    pub assignment_reminders: bool,
    /// Show the profile to other users
    pub profile_visible: bool,
    /// Show the email address on the profile
    pub show_email: bool,
    /// Colour theme
    pub theme: Theme,
    /// Interface language tag, e.g. `en` or `pt-BR`
    #[validate(length(min = 2, max = 5, message = "must be a 2-5 character language tag"))]
    pub language: String,
    /// Time zone name, e.g. `Europe/Berlin`
    #[validate(length(min = 1, max = 64, message = "must be a non-empty time zone name"))]
    pub timezone: String,
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            push_notifications: false,
            course_updates: true,
            assignment_reminders: true,
            profile_visible: true,
            show_email: false,
            theme: Theme::default(),
            language: "en".to_string(),
            timezone: "UTC".to_string(),
        }
    }
}

impl AccountSettings {
    /// Start from the defaults
    #[must_use]
    pub fn builder() -> AccountSettingsBuilder {
        AccountSettingsBuilder {
            settings: Self::default(),
        }
    }

    /// Check every field
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the first offending field.
    pub fn check(&self) -> Result<()> {
        self.validate().map_err(Error::from)
    }

    /// Current value of a boolean option
    #[must_use]
    pub const fn is_enabled(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::EmailNotifications => self.email_notifications,
            Toggle::PushNotifications => self.push_notifications,
            Toggle::CourseUpdates => self.course_updates,
            Toggle::AssignmentReminders => self.assignment_reminders,
            Toggle::ProfileVisible => self.profile_visible,
            Toggle::ShowEmail => self.show_email,
        }
    }

    /// Flip a boolean option, returning the new value
    pub fn toggle(&mut self, toggle: Toggle) -> bool {
        let slot = match toggle {
            Toggle::EmailNotifications => &mut self.email_notifications,
            Toggle::PushNotifications => &mut self.push_notifications,
            Toggle::CourseUpdates => &mut self.course_updates,
            Toggle::AssignmentReminders => &mut self.assignment_reminders,
            Toggle::ProfileVisible => &mut self.profile_visible,
            Toggle::ShowEmail => &mut self.show_email,
        };
        *slot = !*slot;
        *slot
    }
}

/// Builder that validates on [`AccountSettingsBuilder::build`]
#[derive(Debug, Clone)]
pub struct AccountSettingsBuilder {
    settings: AccountSettings,
}

impl AccountSettingsBuilder {
    /// Set a boolean option
    #[must_use]
    pub fn set(mut self, toggle: Toggle, enabled: bool) -> Self {
        if self.settings.is_enabled(toggle) != enabled {
            self.settings.toggle(toggle);
        }
        self
    }

    /// Set the theme
    #[must_use]
    pub fn theme(mut self, theme: Theme) -> Self {
        self.settings.theme = theme;
        self
    }

    /// Set the language tag
    #[must_use]
    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.settings.language = language.into();
        self
    }

    /// Set the time zone
    #[must_use]
    pub fn timezone(mut self, timezone: impl Into<String>) -> Self {
        self.settings.timezone = timezone.into();
        self
    }

    /// Validate and return the settings
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if any field is out of range.
    pub fn build(self) -> Result<AccountSettings> {
        self.settings.check()?;
        Ok(self.settings)
    }
}

/// Request to change the operator's password
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    /// Password currently in use
    #[validate(length(min = 1, message = "is required"))]
    pub current_password: String,

    /// Replacement password
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub new_password: String,

    /// Repeat of the replacement password
    #[validate(must_match(other = "new_password", message = "does not match the new password"))]
    pub confirm_password: String,
}

impl PasswordChange {
    /// Create a password change request
    pub fn new(
        current_password: impl Into<String>,
        new_password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            current_password: current_password.into(),
            new_password: new_password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// Check the request before it is sent
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if a field is missing, too short, the
    /// confirmation differs, or the new password equals the current one.
    pub fn check(&self) -> Result<()> {
        self.validate().map_err(Error::from)?;
        if self.new_password == self.current_password {
            return Err(Error::Validation {
                field: "new_password".to_string(),
                message: "must differ from the current password".to_string(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PasswordChange").finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::missing_panics_doc)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_default_settings_are_valid() {
        assert!(AccountSettings::default().check().is_ok());
    }

    #[test]
    fn test_builder_sets_named_fields() {
        let settings = AccountSettings::builder()
            .set(Toggle::PushNotifications, true)
            .set(Toggle::EmailNotifications, false)
            .theme(Theme::Dark)
            .language("pt-BR")
            .timezone("America/Sao_Paulo")
            .build()
            .unwrap();

        assert!(settings.push_notifications);
        assert!(!settings.email_notifications);
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.language, "pt-BR");
    }

    #[rstest]
    #[case("")]
    #[case("x")]
    #[case("english")]
    fn test_builder_rejects_bad_language(#[case] language: &str) {
        let err = AccountSettings::builder().language(language).build().unwrap_err();
        match err {
            Error::Validation { field, .. } => assert_eq!(field, "language"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_builder_rejects_empty_timezone() {
        assert!(AccountSettings::builder().timezone("").build().is_err());
    }

    #[test]
    fn test_toggle_flips_only_one_option() {
        let mut settings = AccountSettings::default();
        let before = settings.clone();

        assert!(!settings.toggle(Toggle::ProfileVisible));
        assert!(!settings.profile_visible);
        assert_eq!(settings.email_notifications, before.email_notifications);
        assert_eq!(settings.show_email, before.show_email);

        assert!(settings.toggle(Toggle::ProfileVisible));
        assert_eq!(settings, before);
    }

    #[test]
    fn test_settings_wire_shape() {
        let value = serde_json::to_value(AccountSettings::default()).unwrap();
        assert_eq!(value["emailNotifications"], true);
        assert_eq!(value["theme"], "system");
    }

    #[test]
    fn test_password_change_accepts_valid_request() {
        let change = PasswordChange::new("old-password", "n3w-password", "n3w-password");
        assert!(change.check().is_ok());
    }

    #[rstest]
    #[case("", "n3w-password", "n3w-password", "current_password")]
    #[case("old-password", "short", "short", "new_password")]
    #[case("old-password", "n3w-password", "other-password", "confirm_password")]
    #[case("same-password", "same-password", "same-password", "new_password")]
    fn test_password_change_rejections(
        #[case] current: &str,
        #[case] new: &str,
        #[case] confirm: &str,
        #[case] field: &str,
    ) {
        let err = PasswordChange::new(current, new, confirm).check().unwrap_err();
        match err {
            Error::Validation { field: got, .. } => assert_eq!(got, field),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_password_change_debug_hides_secrets() {
        let change = PasswordChange::new("old-password", "n3w-password", "n3w-password");
        let debug = format!("{change:?}");
        assert!(!debug.contains("password-"));
        assert!(!debug.contains("n3w"));
    }
}
