//! Static registry of mail templates

use std::collections::HashMap;

use lazy_static::lazy_static;

/// Reserved subject variable resolved from the tenant context rather than
/// from the template data.
pub const TEMPLATE_TITLE_VAR: &str = "template_title";

/// Translation key for the subject of a mail, with the names of the
/// variables interpolated into it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubjectSpec {
    /// The i18n key of the subject message
    pub key: &'static str,

    /// Ordered variable names; each is either [`TEMPLATE_TITLE_VAR`] or a
    /// key looked up in the template data
    pub variables: &'static [&'static str],
}

impl SubjectSpec {
    /// Creates a subject spec with no interpolated variables
    pub const fn plain(key: &'static str) -> Self {
        Self { key, variables: &[] }
    }

    /// Creates a subject spec with the given variable names
    pub const fn with_variables(key: &'static str, variables: &'static [&'static str]) -> Self {
        Self { key, variables }
    }
}

/// Frozen mapping from template name to [`SubjectSpec`].
///
/// Built once before any render call and read-only afterwards, so it can be
/// shared across concurrent renders without locking.
#[derive(Clone, Debug, Default)]
pub struct MailTemplates {
    entries: HashMap<&'static str, SubjectSpec>,
}

impl MailTemplates {
    /// Creates a registry from the given entries
    pub fn new(entries: impl IntoIterator<Item = (&'static str, SubjectSpec)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    /// Creates the registry of all built-in mail templates
    pub fn builtin() -> Self {
        Self::new([
            ("passphrase_hint", SubjectSpec::plain("Mail Hint Subject")),
            (
                "passphrase_reset",
                SubjectSpec::plain("Mail Reset Passphrase Subject"),
            ),
            ("archiver", SubjectSpec::plain("Mail Archive Subject")),
            (
                "import_success",
                SubjectSpec::plain("Mail Import Success Subject"),
            ),
            (
                "import_error",
                SubjectSpec::plain("Mail Import Error Subject"),
            ),
            (
                "export_error",
                SubjectSpec::plain("Mail Export Error Subject"),
            ),
            (
                "move_confirm",
                SubjectSpec::plain("Mail Move Confirm Subject"),
            ),
            (
                "move_success",
                SubjectSpec::plain("Mail Move Success Subject"),
            ),
            ("move_error", SubjectSpec::plain("Mail Move Error Subject")),
            ("magic_link", SubjectSpec::plain("Mail Magic Link Subject")),
            ("two_factor", SubjectSpec::plain("Mail Two Factor Subject")),
            (
                "two_factor_mail_confirmation",
                SubjectSpec::with_variables(
                    "Mail Two Factor Mail Confirmation Subject",
                    &[TEMPLATE_TITLE_VAR],
                ),
            ),
            (
                "new_connection",
                SubjectSpec::with_variables("Mail New Connection Subject", &[TEMPLATE_TITLE_VAR]),
            ),
            (
                "new_registration",
                SubjectSpec::with_variables("Mail New Registration Subject", &[TEMPLATE_TITLE_VAR]),
            ),
            (
                "confirm_flagship",
                SubjectSpec::plain("Mail Confirm Flagship Subject"),
            ),
            (
                "alert_account",
                SubjectSpec::plain("Mail Alert Account Subject"),
            ),
            (
                "support_request",
                SubjectSpec::plain("Mail Support Confirmation Subject"),
            ),
            (
                "sharing_request",
                SubjectSpec::with_variables(
                    "Mail Sharing Request Subject",
                    &["SharerPublicName", "TitleType"],
                ),
            ),
            (
                "sharing_to_confirm",
                SubjectSpec::plain("Mail Sharing Member To Confirm Subject"),
            ),
            (
                "notifications_sharing",
                SubjectSpec::with_variables(
                    "Notification Sharing Subject",
                    &["SharerPublicName", "TitleType"],
                ),
            ),
            (
                "notifications_diskquota",
                SubjectSpec::plain("Notifications Disk Quota Subject"),
            ),
            (
                "notifications_oauthclients",
                SubjectSpec::plain("Notifications OAuth Clients Subject"),
            ),
            (
                "update_email",
                SubjectSpec::plain("Mail Update Email Subject"),
            ),
        ])
    }

    /// Looks up the subject spec for a template name
    pub fn get(&self, name: &str) -> Option<&SubjectSpec> {
        self.entries.get(name)
    }

    /// Iterates over the registered template names
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.keys().copied()
    }
}

lazy_static! {
    /// Process-wide registry, built on first use and read-only afterwards
    pub static ref MAIL_TEMPLATES: MailTemplates = MailTemplates::builtin();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_of_registered_name() {
        let entry = MAIL_TEMPLATES.get("magic_link").expect("registered");

        assert_eq!(entry.key, "Mail Magic Link Subject");
        assert!(entry.variables.is_empty());
    }

    #[test]
    fn test_lookup_of_unknown_name_is_none() {
        // An empty variable list must stay distinguishable from "absent".
        assert!(MAIL_TEMPLATES.get("magic_link").is_some());
        assert!(MAIL_TEMPLATES.get("does_not_exist").is_none());
    }

    #[test]
    fn test_reserved_title_variable_is_registered() {
        let entry = MAIL_TEMPLATES.get("new_connection").expect("registered");

        assert_eq!(entry.variables, [TEMPLATE_TITLE_VAR]);
    }

    #[test]
    fn test_custom_registry() {
        let registry = MailTemplates::new([("welcome", SubjectSpec::plain("Welcome Subject"))]);

        assert!(registry.get("welcome").is_some());
        assert!(registry.get("magic_link").is_none());
    }
}
