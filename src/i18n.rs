//! Keyed message rendering for user-facing notices.
//!
//! The engine never hardcodes user-facing copy; it asks the [`Translator`]
//! for a message by key. Templates use `%{item_type}` and `%{org_name}`
//! placeholders, interpolated at render time.

use std::collections::HashMap;

/// Keys for the user-facing messages the authorization engine can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    ImpoundedByOrganization,
    Impounded,
    NotOwner,
    SignInRequired,
    NotClaimedYet,
}

impl MessageKey {
    /// Stable catalog key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ImpoundedByOrganization => "impounded_by_organization",
            Self::Impounded => "impounded",
            Self::NotOwner => "not_owner",
            Self::SignInRequired => "sign_in_required",
            Self::NotClaimedYet => "not_claimed_yet",
        }
    }
}

/// Interpolation context for message rendering.
#[derive(Debug, Default, Clone, Copy)]
pub struct MessageArgs<'a> {
    /// Display label of the item ("bike", "trailer", ...).
    pub item_type: &'a str,
    /// Organization name, for organization-scoped messages.
    pub org_name: Option<&'a str>,
}

/// Renders user-facing messages from a keyed template catalog.
pub struct Translator {
    catalog: HashMap<MessageKey, String>,
}

impl Translator {
    /// Translator with the built-in English catalog.
    pub fn new() -> Self {
        let mut catalog = HashMap::new();
        catalog.insert(
            MessageKey::ImpoundedByOrganization,
            "This %{item_type} was impounded by %{org_name}! Contact them to get it back.".to_string(),
        );
        catalog.insert(
            MessageKey::Impounded,
            "This %{item_type} was impounded! Contact the organization that impounded it to get it back.".to_string(),
        );
        catalog.insert(
            MessageKey::NotOwner,
            "Sorry, you don't own that %{item_type}!".to_string(),
        );
        catalog.insert(
            MessageKey::SignInRequired,
            "You have to sign in to edit that %{item_type}.".to_string(),
        );
        catalog.insert(
            MessageKey::NotClaimedYet,
            "That %{item_type} hasn't been claimed yet! You have to claim it before you can edit it.".to_string(),
        );
        Self { catalog }
    }

    /// Replace the template for a key (operator-customized copy).
    pub fn set_message(&mut self, key: MessageKey, template: impl Into<String>) {
        self.catalog.insert(key, template.into());
    }

    /// Render the message for `key`, interpolating `args`.
    ///
    /// A key missing from the catalog renders as the empty string; callers
    /// treat an empty message as "nothing to show".
    pub fn translate(&self, key: MessageKey, args: MessageArgs<'_>) -> String {
        let Some(template) = self.catalog.get(&key) else {
            return String::new();
        };
        let mut rendered = template.replace("%{item_type}", args.item_type);
        if let Some(org_name) = args.org_name {
            rendered = rendered.replace("%{org_name}", org_name);
        }
        rendered
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}
