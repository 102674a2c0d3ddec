//! Channel registry: the community channels the bot knows by name.
//!
//! Entries come from config; their platform IDs are filled in exactly once,
//! when the registry is built from the platform's channel listing. After
//! construction the registry is read-only.

use crate::config::schema::ChannelConfig;
use crate::types::{ChannelKind, PlatformChannel};

/// One named channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelEntry {
    /// Lowercased channel name (without `#`).
    pub name: String,
    /// Platform ID, if the channel was found in the listing.
    pub id: Option<String>,
    pub description: String,
    /// Listed in the welcome message sent to new members.
    pub welcome: bool,
    /// Excluded from the "recommended channels" list.
    pub restricted: bool,
}

impl ChannelEntry {
    fn from_config(cfg: &ChannelConfig) -> Self {
        ChannelEntry {
            name: cfg.name.trim_start_matches('#').to_lowercase(),
            id: None,
            description: cfg.description.clone(),
            welcome: cfg.welcome,
            restricted: cfg.restricted,
        }
    }

    /// Slack channel link (`<#C123|name>`), or plain `#name` when unresolved.
    pub fn link(&self) -> String {
        match &self.id {
            Some(id) => format!("<#{}|{}>", id, self.name),
            None => format!("#{}", self.name),
        }
    }
}

/// Ordered set of channel entries, keyed by lowercased name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChannelRegistry {
    entries: Vec<ChannelEntry>,
}

impl ChannelRegistry {
    /// Build a registry with no IDs resolved.
    pub fn unresolved(channels: &[ChannelConfig]) -> Self {
        ChannelRegistry {
            entries: channels.iter().map(ChannelEntry::from_config).collect(),
        }
    }

    /// Build a registry and resolve IDs against a platform channel listing.
    ///
    /// Names are compared case-insensitively. A public channel wins over a
    /// private one with the same name; listing entries with no matching
    /// config entry are ignored.
    pub fn resolve(channels: &[ChannelConfig], listing: &[PlatformChannel]) -> Self {
        let mut registry = Self::unresolved(channels);

        for kind in [ChannelKind::Public, ChannelKind::Private] {
            for listed in listing.iter().filter(|c| c.kind == kind) {
                let name = listed.name.to_lowercase();
                if let Some(entry) = registry
                    .entries
                    .iter_mut()
                    .find(|e| e.name == name && e.id.is_none())
                {
                    entry.id = Some(listed.id.clone());
                }
            }
        }

        registry
    }

    /// Look up an entry by name (case-insensitive, optional leading `#`).
    pub fn get(&self, name: &str) -> Option<&ChannelEntry> {
        let name = name.trim_start_matches('#').to_lowercase();
        self.entries.iter().find(|e| e.name == name)
    }

    /// All entries in config order.
    pub fn iter(&self) -> impl Iterator<Item = &ChannelEntry> {
        self.entries.iter()
    }

    /// Entries listed in the welcome message.
    pub fn welcome(&self) -> impl Iterator<Item = &ChannelEntry> {
        self.entries.iter().filter(|e| e.welcome)
    }

    /// Entries suitable for "recommended channels".
    pub fn recommended(&self) -> impl Iterator<Item = &ChannelEntry> {
        self.entries.iter().filter(|e| !e.restricted)
    }

    /// Number of entries whose ID was resolved.
    pub fn resolved_count(&self) -> usize {
        self.entries.iter().filter(|e| e.id.is_some()).count()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::default_channels;

    fn cfg(name: &str, welcome: bool, restricted: bool) -> ChannelConfig {
        ChannelConfig {
            name: name.into(),
            description: format!("about {name}"),
            welcome,
            restricted,
        }
    }

    #[test]
    fn test_unresolved_has_no_ids() {
        let registry = ChannelRegistry::unresolved(&default_channels());
        assert!(!registry.is_empty());
        assert_eq!(registry.resolved_count(), 0);
    }

    #[test]
    fn test_resolve_populates_only_matching_entry() {
        let channels = default_channels();
        let listing = vec![PlatformChannel::public("C0REVIEW", "reviews")];

        let registry = ChannelRegistry::resolve(&channels, &listing);

        assert_eq!(
            registry.get("reviews").unwrap().id.as_deref(),
            Some("C0REVIEW")
        );
        assert_eq!(registry.resolved_count(), 1);
        for entry in registry.iter().filter(|e| e.name != "reviews") {
            assert!(entry.id.is_none(), "{} should be unresolved", entry.name);
        }
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        let registry = ChannelRegistry::resolve(
            &[cfg("golang-newbies", true, false)],
            &[PlatformChannel::public("C1", "Golang-Newbies")],
        );
        assert_eq!(registry.get("golang-newbies").unwrap().id.as_deref(), Some("C1"));
    }

    #[test]
    fn test_public_wins_over_private() {
        let registry = ChannelRegistry::resolve(
            &[cfg("security", false, false)],
            &[
                PlatformChannel::private("G1", "security"),
                PlatformChannel::public("C1", "security"),
            ],
        );
        assert_eq!(registry.get("security").unwrap().id.as_deref(), Some("C1"));
    }

    #[test]
    fn test_private_fills_when_no_public() {
        let registry = ChannelRegistry::resolve(
            &[cfg("golang_cls", false, true)],
            &[PlatformChannel::private("G7", "golang_cls")],
        );
        assert_eq!(registry.get("golang_cls").unwrap().id.as_deref(), Some("G7"));
    }

    #[test]
    fn test_unknown_listing_entries_ignored() {
        let registry = ChannelRegistry::resolve(
            &[cfg("aws", false, false)],
            &[PlatformChannel::public("C9", "random")],
        );
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.resolved_count(), 0);
    }

    #[test]
    fn test_get_accepts_hash_prefix() {
        let registry = ChannelRegistry::unresolved(&[cfg("#DevOps", false, false)]);
        assert!(registry.get("#devops").is_some());
        assert!(registry.get("DEVOPS").is_some());
    }

    #[test]
    fn test_link_format() {
        let registry = ChannelRegistry::resolve(
            &[cfg("reviews", true, false), cfg("bbq", false, false)],
            &[PlatformChannel::public("C42", "reviews")],
        );
        assert_eq!(registry.get("reviews").unwrap().link(), "<#C42|reviews>");
        assert_eq!(registry.get("bbq").unwrap().link(), "#bbq");
    }

    #[test]
    fn test_welcome_and_recommended_filters() {
        let registry = ChannelRegistry::unresolved(&[
            cfg("reviews", true, false),
            cfg("aws", false, false),
            cfg("general", false, true),
        ]);

        let welcome: Vec<_> = registry.welcome().map(|e| e.name.as_str()).collect();
        assert_eq!(welcome, vec!["reviews"]);

        let recommended: Vec<_> = registry.recommended().map(|e| e.name.as_str()).collect();
        assert_eq!(recommended, vec!["reviews", "aws"]);
    }
}
