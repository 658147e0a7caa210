//! Capability sets derived at registration time.

use std::fmt;

/// One optional module capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Contributes HTTP endpoints.
    Endpoints,
    /// Registers backing services.
    Services,
    /// Registers dashboard widgets.
    Widgets,
    /// Answers free-text search queries.
    Search,
}

impl Capability {
    /// All capabilities in declaration order.
    pub const ALL: [Capability; 4] = [
        Capability::Endpoints,
        Capability::Services,
        Capability::Widgets,
        Capability::Search,
    ];

    /// Stable name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Endpoints => "endpoints",
            Self::Services => "services",
            Self::Widgets => "widgets",
            Self::Search => "search",
        }
    }

    fn bit(self) -> u8 {
        match self {
            Self::Endpoints => 1 << 0,
            Self::Services => 1 << 1,
            Self::Widgets => 1 << 2,
            Self::Search => 1 << 3,
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The subset of capabilities one module implements.
///
/// Derived structurally by probing the module instance at registration; plain
/// data afterwards, never recomputed or guessed from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    bits: u8,
}

impl CapabilitySet {
    /// The empty set.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Add a capability.
    pub fn insert(&mut self, capability: Capability) {
        self.bits |= capability.bit();
    }

    /// Whether the set contains a capability.
    pub fn contains(&self, capability: Capability) -> bool {
        self.bits & capability.bit() != 0
    }

    /// Whether no capability is present.
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Capabilities present, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL.into_iter().filter(|c| self.contains(*c))
    }

    /// Wire names of the capabilities present.
    pub fn names(&self) -> Vec<&'static str> {
        self.iter().map(|c| c.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_set() {
        let set = CapabilitySet::empty();
        assert!(set.is_empty());
        assert!(!set.contains(Capability::Search));
        assert!(set.names().is_empty());
    }

    #[test]
    fn test_insert_and_contains() {
        let mut set = CapabilitySet::empty();
        set.insert(Capability::Search);
        set.insert(Capability::Widgets);

        assert!(set.contains(Capability::Search));
        assert!(set.contains(Capability::Widgets));
        assert!(!set.contains(Capability::Endpoints));
        assert!(!set.is_empty());
    }

    #[test]
    fn test_names_in_declaration_order() {
        let mut set = CapabilitySet::empty();
        set.insert(Capability::Search);
        set.insert(Capability::Endpoints);

        assert_eq!(set.names(), vec!["endpoints", "search"]);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut set = CapabilitySet::empty();
        set.insert(Capability::Services);
        set.insert(Capability::Services);

        assert_eq!(set.names(), vec!["services"]);
    }
}
