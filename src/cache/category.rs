//! Category Policy Module
//!
//! Maps logical cache categories to their storage key and time-to-live.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

// == Cache Category ==
/// The categories cached by the reporting portal out of the box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CacheCategory {
    Profiles,
    Reports,
    Users,
    News,
    AuditLogs,
}

impl CacheCategory {
    /// Every default category, in table order.
    pub const ALL: [CacheCategory; 5] = [
        CacheCategory::Profiles,
        CacheCategory::Reports,
        CacheCategory::Users,
        CacheCategory::News,
        CacheCategory::AuditLogs,
    ];

    /// Category name used for lookups.
    pub fn name(self) -> &'static str {
        match self {
            CacheCategory::Profiles => "PROFILES",
            CacheCategory::Reports => "REPORTS",
            CacheCategory::Users => "USERS",
            CacheCategory::News => "NEWS",
            CacheCategory::AuditLogs => "AUDIT_LOGS",
        }
    }

    /// Key the envelope is persisted under.
    pub fn storage_key(self) -> &'static str {
        match self {
            CacheCategory::Profiles => "cache_profiles",
            CacheCategory::Reports => "cache_reports",
            CacheCategory::Users => "cache_users",
            CacheCategory::News => "cache_news",
            CacheCategory::AuditLogs => "cache_audit",
        }
    }

    /// Default time-to-live.
    pub fn ttl(self) -> Duration {
        let minutes = match self {
            CacheCategory::Profiles => 60,
            CacheCategory::Reports | CacheCategory::Users => 30,
            CacheCategory::News => 10,
            CacheCategory::AuditLogs => 5,
        };
        Duration::from_secs(minutes * 60)
    }
}

impl fmt::Display for CacheCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CacheCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CacheCategory::ALL
            .into_iter()
            .find(|category| category.name() == s)
            .ok_or_else(|| format!("unknown cache category: {s}"))
    }
}

// == Category Policy ==
/// Where a category is stored and how long its entries stay fresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPolicy {
    pub storage_key: String,
    pub ttl: Duration,
}

// == Category Table ==
/// Ordered name to policy table, fixed once the cache is constructed.
#[derive(Debug, Clone, Default)]
pub struct CategoryTable {
    entries: Vec<(String, CategoryPolicy)>,
}

impl CategoryTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The portal's default table (profiles, reports, users, news, audit logs).
    pub fn defaults() -> Self {
        CacheCategory::ALL
            .into_iter()
            .fold(Self::new(), |table, category| {
                table.with_category(category.name(), category.storage_key(), category.ttl())
            })
    }

    /// Adds a category. Redefining a name replaces the earlier policy in place.
    #[must_use]
    pub fn with_category(
        mut self,
        name: impl Into<String>,
        storage_key: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        let name = name.into();
        let policy = CategoryPolicy {
            storage_key: storage_key.into(),
            ttl,
        };

        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = policy,
            None => self.entries.push((name, policy)),
        }
        self
    }

    /// Looks up a category by name.
    pub fn lookup(&self, name: &str) -> Option<&CategoryPolicy> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, policy)| policy)
    }

    /// Returns true if `name` is configured.
    pub fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Iterates `(name, policy)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CategoryPolicy)> {
        self.entries
            .iter()
            .map(|(name, policy)| (name.as_str(), policy))
    }

    /// Category names in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
