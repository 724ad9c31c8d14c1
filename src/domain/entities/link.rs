//! Link entity representing an alias-to-URL mapping.

/// A stored short link.
///
/// `id` is assigned by storage on insert and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Link {
    pub id: i64,
    pub alias: String,
    pub url: String,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(id: i64, alias: String, url: String) -> Self {
        Self { id, alias, url }
    }
}

/// Input data for creating a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub alias: String,
    pub url: String,
}

impl NewLink {
    /// Attaches the storage-assigned id, producing the stored [`Link`].
    pub fn into_link(self, id: i64) -> Link {
        Link::new(id, self.alias, self.url)
    }
}
