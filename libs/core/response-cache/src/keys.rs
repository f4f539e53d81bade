use std::fmt::Display;

/// Key layout for one resource.
///
/// Items live at `"<resource>:<id>"` and every collection query under
/// `"<resource>:list:"`, so a single prefix removal drops all cached pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheKeys {
    resource: &'static str,
}

impl CacheKeys {
    pub const fn new(resource: &'static str) -> Self {
        Self { resource }
    }

    pub fn item(&self, id: impl Display) -> String {
        format!("{}:{}", self.resource, id)
    }

    /// Collection key for a query shape; values are percent-encoded so user
    /// supplied filters cannot collide with other shapes
    pub fn list<I, K, V>(&self, shape: I) -> String
    where
        I: IntoIterator<Item = (K, V)>,
        K: Display,
        V: Display,
    {
        let shape = shape
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(&v.to_string())))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}{}", self.list_prefix(), shape)
    }

    pub fn list_prefix(&self) -> String {
        format!("{}:list:", self.resource)
    }
}
