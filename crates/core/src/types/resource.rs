//! Remote list resources.

use serde::{Deserialize, Serialize};

/// REST namespace shared by every list resource.
const API_NAMESPACE: [&str; 3] = ["wp-json", "dokan", "v1"];

/// A remote catalog collection that can be listed page by page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    #[default]
    Products,
    Orders,
    Reviews,
}

impl Resource {
    /// Path segments appended to the credential's base URL.
    #[must_use]
    pub fn path_segments(self) -> impl Iterator<Item = &'static str> {
        API_NAMESPACE.into_iter().chain(std::iter::once(self.as_str()))
    }

    /// Relative path of the collection, e.g. `wp-json/dokan/v1/products`.
    #[must_use]
    pub fn path(self) -> String {
        self.path_segments().collect::<Vec<_>>().join("/")
    }

    /// Lowercase collection name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Orders => "orders",
            Self::Reviews => "reviews",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Resource {
    type Err = super::ParseValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "products" => Ok(Self::Products),
            "orders" => Ok(Self::Orders),
            "reviews" => Ok(Self::Reviews),
            _ => Err(super::ParseValueError::new("resource", s)),
        }
    }
}
