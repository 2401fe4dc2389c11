//! Agent manifest types
//!
//! A manifest goes through two shapes. [`RawManifest`] is what the loader
//! parses: every field optional, nothing checked. [`AgentManifest`] is what the
//! validator hands out: required fields present and the category resolved.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Manifest schema version understood by this crate
pub const MANIFEST_SCHEMA_VERSION: u32 = 1;

/// Fixed partition every agent belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    JobSeeker,
    Recruiter,
    Admin,
}

impl Category {
    /// All categories, in navigation order
    pub const ALL: [Category; 3] = [Category::JobSeeker, Category::Recruiter, Category::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::JobSeeker => "job-seeker",
            Category::Recruiter => "recruiter",
            Category::Admin => "admin",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category string outside the fixed set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category {0:?} (expected job-seeker, recruiter or admin)")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// Validated agent manifest
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentManifest {
    pub id: String,
    pub name: String,
    pub version: String,
    pub category: Category,
    pub description: String,
    pub author: String,
    pub tags: Vec<String>,
    pub api: ApiSection,
    pub routes: RouteTemplates,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<DatabaseSection>,
    pub dependencies: DependencySection,
    pub permissions: Vec<String>,
    pub ui: UiSection,
    pub exports: ExportSection,
}

impl AgentManifest {
    /// Position within the category menu; undeclared order sorts last
    pub fn navigation_order(&self) -> u32 {
        self.ui.navigation.order.unwrap_or(u32::MAX)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiSection {
    pub base_path: String,
    pub endpoints: Vec<Endpoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub method: String,
    pub path: String,
    #[serde(default)]
    pub description: String,
}

/// Page route templates
///
/// `{category}`, `{id}` and `{slug}` are substituted when the agent is indexed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteTemplates {
    pub landing: String,
    pub workspace: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatabaseSection {
    #[serde(default)]
    pub tables: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DependencySection {
    #[serde(default)]
    pub required: Vec<String>,
    #[serde(default)]
    pub optional: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UiSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default)]
    pub navigation: NavigationPlacement,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationPlacement {
    /// Menu group label shown by the navigation UI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<u32>,
}

/// Logical role to concrete resource location
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component: Option<String>,
    pub api_handler: String,
    pub landing_page: String,
    pub workspace_page: String,
}

/// Manifest exactly as parsed, before validation
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawManifest {
    pub schema_version: Option<u32>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub version: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub api: Option<RawApiSection>,
    pub routes: Option<RawRouteTemplates>,
    pub database: Option<DatabaseSection>,
    #[serde(default)]
    pub dependencies: DependencySection,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub ui: UiSection,
    pub exports: Option<RawExportSection>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawApiSection {
    pub base_path: Option<String>,
    #[serde(default)]
    pub endpoints: Vec<Endpoint>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRouteTemplates {
    pub landing: Option<String>,
    pub workspace: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawExportSection {
    pub component: Option<String>,
    pub api_handler: Option<String>,
    pub landing_page: Option<String>,
    pub workspace_page: Option<String>,
}
