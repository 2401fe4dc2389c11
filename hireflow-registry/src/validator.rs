//! Manifest validation
//!
//! Converts an untrusted [`RawManifest`] into an [`AgentManifest`], checking
//! rules in a fixed order so the first violated rule is the one reported:
//! schema version, required fields, category, version, base path, then
//! uniqueness against the store.

use thiserror::Error;

use crate::manifest::{
    AgentManifest, ApiSection, Category, ExportSection, RawManifest, RouteTemplates,
    MANIFEST_SCHEMA_VERSION,
};
use crate::store::RegistryStore;

/// Why a manifest was refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Unsupported manifest schema version {found} (supported: {supported})")]
    UnsupportedSchemaVersion { found: u32, supported: u32 },

    /// Required field absent or blank
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Invalid category: {0:?} (expected job-seeker, recruiter or admin)")]
    InvalidCategory(String),

    #[error("Invalid semantic version: {0:?}")]
    InvalidVersion(String),

    #[error("Invalid API base path: {0:?} (must start with '/')")]
    InvalidBasePath(String),

    /// Identifier already registered; the first registration stays
    #[error("Duplicate agent identifier: {0}")]
    DuplicateId(String),

    #[error("API base path {base_path} already claimed by agent {owner}")]
    DuplicateBasePath { base_path: String, owner: String },
}

/// Validate a parsed manifest against the schema and the current store
pub fn validate(raw: RawManifest, store: &RegistryStore) -> Result<AgentManifest, ValidationError> {
    let schema_version = raw.schema_version.unwrap_or(MANIFEST_SCHEMA_VERSION);
    if schema_version > MANIFEST_SCHEMA_VERSION {
        return Err(ValidationError::UnsupportedSchemaVersion {
            found: schema_version,
            supported: MANIFEST_SCHEMA_VERSION,
        });
    }

    let id = required(raw.id, "id")?;
    let name = required(raw.name, "name")?;
    let version = required(raw.version, "version")?;
    let category = required(raw.category, "category")?;

    let api = raw.api.ok_or(ValidationError::MissingField("api"))?;
    let base_path = required(api.base_path, "api.basePath")?;

    let routes = raw.routes.ok_or(ValidationError::MissingField("routes"))?;
    let landing = required(routes.landing, "routes.landing")?;
    let workspace = required(routes.workspace, "routes.workspace")?;

    let exports = raw.exports.ok_or(ValidationError::MissingField("exports"))?;
    let api_handler = required(exports.api_handler, "exports.apiHandler")?;
    let landing_page = required(exports.landing_page, "exports.landingPage")?;
    let workspace_page = required(exports.workspace_page, "exports.workspacePage")?;

    let category = category
        .parse::<Category>()
        .map_err(|e| ValidationError::InvalidCategory(e.0))?;

    if !is_semver(&version) {
        return Err(ValidationError::InvalidVersion(version));
    }

    if !base_path.starts_with('/') {
        return Err(ValidationError::InvalidBasePath(base_path));
    }

    if store.contains_id(&id) {
        return Err(ValidationError::DuplicateId(id));
    }

    if let Some(owner) = store.base_path_owner(&base_path) {
        return Err(ValidationError::DuplicateBasePath {
            base_path,
            owner: owner.to_string(),
        });
    }

    Ok(AgentManifest {
        id,
        name,
        version,
        category,
        description: raw.description.unwrap_or_default(),
        author: raw.author.unwrap_or_default(),
        tags: raw.tags,
        api: ApiSection {
            base_path,
            endpoints: api.endpoints,
        },
        routes: RouteTemplates { landing, workspace },
        database: raw.database,
        dependencies: raw.dependencies,
        permissions: raw.permissions,
        ui: raw.ui,
        exports: ExportSection {
            component: exports.component.filter(|c| !c.trim().is_empty()),
            api_handler,
            landing_page,
            workspace_page,
        },
    })
}

fn required(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ValidationError::MissingField(field)),
    }
}

/// `MAJOR.MINOR.PATCH` with an optional `-prerelease` and `+build` suffix
fn is_semver(version: &str) -> bool {
    let (rest, build) = match version.split_once('+') {
        Some((rest, build)) => (rest, Some(build)),
        None => (version, None),
    };
    let (core, pre) = match rest.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (rest, None),
    };

    if pre.is_some_and(str::is_empty) || build.is_some_and(str::is_empty) {
        return false;
    }

    let parts: Vec<&str> = core.split('.').collect();
    parts.len() == 3
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}
