//! Registry store
//!
//! In-memory index of accepted agents. `insert` is the only mutator and it is
//! write-once per identifier: nothing is ever replaced or removed.
//!
//! After every successful insert:
//! - `api_handlers.len() == agents.len()`
//! - `routes.len() == 2 * agents.len()`

use serde::Serialize;
use std::collections::HashMap;

use crate::manifest::{AgentManifest, Category};
use crate::validator::ValidationError;

/// Route entry kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    Page,
    Api,
}

/// Path plus the resource it resolves to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteEntry {
    pub path: String,
    pub component: String,
    pub kind: RouteKind,
    pub agent_id: String,
}

#[derive(Debug, Clone)]
pub(crate) struct ApiMapping {
    pub(crate) agent_id: String,
    pub(crate) handler: String,
}

#[derive(Debug, Default)]
pub struct RegistryStore {
    agents: HashMap<String, AgentManifest>,
    insertion_order: Vec<String>,
    by_category: HashMap<Category, Vec<String>>,
    routes: Vec<RouteEntry>,
    api_handlers: HashMap<String, ApiMapping>,
}

impl RegistryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index a validated manifest
    ///
    /// Rejects a second claim on an identifier or base path; the existing
    /// registration is left untouched.
    pub fn insert(&mut self, manifest: AgentManifest) -> Result<(), ValidationError> {
        if self.agents.contains_key(&manifest.id) {
            return Err(ValidationError::DuplicateId(manifest.id));
        }
        if let Some(owner) = self.base_path_owner(&manifest.api.base_path) {
            return Err(ValidationError::DuplicateBasePath {
                base_path: manifest.api.base_path.clone(),
                owner: owner.to_string(),
            });
        }

        let id = manifest.id.clone();
        let category = manifest.category;

        self.routes.push(RouteEntry {
            path: expand_template(&manifest.routes.landing, category, &id),
            component: manifest.exports.landing_page.clone(),
            kind: RouteKind::Page,
            agent_id: id.clone(),
        });
        self.routes.push(RouteEntry {
            path: expand_template(&manifest.routes.workspace, category, &id),
            component: manifest.exports.workspace_page.clone(),
            kind: RouteKind::Page,
            agent_id: id.clone(),
        });
        self.api_handlers.insert(
            manifest.api.base_path.clone(),
            ApiMapping {
                agent_id: id.clone(),
                handler: manifest.exports.api_handler.clone(),
            },
        );
        self.by_category.entry(category).or_default().push(id.clone());
        self.insertion_order.push(id.clone());
        self.agents.insert(id, manifest);

        debug_assert_eq!(self.api_handlers.len(), self.agents.len());
        debug_assert_eq!(self.routes.len(), 2 * self.agents.len());
        Ok(())
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.agents.contains_key(id)
    }

    /// Identifier of the agent already claiming `base_path`
    pub fn base_path_owner(&self, base_path: &str) -> Option<&str> {
        self.api_handlers
            .get(base_path)
            .map(|mapping| mapping.agent_id.as_str())
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub(crate) fn get(&self, id: &str) -> Option<&AgentManifest> {
        self.agents.get(id)
    }

    /// Agents in insertion order
    pub(crate) fn iter(&self) -> impl Iterator<Item = &AgentManifest> {
        self.insertion_order
            .iter()
            .filter_map(|id| self.agents.get(id))
    }

    /// Agents of one category in insertion order
    pub(crate) fn in_category(&self, category: Category) -> impl Iterator<Item = &AgentManifest> {
        self.by_category
            .get(&category)
            .into_iter()
            .flatten()
            .filter_map(|id| self.agents.get(id))
    }

    pub(crate) fn routes(&self) -> &[RouteEntry] {
        &self.routes
    }

    pub(crate) fn api_handlers(&self) -> &HashMap<String, ApiMapping> {
        &self.api_handlers
    }
}

/// Substitute `{category}`, `{id}` and `{slug}` in a route template
///
/// Single pass: substituted text is never rescanned. Unknown `{...}` groups
/// are copied as-is.
pub fn expand_template(template: &str, category: Category, id: &str) -> String {
    let mut out = String::with_capacity(template.len() + id.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let Some(end) = tail.find('}') else {
            out.push_str(tail);
            return out;
        };
        match &tail[1..end] {
            "category" => out.push_str(category.as_str()),
            "id" | "slug" => out.push_str(id),
            _ => out.push_str(&tail[..=end]),
        }
        rest = &tail[end + 1..];
    }

    out.push_str(rest);
    out
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::manifest::{
        ApiSection, DependencySection, ExportSection, NavigationPlacement, RouteTemplates,
        UiSection,
    };

    pub(crate) fn manifest(id: &str, category: Category, order: Option<u32>) -> AgentManifest {
        AgentManifest {
            id: id.to_string(),
            name: id.to_string(),
            version: "1.0.0".to_string(),
            category,
            description: String::new(),
            author: "hireflow".to_string(),
            tags: Vec::new(),
            api: ApiSection {
                base_path: format!("/api/agents/{}", id),
                endpoints: Vec::new(),
            },
            routes: RouteTemplates {
                landing: "/agents/{category}/{id}".to_string(),
                workspace: "/agents/{category}/{slug}/workspace".to_string(),
            },
            database: None,
            dependencies: DependencySection::default(),
            permissions: Vec::new(),
            ui: UiSection {
                icon: None,
                color: None,
                navigation: NavigationPlacement {
                    category: None,
                    order,
                },
            },
            exports: ExportSection {
                component: None,
                api_handler: format!("./{}/api/handler", id),
                landing_page: format!("./{}/pages/landing", id),
                workspace_page: format!("./{}/pages/workspace", id),
            },
        }
    }

    #[test]
    fn test_insert_builds_routes_and_api_mapping() {
        let mut store = RegistryStore::new();
        store
            .insert(manifest("resume-builder", Category::JobSeeker, Some(1)))
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.routes().len(), 2);
        assert_eq!(store.routes()[0].path, "/agents/job-seeker/resume-builder");
        assert_eq!(store.routes()[0].component, "./resume-builder/pages/landing");
        assert_eq!(
            store.routes()[1].path,
            "/agents/job-seeker/resume-builder/workspace"
        );
        assert!(store.routes().iter().all(|r| r.kind == RouteKind::Page));
        assert_eq!(
            store.base_path_owner("/api/agents/resume-builder"),
            Some("resume-builder")
        );
    }

    #[test]
    fn test_duplicate_id_keeps_first_registration() {
        let mut store = RegistryStore::new();
        store
            .insert(manifest("job-matcher", Category::JobSeeker, Some(1)))
            .unwrap();

        let mut second = manifest("job-matcher", Category::Recruiter, Some(2));
        second.api.base_path = "/api/other".to_string();
        let err = store.insert(second).unwrap_err();

        assert_eq!(err, ValidationError::DuplicateId("job-matcher".to_string()));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("job-matcher").unwrap().category, Category::JobSeeker);
        assert_eq!(store.routes().len(), 2);
    }

    #[test]
    fn test_duplicate_base_path_rejected() {
        let mut store = RegistryStore::new();
        store
            .insert(manifest("billing-manager", Category::Admin, None))
            .unwrap();

        let mut clash = manifest("billing-audit", Category::Admin, None);
        clash.api.base_path = "/api/agents/billing-manager".to_string();
        let err = store.insert(clash).unwrap_err();

        assert_eq!(
            err,
            ValidationError::DuplicateBasePath {
                base_path: "/api/agents/billing-manager".to_string(),
                owner: "billing-manager".to_string(),
            }
        );
        assert_eq!(store.len(), 1);
        assert_eq!(store.api_handlers().len(), 1);
    }

    #[test]
    fn test_substituted_id_is_not_expanded_again() {
        assert_eq!(
            expand_template("/agents/{id}", Category::Admin, "x{slug}"),
            "/agents/x{slug}"
        );
        assert_eq!(
            expand_template("/{category}/{slug}/{unknown}/{", Category::Recruiter, "talent-pool"),
            "/recruiter/talent-pool/{unknown}/{"
        );
    }

    #[test]
    fn test_template_without_placeholders_is_verbatim() {
        assert_eq!(
            expand_template("/static/landing", Category::Admin, "x"),
            "/static/landing"
        );
    }
}
