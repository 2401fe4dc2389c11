//! Read-only query API over a settled registry
//!
//! An [`AgentRegistry`] is only ever produced by discovery once the scan has
//! finished, so every query observes the final state. It has no mutators and
//! is safe to share behind an `Arc` across tasks.

use serde::Serialize;

use crate::manifest::{AgentManifest, Category};
use crate::store::{RegistryStore, RouteEntry, RouteKind};

#[derive(Debug, Default)]
pub struct AgentRegistry {
    store: RegistryStore,
}

/// One pre-rendering parameter pair per agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StaticParam {
    pub category: Category,
    pub slug: String,
}

/// Result of resolving a full request path to an agent's API handler
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMatch<'a> {
    pub base_path: &'a str,
    pub handler: &'a str,
    pub agent_id: &'a str,
}

/// Category-grouped menu, every category always present
#[derive(Debug, Clone, Serialize)]
pub struct Navigation<'a> {
    #[serde(rename = "job-seeker")]
    pub job_seeker: Vec<&'a AgentManifest>,
    pub recruiter: Vec<&'a AgentManifest>,
    pub admin: Vec<&'a AgentManifest>,
}

impl<'a> Navigation<'a> {
    pub fn get(&self, category: Category) -> &[&'a AgentManifest] {
        match category {
            Category::JobSeeker => &self.job_seeker,
            Category::Recruiter => &self.recruiter,
            Category::Admin => &self.admin,
        }
    }
}

impl From<RegistryStore> for AgentRegistry {
    fn from(store: RegistryStore) -> Self {
        Self { store }
    }
}

impl AgentRegistry {
    /// All registered agents (insertion order, not guaranteed to callers)
    pub fn all_agents(&self) -> Vec<&AgentManifest> {
        self.store.iter().collect()
    }

    /// Agents of one category, ascending by navigation order
    ///
    /// Equal orders keep insertion order.
    pub fn agents_by_category(&self, category: Category) -> Vec<&AgentManifest> {
        let mut agents: Vec<&AgentManifest> = self.store.in_category(category).collect();
        agents.sort_by_key(|agent| agent.navigation_order());
        agents
    }

    pub fn agent(&self, id: &str) -> Option<&AgentManifest> {
        self.store.get(id)
    }

    /// Page routes, two per agent (landing, workspace)
    pub fn routes(&self) -> &[RouteEntry] {
        self.store.routes()
    }

    /// API mapping as route entries of kind `api`, sorted by base path
    pub fn api_routes(&self) -> Vec<RouteEntry> {
        let mut routes: Vec<RouteEntry> = self
            .store
            .api_handlers()
            .iter()
            .map(|(base_path, mapping)| RouteEntry {
                path: base_path.clone(),
                component: mapping.handler.clone(),
                kind: RouteKind::Api,
                agent_id: mapping.agent_id.clone(),
            })
            .collect();
        routes.sort_by(|a, b| a.path.cmp(&b.path));
        routes
    }

    /// Handler location for an exact base path
    pub fn api_handler(&self, base_path: &str) -> Option<&str> {
        self.store
            .api_handlers()
            .get(base_path)
            .map(|mapping| mapping.handler.as_str())
    }

    /// Longest registered base path that prefixes `request_path` on a segment boundary
    pub fn resolve_api_handler(&self, request_path: &str) -> Option<ApiMatch<'_>> {
        self.store
            .api_handlers()
            .iter()
            .filter(|(base_path, _)| is_path_prefix(base_path, request_path))
            .max_by_key(|(base_path, _)| base_path.trim_end_matches('/').len())
            .map(|(base_path, mapping)| ApiMatch {
                base_path: base_path.as_str(),
                handler: mapping.handler.as_str(),
                agent_id: mapping.agent_id.as_str(),
            })
    }

    pub fn static_params(&self) -> Vec<StaticParam> {
        self.store
            .iter()
            .map(|agent| StaticParam {
                category: agent.category,
                slug: agent.id.clone(),
            })
            .collect()
    }

    pub fn navigation(&self) -> Navigation<'_> {
        Navigation {
            job_seeker: self.agents_by_category(Category::JobSeeker),
            recruiter: self.agents_by_category(Category::Recruiter),
            admin: self.agents_by_category(Category::Admin),
        }
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

fn is_path_prefix(base_path: &str, request_path: &str) -> bool {
    let base = base_path.trim_end_matches('/');
    if base.is_empty() {
        return request_path.starts_with('/');
    }
    match request_path.strip_prefix(base) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::manifest;

    fn registry(agents: Vec<AgentManifest>) -> AgentRegistry {
        let mut store = RegistryStore::new();
        for agent in agents {
            store.insert(agent).unwrap();
        }
        AgentRegistry::from(store)
    }

    #[test]
    fn test_agents_by_category_sorted_by_order() {
        let registry = registry(vec![
            manifest("interview-prep", Category::JobSeeker, Some(3)),
            manifest("candidate-search", Category::Recruiter, Some(1)),
            manifest("resume-builder", Category::JobSeeker, Some(1)),
            manifest("job-matcher", Category::JobSeeker, Some(2)),
        ]);

        let ids: Vec<&str> = registry
            .agents_by_category(Category::JobSeeker)
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, vec!["resume-builder", "job-matcher", "interview-prep"]);
    }

    #[test]
    fn test_equal_order_keeps_insertion_order_and_unordered_last() {
        let registry = registry(vec![
            manifest("analytics", Category::Admin, None),
            manifest("billing-manager", Category::Admin, Some(5)),
            manifest("audit-log", Category::Admin, Some(5)),
        ]);

        let ids: Vec<&str> = registry
            .agents_by_category(Category::Admin)
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, vec!["billing-manager", "audit-log", "analytics"]);
    }

    #[test]
    fn test_navigation_has_every_category() {
        let registry = registry(vec![
            manifest("resume-builder", Category::JobSeeker, Some(1)),
            manifest("billing-manager", Category::Admin, Some(1)),
        ]);

        let nav = registry.navigation();
        assert_eq!(nav.get(Category::JobSeeker).len(), 1);
        assert!(nav.get(Category::Recruiter).is_empty());
        assert_eq!(nav.get(Category::Admin)[0].id, "billing-manager");

        let json = serde_json::to_value(&nav).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 3);
        assert_eq!(json["recruiter"], serde_json::json!([]));
        assert_eq!(json["job-seeker"][0]["id"], "resume-builder");
    }

    #[test]
    fn test_api_handler_exact_lookup() {
        let registry = registry(vec![manifest("resume-builder", Category::JobSeeker, None)]);

        assert_eq!(
            registry.api_handler("/api/agents/resume-builder"),
            Some("./resume-builder/api/handler")
        );
        assert_eq!(registry.api_handler("/api/agents/resume"), None);
        assert_eq!(registry.api_handler("/api/agents/resume-builder/items"), None);
    }

    #[test]
    fn test_resolve_api_handler_longest_segment_prefix() {
        let mut nested = manifest("resume-export", Category::JobSeeker, None);
        nested.api.base_path = "/api/agents/resume-builder/export".to_string();
        let registry = registry(vec![
            manifest("resume-builder", Category::JobSeeker, None),
            nested,
        ]);

        let hit = registry
            .resolve_api_handler("/api/agents/resume-builder/items/42")
            .unwrap();
        assert_eq!(hit.agent_id, "resume-builder");

        let hit = registry
            .resolve_api_handler("/api/agents/resume-builder/export/pdf")
            .unwrap();
        assert_eq!(hit.agent_id, "resume-export");
        assert_eq!(hit.base_path, "/api/agents/resume-builder/export");

        assert!(registry
            .resolve_api_handler("/api/agents/resume-builder-pro")
            .is_none());
    }

    #[test]
    fn test_static_params_and_api_routes() {
        let registry = registry(vec![
            manifest("resume-builder", Category::JobSeeker, None),
            manifest("billing-manager", Category::Admin, None),
        ]);

        let params = registry.static_params();
        assert_eq!(params.len(), 2);
        assert!(params.contains(&StaticParam {
            category: Category::Admin,
            slug: "billing-manager".to_string(),
        }));

        let api_routes = registry.api_routes();
        assert_eq!(api_routes.len(), 2);
        assert!(api_routes.iter().all(|r| r.kind == RouteKind::Api));
        assert_eq!(api_routes[0].path, "/api/agents/billing-manager");
        assert_eq!(registry.routes().len(), 2 * registry.len());
    }

    #[test]
    fn test_empty_registry() {
        let registry = AgentRegistry::default();
        assert!(registry.is_empty());
        assert!(registry.agent("resume-builder").is_none());
        assert!(registry.routes().is_empty());
        assert!(registry.navigation().admin.is_empty());
    }
}
