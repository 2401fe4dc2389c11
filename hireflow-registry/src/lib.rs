//! # Hireflow Agent Registry
//!
//! Discovers self-describing agent modules under a module root and indexes
//! them for navigation, page routing and API dispatch.
//!
//! Each module lives in its own subdirectory and carries a `manifest.json`
//! descriptor. Discovery runs once:
//!
//! 1. [`loader`] reads and parses each descriptor into an untrusted [`RawManifest`]
//! 2. [`validator`] turns it into a trusted [`AgentManifest`] or a typed [`ValidationError`]
//! 3. [`store`] indexes the accepted manifests (write-once per identifier)
//! 4. [`discovery`] drives the scan; one broken module never stops the others
//! 5. [`registry`] answers read-only queries over the settled index
//!
//! ```no_run
//! # async fn run() {
//! use hireflow_registry::{discover_agents, Category};
//!
//! let report = discover_agents("./agents").await;
//! for agent in report.registry.agents_by_category(Category::JobSeeker) {
//!     println!("{} -> {}", agent.id, agent.api.base_path);
//! }
//! # }
//! ```

pub mod discovery;
pub mod loader;
pub mod manifest;
pub mod registry;
pub mod store;
pub mod validator;

pub use discovery::{discover_agents, AgentDiscovery, DiscoveryReport, SkipReason, SkippedModule};
pub use loader::{load_manifest, LoadError, MANIFEST_FILE_NAME};
pub use manifest::{AgentManifest, Category, ParseCategoryError, RawManifest, MANIFEST_SCHEMA_VERSION};
pub use registry::{AgentRegistry, ApiMatch, Navigation, StaticParam};
pub use store::{RegistryStore, RouteEntry, RouteKind};
pub use validator::{validate, ValidationError};
