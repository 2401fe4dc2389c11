//! HTTP API handlers for hireflow-hub

pub mod agents;
pub mod diagnostics;
pub mod health;
pub mod navigation;
pub mod routing;

pub use agents::agent_routes;
pub use diagnostics::diagnostics_routes;
pub use health::health_routes;
pub use navigation::navigation_routes;
pub use routing::routing_routes;
