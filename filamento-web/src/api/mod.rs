//! JSON endpoints for filamento-web
//!
//! Health and build info (`/health`, `/version`) and the filament-type lookup used by the
//! maintenance forms.

pub mod filament_types;
pub mod health;
pub mod version;

pub use filament_types::filament_type_routes;
pub use health::health_routes;
pub use version::version_routes;
