//! Build stamp of the running binary, served at `/version`

use axum::{response::Json, routing::get, Router};
use serde::Serialize;

use crate::AppState;

/// Compile-time identification of this build
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuildInfo {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub build_timestamp: &'static str,
    pub build_profile: &'static str,
}

impl BuildInfo {
    /// Values stamped by `build.rs`
    pub const CURRENT: BuildInfo = BuildInfo {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: env!("GIT_HASH"),
        build_timestamp: env!("BUILD_TIMESTAMP"),
        build_profile: env!("BUILD_PROFILE"),
    };
}

pub async fn version() -> Json<BuildInfo> {
    Json(BuildInfo::CURRENT)
}

pub fn version_routes() -> Router<AppState> {
    Router::new().route("/version", get(version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_build_is_stamped() {
        let info = BuildInfo::CURRENT;
        assert_eq!(info.version, env!("CARGO_PKG_VERSION"));
        assert!(!info.git_hash.is_empty());
        assert!(!info.build_profile.is_empty());
    }
}
