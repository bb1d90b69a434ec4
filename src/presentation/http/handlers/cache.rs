//! Disk cache administration endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use crate::infrastructure::image::{CachedFileInfo, DiskCacheStats};
use crate::presentation::http::error::ServerError;
use crate::presentation::http::state::AppState;

/// Response for GET /cache/stats.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStatsResponse {
    /// Number of stored files.
    pub total_files: usize,
    /// Sum of file sizes in bytes.
    pub total_size: u64,
    /// Total size in megabytes, two decimals.
    #[serde(rename = "totalSizeMB")]
    pub total_size_mb: String,
    /// Per-file metadata.
    pub files: Vec<CachedFileResponse>,
}

/// One stored file.
#[derive(Debug, Serialize)]
pub struct CachedFileResponse {
    /// File name.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
    /// Creation time (RFC 3339).
    pub created: Option<String>,
}

impl From<CachedFileInfo> for CachedFileResponse {
    fn from(info: CachedFileInfo) -> Self {
        Self {
            name: info.name,
            size: info.size,
            created: info.created.map(|t| t.to_rfc3339()),
        }
    }
}

impl From<DiskCacheStats> for CacheStatsResponse {
    fn from(stats: DiskCacheStats) -> Self {
        Self {
            total_files: stats.total_files,
            total_size: stats.total_size,
            total_size_mb: format!("{:.2}", stats.total_size_mb()),
            files: stats.files.into_iter().map(CachedFileResponse::from).collect(),
        }
    }
}

/// Response for DELETE /cache/clear.
#[derive(Debug, Serialize)]
pub struct ClearResponse {
    /// Human-readable summary.
    pub message: String,
}

/// Handle GET /cache/stats.
pub async fn get_stats(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CacheStatsResponse>, ServerError> {
    let stats = state.proxy.stats().await?;
    Ok(Json(stats.into()))
}

/// Handle DELETE /cache/clear.
pub async fn clear_cache(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ClearResponse>, ServerError> {
    let removed = state.proxy.clear().await?;
    Ok(Json(ClearResponse {
        message: format!("Cleared {removed} cached images"),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_response_shape() {
        let stats = DiskCacheStats {
            total_files: 1,
            total_size: 1024 * 1024 * 3 / 2,
            files: vec![CachedFileInfo {
                name: "abc.webp".to_string(),
                size: 1024 * 1024 * 3 / 2,
                created: None,
            }],
        };

        let json = serde_json::to_value(CacheStatsResponse::from(stats)).unwrap();
        assert_eq!(json["totalFiles"], 1);
        assert_eq!(json["totalSizeMB"], "1.50");
        assert_eq!(json["files"][0]["name"], "abc.webp");
        assert!(json["files"][0]["created"].is_null());
    }
}
