use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub name: String,
    pub version: String,
}

impl HealthResponse {
    pub fn healthy(name: String, version: String) -> Self {
        Self {
            status: "healthy",
            name,
            version,
        }
    }
}
