//! Plugin introspection route

use std::sync::Arc;

use answer_core::PluginInfo;
use axum::{extract::State, response::Json};
use serde::Serialize;

use crate::AppState;

/// Registered plugins in dispatch order
#[derive(Debug, Serialize)]
pub struct PluginsResponse {
    pub count: usize,
    pub plugins: Vec<PluginInfo>,
}

/// List registered plugins
pub async fn list_plugins(State(state): State<Arc<AppState>>) -> Json<PluginsResponse> {
    let plugins = state.registry.list();
    Json(PluginsResponse {
        count: plugins.len(),
        plugins,
    })
}
