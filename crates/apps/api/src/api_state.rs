use app_state::AppSettings;
use axum::extract::FromRef;
use std::sync::Arc;
use street_imagery::StreetImageSelector;

#[derive(Clone)]
pub struct ApiContext {
    pub settings: AppSettings,
    pub selector: Arc<StreetImageSelector>,
}

impl FromRef<ApiContext> for AppSettings {
    fn from_ref(state: &ApiContext) -> Self {
        state.settings.clone()
    }
}

impl FromRef<ApiContext> for Arc<StreetImageSelector> {
    fn from_ref(state: &ApiContext) -> Self {
        state.selector.clone()
    }
}
