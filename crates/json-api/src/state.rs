//! State

use std::sync::Arc;

use snaxo_app::context::AppContext;

#[derive(Clone)]
pub(crate) struct State {
    pub(crate) app: AppContext,

    /// Bearer token expected on operator endpoints.
    pub(crate) operator_token: String,
}

impl State {
    #[must_use]
    pub(crate) fn new(app: AppContext, operator_token: String) -> Self {
        Self {
            app,
            operator_token,
        }
    }

    #[must_use]
    pub(crate) fn from_app_context(app: AppContext, operator_token: String) -> Arc<Self> {
        Arc::new(Self::new(app, operator_token))
    }
}
