use std::sync::Arc;

use kiit_finder_config::{ApiConfig, SessionConfig};
use kiit_finder_core::ClientError;

use crate::guard::RouteGuard;
use crate::http::{ApiClient, Navigator, Notifier};
use crate::services::AuthService;
use crate::session::{FileStorage, SessionStorage, SessionStore};

/// Everything a host needs to run the client, wired around one session.
#[derive(Clone, Debug)]
pub struct ClientContext {
    pub store: Arc<SessionStore>,
    pub api: Arc<ApiClient>,
    pub auth: Arc<AuthService>,
    pub guard: Arc<RouteGuard>,
    pub api_config: ApiConfig,
    pub session_config: SessionConfig,
}

impl ClientContext {
    pub fn new(
        api_config: ApiConfig,
        session_config: SessionConfig,
        storage: Arc<dyn SessionStorage>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<Self, ClientError> {
        let store = Arc::new(SessionStore::new(storage));
        let api = Arc::new(ApiClient::new(
            &api_config,
            session_config.login_path.clone(),
            store.clone(),
            notifier.clone(),
            navigator.clone(),
        )?);
        let auth = Arc::new(AuthService::new(api.clone(), store.clone(), notifier.clone()));
        let guard = Arc::new(RouteGuard::new(
            auth.clone(),
            navigator,
            notifier,
            &session_config,
        ));

        Ok(Self {
            store,
            api,
            auth,
            guard,
            api_config,
            session_config,
        })
    }
}

/// Context from the environment, persisting the session to the configured file.
pub fn init_client_context(
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
) -> Result<ClientContext, ClientError> {
    let api_config = ApiConfig::from_env();
    let session_config = SessionConfig::from_env();
    let storage = Arc::new(FileStorage::new(session_config.session_file.clone()));
    ClientContext::new(api_config, session_config, storage, notifier, navigator)
}
