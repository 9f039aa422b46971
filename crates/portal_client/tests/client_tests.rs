//! Client and session tests against a live server

use tokio::net::TcpListener;

use domain_case::{CaseStatus, Role};
use interface_api::config::ApiConfig;
use interface_api::create_router;
use portal_client::{
    ClientError, FileTokenStore, MemoryTokenStore, PortalClient, Session, SessionManager,
    SessionState, StoredToken, TokenStore,
};
use test_utils::{ADMIN_EMAIL, ADMIN_PASSWORD, ApplicantFixtures, ServiceFixture};

async fn spawn_server() -> (PortalClient, ServiceFixture) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let fixture = ServiceFixture::new().await;
    let app = create_router(fixture.service.clone(), ApiConfig::default());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (PortalClient::new(format!("http://{addr}")), fixture)
}

fn temp_token_path() -> std::path::PathBuf {
    std::env::temp_dir().join(format!("portal-token-{}.json", uuid::Uuid::new_v4()))
}

mod api_tests {
    use super::*;

    #[tokio::test]
    async fn test_submit_then_login_as_client() {
        let (client, _fixture) = spawn_server().await;

        let receipt = client
            .submit_application(&ApplicantFixtures::submission("jane@example.com"))
            .await
            .unwrap();
        assert!(receipt.success);
        assert_eq!(receipt.email, "jane@example.com");

        let login = client.login("jane@example.com", &receipt.password).await.unwrap();
        assert_eq!(login.role, Role::Client);
        assert_eq!(login.token_type, "bearer");

        let session = Session::new(login.access_token, login.role);
        let dashboard = client.client_dashboard(&session).await.unwrap();
        assert_eq!(dashboard.case().id, receipt.client_id);
        assert_eq!(dashboard.case().status(), CaseStatus::Pending);
        assert_eq!(dashboard.response.documents_info.len(), 2);
    }

    #[tokio::test]
    async fn test_admin_updates_case() {
        let (client, _fixture) = spawn_server().await;
        let receipt = client
            .submit_application(&ApplicantFixtures::submission("jane@example.com"))
            .await
            .unwrap();

        let login = client.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
        let admin = Session::new(login.access_token, login.role);

        let updated = client
            .update_case_status(&admin, receipt.client_id, CaseStatus::DocumentsVerified, Some("ID ok"))
            .await
            .unwrap();
        assert!(updated.success);
        assert_eq!(updated.client.status(), CaseStatus::DocumentsVerified);

        let verified = client
            .list_cases(&admin, Some(CaseStatus::DocumentsVerified))
            .await
            .unwrap();
        assert_eq!(verified.len(), 1);
        assert!(client.list_cases(&admin, Some(CaseStatus::Pending)).await.unwrap().is_empty());

        let detail = client.fetch_case(&admin, receipt.client_id).await.unwrap();
        assert_eq!(detail.case().notes, "ID ok");

        let stats = client.stats(&admin).await.unwrap();
        assert_eq!(stats.total_count, 1);
        assert_eq!(stats.count(CaseStatus::DocumentsVerified), 1);
    }

    #[tokio::test]
    async fn test_error_statuses_map_to_variants() {
        let (client, _fixture) = spawn_server().await;

        let err = client.login(ADMIN_EMAIL, "wrong").await.unwrap_err();
        assert!(matches!(err, ClientError::Unauthorized(_)));

        let receipt = client
            .submit_application(&ApplicantFixtures::submission("jane@example.com"))
            .await
            .unwrap();
        let login = client.login("jane@example.com", &receipt.password).await.unwrap();
        let session = Session::new(login.access_token, login.role);

        let err = client.stats(&session).await.unwrap_err();
        assert!(matches!(err, ClientError::Forbidden(_)));

        let admin = client.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
        let admin = Session::new(admin.access_token, admin.role);
        let err = client
            .fetch_case(&admin, core_kernel::ClientId::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));

        let err = client
            .update_case_status(&admin, receipt.client_id, CaseStatus::Pending, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Api { status: 400, .. }));
    }
}

mod session_tests {
    use super::*;

    #[tokio::test]
    async fn test_login_persists_and_logout_clears() {
        let (client, _fixture) = spawn_server().await;
        let mut manager = SessionManager::new(client, MemoryTokenStore::new());
        assert_eq!(manager.state(), &SessionState::Loading);

        let role = manager.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
        assert_eq!(role, Role::Admin);

        let session = manager.current().unwrap();
        assert_eq!(session.user.as_ref().unwrap().email, ADMIN_EMAIL);
        assert_eq!(manager.store().load().unwrap().unwrap().token, session.token);

        manager.logout().unwrap();
        assert_eq!(manager.state(), &SessionState::Anonymous);
        assert!(manager.store().load().unwrap().is_none());
        assert!(matches!(manager.current(), Err(ClientError::NotLoggedIn)));
    }

    #[tokio::test]
    async fn test_hydrate_restores_stored_token() {
        let (client, _fixture) = spawn_server().await;
        let login = client.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();
        let store = MemoryTokenStore::with_token(StoredToken {
            token: login.access_token,
            role: login.role,
        });

        let mut manager = SessionManager::new(client, store);
        let state = manager.hydrate().await.unwrap();
        let session = state.session().unwrap();
        assert_eq!(session.role, Role::Admin);
        assert!(session.user.is_some());
    }

    #[tokio::test]
    async fn test_hydrate_without_token_is_anonymous() {
        let (client, _fixture) = spawn_server().await;
        let mut manager = SessionManager::new(client, MemoryTokenStore::new());
        assert_eq!(manager.hydrate().await.unwrap(), &SessionState::Anonymous);
    }

    #[tokio::test]
    async fn test_rejected_token_is_cleared() {
        let (client, _fixture) = spawn_server().await;
        let store = MemoryTokenStore::with_token(StoredToken {
            token: "not-a-jwt".to_string(),
            role: Role::Admin,
        });

        let mut manager = SessionManager::new(client, store);
        assert_eq!(manager.hydrate().await.unwrap(), &SessionState::Anonymous);
        assert!(manager.store().load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_track_clears_session_on_unauthorized() {
        let (client, _fixture) = spawn_server().await;
        let mut manager = SessionManager::new(client, MemoryTokenStore::new());
        manager.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();

        let stale = Session::new("expired-token", Role::Admin);
        let result = manager.api().stats(&stale).await;
        let err = manager.track(result).unwrap_err();

        assert!(err.is_unauthorized());
        assert_eq!(manager.state(), &SessionState::Anonymous);
        assert!(manager.store().load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_track_keeps_session_on_other_errors() {
        let (client, _fixture) = spawn_server().await;
        let mut manager = SessionManager::new(client, MemoryTokenStore::new());
        manager.login(ADMIN_EMAIL, ADMIN_PASSWORD).await.unwrap();

        let session = manager.current().unwrap();
        let result = manager.api().fetch_case(&session, core_kernel::ClientId::new()).await;
        assert!(matches!(manager.track(result), Err(ClientError::NotFound(_))));
        assert!(manager.current().is_ok());
    }
}

mod token_store_tests {
    use super::*;

    #[test]
    fn test_file_store_round_trip() {
        let store = FileTokenStore::new(temp_token_path());
        assert!(store.load().unwrap().is_none());

        let token = StoredToken {
            token: "abc".to_string(),
            role: Role::Client,
        };
        store.save(&token).unwrap();
        assert_eq!(store.load().unwrap(), Some(token));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
        // clearing twice is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_ignores_garbage() {
        let path = temp_token_path();
        std::fs::write(&path, b"{not json").unwrap();

        let store = FileTokenStore::new(&path);
        assert!(store.load().unwrap().is_none());
        store.clear().unwrap();
    }
}
