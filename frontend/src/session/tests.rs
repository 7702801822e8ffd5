use super::*;
use crate::request::HttpError;
use crate::testing::{MemoryStore, MockHttpClient, TestApi, api};
use std::cell::RefCell;
use std::rc::Rc;

type TestSession = SessionStore<Rc<MockHttpClient>, Rc<MemoryStore>, RefCell<Option<Session>>>;

fn store(http: &Rc<MockHttpClient>, storage: &Rc<MemoryStore>) -> TestSession {
    let api: TestApi = api(http, storage);
    SessionStore::new(api, RefCell::new(None))
}

fn registration() -> RegisterRequest {
    RegisterRequest {
        email: "jane@example.com".into(),
        password: "Secret123".into(),
        first_name: "Jane".into(),
        last_name: "Roe".into(),
        phone_number: "5551234567".into(),
    }
}

#[tokio::test]
async fn doctor_login_persists_session() {
    let http = MockHttpClient::new();
    let storage = MemoryStore::new();
    http.reply(200, r#"{"token":"jwt-doctor","role":"doctor"}"#);

    let sessions = store(&http, &storage);
    let session = sessions.login("house@example.com", "Vicodin42").await.unwrap();

    assert_eq!(session, Session::new("jwt-doctor", Role::Doctor));
    assert!(sessions.is_authenticated());
    assert_eq!(sessions.role(), Some(Role::Doctor));
    assert_eq!(storage.get(STORAGE_TOKEN_KEY).as_deref(), Some("jwt-doctor"));
    assert_eq!(storage.get(STORAGE_ROLE_KEY).as_deref(), Some("doctor"));
}

#[tokio::test]
async fn failed_login_hides_cause_and_keeps_state() {
    let http = MockHttpClient::new();
    let storage = MemoryStore::new();
    http.reply(401, r#"{"message":"No account for house@example.com"}"#);
    http.fail(HttpError::NetworkError("offline".into()));

    let sessions = store(&http, &storage);
    let err = sessions.login("house@example.com", "wrongpass").await.unwrap_err();
    assert_eq!(err, SessionError::InvalidCredentials);
    assert_eq!(err.to_string(), "Invalid credentials");

    let err = sessions.login("house@example.com", "wrongpass").await.unwrap_err();
    assert_eq!(err, SessionError::InvalidCredentials);

    assert!(!sessions.is_authenticated());
    assert_eq!(storage.get(STORAGE_TOKEN_KEY), None);
}

#[tokio::test]
async fn login_with_unknown_role_is_rejected() {
    let http = MockHttpClient::new();
    let storage = MemoryStore::new();
    http.reply(200, r#"{"token":"jwt","role":"admin"}"#);

    let sessions = store(&http, &storage);
    assert_eq!(
        sessions.login("root@example.com", "Password1").await,
        Err(SessionError::InvalidCredentials)
    );
    assert_eq!(sessions.role(), None);
    assert_eq!(storage.get(STORAGE_TOKEN_KEY), None);
}

#[tokio::test]
async fn logout_clears_everything_without_a_request() {
    let http = MockHttpClient::new();
    let storage = MemoryStore::new();
    http.reply(200, r#"{"token":"jwt","role":"patient"}"#);

    let sessions = store(&http, &storage);
    sessions.login("jane@example.com", "Secret123").await.unwrap();
    sessions.logout();

    assert!(!sessions.is_authenticated());
    assert_eq!(sessions.role(), None);
    assert_eq!(storage.get(STORAGE_TOKEN_KEY), None);
    assert_eq!(storage.get(STORAGE_ROLE_KEY), None);
    assert_eq!(http.request_count(), 1);
}

#[test]
fn restores_session_from_storage() {
    let http = MockHttpClient::new();
    let storage = MemoryStore::with(&[(STORAGE_TOKEN_KEY, "stored"), (STORAGE_ROLE_KEY, "patient")]);

    let sessions = store(&http, &storage);
    assert!(!sessions.is_authenticated());

    let restored = sessions.restore();
    assert_eq!(restored, Some(Session::new("stored", Role::Patient)));
    assert_eq!(sessions.role(), Some(Role::Patient));
    // 恢复时不校验 Token
    assert_eq!(http.request_count(), 0);
}

#[test]
fn token_without_valid_role_is_discarded() {
    let http = MockHttpClient::new();
    for role in [None, Some("nurse")] {
        let storage = match role {
            Some(r) => MemoryStore::with(&[(STORAGE_TOKEN_KEY, "stored"), (STORAGE_ROLE_KEY, r)]),
            None => MemoryStore::with(&[(STORAGE_TOKEN_KEY, "stored")]),
        };
        let sessions = store(&http, &storage);

        assert_eq!(sessions.restore(), None);
        assert!(!sessions.is_authenticated());
        assert_eq!(storage.get(STORAGE_TOKEN_KEY), None);
        assert_eq!(storage.get(STORAGE_ROLE_KEY), None);
    }
}

#[test]
fn role_without_token_is_discarded() {
    let storage = MemoryStore::with(&[(STORAGE_ROLE_KEY, "doctor")]);
    let sessions = store(&MockHttpClient::new(), &storage);

    assert_eq!(sessions.restore(), None);
    assert_eq!(storage.get(STORAGE_ROLE_KEY), None);
}

#[tokio::test]
async fn login_survives_rejected_storage_writes() {
    let http = MockHttpClient::new();
    let storage = MemoryStore::rejecting_writes();
    http.reply(200, r#"{"token":"jwt-patient","role":"patient"}"#);

    let sessions = store(&http, &storage);
    let session = sessions.login("jane@example.com", "Secret123").await.unwrap();

    assert_eq!(session.role, Role::Patient);
    assert!(sessions.is_authenticated());
    assert_eq!(storage.get(STORAGE_TOKEN_KEY), None);
}

#[test]
fn empty_storage_restores_nothing() {
    let sessions = store(&MockHttpClient::new(), &MemoryStore::new());
    assert_eq!(sessions.restore(), None);
    assert_eq!(sessions.session(), None);
}

#[tokio::test]
async fn registration_targets_role_endpoint() {
    let http = MockHttpClient::new();
    let storage = MemoryStore::new();
    http.reply(201, r#"{"id":9,"email":"jane@example.com"}"#);
    http.reply(201, "");

    let sessions = store(&http, &storage);
    sessions.register_patient(&registration()).await.unwrap();
    sessions.register_doctor(&registration()).await.unwrap();

    let urls = http.urls();
    assert!(urls[0].ends_with("/auth/register/patient"));
    assert!(urls[1].ends_with("/auth/register/doctor"));
    // 注册不会建立会话
    assert!(!sessions.is_authenticated());
}

#[tokio::test]
async fn registration_failure_uses_fixed_message() {
    let http = MockHttpClient::new();
    let storage = MemoryStore::new();
    http.reply(409, r#"{"message":"Email already registered"}"#);
    http.reply(500, "");

    let sessions = store(&http, &storage);
    let err = sessions.register(Role::Patient, &registration()).await.unwrap_err();
    assert_eq!(err.to_string(), "Account exists!");

    // 与真实原因无关
    let err = sessions.register(Role::Doctor, &registration()).await.unwrap_err();
    assert_eq!(err, SessionError::AccountExists);
}
