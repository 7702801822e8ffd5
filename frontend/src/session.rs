//! 会话存储
//!
//! 认证状态的唯一来源。内存中的状态放在注入的 `StateCell` 里，
//! 同时镜像到持久化存储（`token` / `userRole` 两个键），刷新页面后可恢复。
//!
//! 所有操作只返回结果，不做页面跳转：跳转由调用方决定。

use crate::api::RamyroApi;
use crate::request::HttpClient;
use crate::state::StateCell;
use crate::storage::KeyValueStore;
use ramyro_shared::protocol::RegisterRequest;
use ramyro_shared::{Role, STORAGE_ROLE_KEY, STORAGE_TOKEN_KEY, Session};
use thiserror::Error;
use tracing::{info, warn};

/// 会话操作失败
///
/// 文案固定，不暴露账号是否存在等服务端细节；真实原因只写入日志。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Account exists!")]
    AccountExists,
}

#[derive(Clone)]
pub struct SessionStore<C, S, Cell> {
    api: RamyroApi<C, S>,
    state: Cell,
}

impl<C, S, Cell> SessionStore<C, S, Cell>
where
    C: HttpClient,
    S: KeyValueStore,
    Cell: StateCell<Option<Session>>,
{
    pub fn new(api: RamyroApi<C, S>, state: Cell) -> Self {
        Self { api, state }
    }

    pub fn api(&self) -> &RamyroApi<C, S> {
        &self.api
    }

    pub fn state(&self) -> &Cell {
        &self.state
    }

    /// 从持久化存储恢复会话
    ///
    /// 不校验 Token 是否过期：失效的 Token 只会在后续请求返回 401 时暴露。
    /// Token 与合法角色缺一即视为未登录，并清理残留的键。
    pub fn restore(&self) -> Option<Session> {
        let storage = self.api.storage();
        let restored = match storage.get(STORAGE_TOKEN_KEY) {
            Some(token) => match storage.get(STORAGE_ROLE_KEY).map(|r| r.parse::<Role>()) {
                Some(Ok(role)) => Some(Session::new(token, role)),
                other => {
                    warn!(role = ?other, "stored token has no usable role, discarding session");
                    self.clear_storage();
                    None
                }
            },
            None => {
                if storage.get(STORAGE_ROLE_KEY).is_some() {
                    warn!("stored role has no token, discarding session");
                    self.clear_storage();
                }
                None
            }
        };
        self.state.modify(|s| *s = restored.clone());
        restored
    }

    pub fn session(&self) -> Option<Session> {
        self.state.read(|s| s.clone()).flatten()
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.read(|s| s.is_some()).unwrap_or(false)
    }

    pub fn role(&self) -> Option<Role> {
        self.state
            .read(|s| s.as_ref().map(|session| session.role))
            .flatten()
    }

    /// 登录
    ///
    /// 成功后持久化并返回会话，调用方据 `session.role` 跳转到对应面板；
    /// 失败时状态不变。
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, SessionError> {
        let response = self.api.login(email, password).await.map_err(|e| {
            warn!(error = ?e, "login failed");
            SessionError::InvalidCredentials
        })?;

        let session = Session::new(response.token, response.role);
        let storage = self.api.storage();
        let persisted = storage.set(STORAGE_TOKEN_KEY, &session.token)
            & storage.set(STORAGE_ROLE_KEY, session.role.as_str());
        if !persisted {
            warn!("failed to persist session, requests will be sent without a token");
        }
        self.state.modify(|s| *s = Some(session.clone()));

        info!(role = %session.role, "logged in");
        Ok(session)
    }

    /// 注销：无条件清除存储与内存状态，不请求服务端
    pub fn logout(&self) {
        self.clear_storage();
        self.state.modify(|s| *s = None);
        info!("logged out");
    }

    /// 注册；成功后调用方跳转到登录页
    pub async fn register(&self, role: Role, data: &RegisterRequest) -> Result<(), SessionError> {
        self.api.register(role, data).await.map_err(|e| {
            warn!(%role, error = ?e, "registration failed");
            SessionError::AccountExists
        })?;
        info!(%role, "registered");
        Ok(())
    }

    pub async fn register_patient(&self, data: &RegisterRequest) -> Result<(), SessionError> {
        self.register(Role::Patient, data).await
    }

    pub async fn register_doctor(&self, data: &RegisterRequest) -> Result<(), SessionError> {
        self.register(Role::Doctor, data).await
    }

    fn clear_storage(&self) {
        let storage = self.api.storage();
        storage.delete(STORAGE_TOKEN_KEY);
        storage.delete(STORAGE_ROLE_KEY);
    }
}

#[cfg(test)]
mod tests;
