//! 认证模块
//!
//! 把 `SessionStore` 装配为浏览器版本：fetch 客户端、LocalStorage、响应式信号，
//! 并通过 Context 提供给组件。路由服务只拿到派生出的角色信号。

use crate::api::RamyroApi;
use crate::config::AppConfig;
use crate::session::SessionStore;
use crate::web::{BrowserStorage, FetchHttpClient};
use leptos::prelude::*;
use ramyro_shared::{Role, Session};

pub type BrowserApi = RamyroApi<FetchHttpClient, BrowserStorage>;

/// 认证上下文
pub type AuthContext = SessionStore<FetchHttpClient, BrowserStorage, RwSignal<Option<Session>>>;

pub fn create_auth(config: &AppConfig) -> AuthContext {
    let api: BrowserApi = RamyroApi::new(config.api_base_url.clone(), FetchHttpClient, BrowserStorage);
    SessionStore::new(api, RwSignal::new(None))
}

/// 首次渲染前从 LocalStorage 恢复会话
pub fn init_auth(ctx: &AuthContext) {
    ctx.restore();
}

/// 当前角色（响应式）
pub fn role_signal(ctx: &AuthContext) -> Signal<Option<Role>> {
    let state = *ctx.state();
    Signal::derive(move || state.with(|s| s.as_ref().map(|session| session.role)))
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
