//! Ramyro 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `api` / `session` / `appointments` / `forms`: 与界面无关的核心逻辑，可在原生目标上测试
//! - `web`: 浏览器 API 的适配层（fetch、LocalStorage、History）
//! - `auth`: 认证状态管理
//! - `components`: UI 组件层

pub mod api;
pub mod appointments;
mod auth;
pub mod config;
pub mod forms;
pub mod logging;
pub mod request;
pub mod session;
pub mod state;
pub mod storage;
mod toast;

#[cfg(test)]
mod testing;

mod components {
    pub mod appointment_card;
    pub mod appointment_form;
    pub mod dashboard;
    pub mod field;
    pub mod footer;
    pub mod header;
    pub mod home;
    pub mod icons;
    pub mod login;
    pub mod profile;
    pub mod register;
}

use crate::auth::{create_auth, init_auth, role_signal};
use crate::components::appointment_form::NewAppointmentPage;
use crate::components::dashboard::DashboardPage;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::home::HomePage;
use crate::components::login::LoginPage;
use crate::components::profile::ProfilePage;
use crate::components::register::RegisterPage;
use crate::config::AppConfig;
use crate::toast::{ToastViewport, Toaster};

use leptos::prelude::*;

// 浏览器 API 适配层
pub(crate) mod web {
    mod http;
    pub mod route;
    pub mod router;
    mod storage;

    pub use http::FetchHttpClient;
    pub use storage::BrowserStorage;
}

use web::route::AppRoute;
use web::router::{Link, Router, RouterOutlet};

use ramyro_shared::Role;

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::PatientDashboard => view! { <DashboardPage role=Role::Patient /> }.into_any(),
        AppRoute::PatientProfile => view! { <ProfilePage role=Role::Patient /> }.into_any(),
        AppRoute::DoctorDashboard => view! { <DashboardPage role=Role::Doctor /> }.into_any(),
        AppRoute::DoctorProfile => view! { <ProfilePage role=Role::Doctor /> }.into_any(),
        AppRoute::NewAppointment => view! { <NewAppointmentPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-[60vh]">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                    <Link to=AppRoute::Home class="btn btn-primary mt-6">"Back to Home"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 构建期配置
    let config = AppConfig::from_build_env();
    provide_context(config.clone());

    // 2. 创建认证上下文并从 LocalStorage 恢复会话
    let auth_ctx = create_auth(&config);
    init_auth(&auth_ctx);
    provide_context(auth_ctx.clone());

    // 3. 全局提示
    let toaster = Toaster::new();
    provide_context(toaster);

    // 4. 角色信号注入路由服务，实现守卫
    let role = role_signal(&auth_ctx);

    view! {
        <Router role=role>
            <div class="min-h-screen flex flex-col bg-base-100">
                <Header />
                <main class="flex-1">
                    <RouterOutlet matcher=route_matcher />
                </main>
                <Footer />
            </div>
        </Router>
        <ToastViewport toaster=toaster />
    }
}
