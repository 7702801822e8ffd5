//! 路由定义模块 - 领域模型
//!
//! 纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义应用的所有路由、各路由要求的角色，以及守卫规则。

use ramyro_shared::Role;
use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 首页
    #[default]
    Home,
    Login,
    Register,
    PatientDashboard,
    PatientProfile,
    DoctorDashboard,
    DoctorProfile,
    /// 新建预约（仅患者）
    NewAppointment,
    /// 页面未找到
    NotFound,
}

/// 导航栏中的一个链接
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavLink {
    pub label: &'static str,
    pub route: AppRoute,
}

impl NavLink {
    const fn new(label: &'static str, route: AppRoute) -> Self {
        Self { label, route }
    }
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = path.trim_end_matches('/');
        match path {
            "" => Self::Home,
            "/login" => Self::Login,
            "/register" => Self::Register,
            "/patient/dashboard" => Self::PatientDashboard,
            "/patient/profile" => Self::PatientProfile,
            "/doctor/dashboard" => Self::DoctorDashboard,
            "/doctor/profile" => Self::DoctorProfile,
            "/appointments" => Self::NewAppointment,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Login => "/login",
            Self::Register => "/register",
            Self::PatientDashboard => "/patient/dashboard",
            Self::PatientProfile => "/patient/profile",
            Self::DoctorDashboard => "/doctor/dashboard",
            Self::DoctorProfile => "/doctor/profile",
            Self::NewAppointment => "/appointments",
            Self::NotFound => "/404",
        }
    }

    /// 访问该路由所需的角色
    pub fn required_role(&self) -> Option<Role> {
        match self {
            Self::PatientDashboard | Self::PatientProfile | Self::NewAppointment => {
                Some(Role::Patient)
            }
            Self::DoctorDashboard | Self::DoctorProfile => Some(Role::Doctor),
            _ => None,
        }
    }

    /// 已登录用户是否应该离开此路由（登录页、注册页）
    pub fn is_guest_only(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    pub fn dashboard_for(role: Role) -> Self {
        match role {
            Role::Patient => Self::PatientDashboard,
            Role::Doctor => Self::DoctorDashboard,
        }
    }

    pub fn profile_for(role: Role) -> Self {
        match role {
            Role::Patient => Self::PatientProfile,
            Role::Doctor => Self::DoctorProfile,
        }
    }

    /// **核心守卫逻辑**
    ///
    /// 返回实际应进入的路由：与目标相同表示放行，否则为重定向目标。
    pub fn guard(self, role: Option<Role>) -> Self {
        match (self.required_role(), role) {
            (Some(_), None) => Self::Login,
            (Some(required), Some(current)) if required != current => Self::Home,
            (None, Some(current)) if self.is_guest_only() => Self::dashboard_for(current),
            _ => self,
        }
    }
}

/// 导航栏链接（不含注销按钮，已登录时由调用方追加）
pub fn nav_links(role: Option<Role>) -> Vec<NavLink> {
    let mut links = vec![NavLink::new("Home", AppRoute::Home)];
    match role {
        None => {
            links.push(NavLink::new("Login", AppRoute::Login));
            links.push(NavLink::new("Register", AppRoute::Register));
        }
        Some(role) => {
            links.push(NavLink::new("Dashboard", AppRoute::dashboard_for(role)));
            links.push(NavLink::new("Profile", AppRoute::profile_for(role)));
        }
    }
    links
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [AppRoute; 8] = [
        AppRoute::Home,
        AppRoute::Login,
        AppRoute::Register,
        AppRoute::PatientDashboard,
        AppRoute::PatientProfile,
        AppRoute::DoctorDashboard,
        AppRoute::DoctorProfile,
        AppRoute::NewAppointment,
    ];

    #[test]
    fn paths_resolve_to_routes() {
        for route in ALL {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
        assert_eq!(AppRoute::from_path("/doctor/dashboard/"), AppRoute::DoctorDashboard);
        assert_eq!(AppRoute::from_path("/admin"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/patients/dashboard"), AppRoute::NotFound);
    }

    #[test]
    fn anonymous_users_are_sent_to_login() {
        for route in [
            AppRoute::PatientDashboard,
            AppRoute::PatientProfile,
            AppRoute::DoctorDashboard,
            AppRoute::DoctorProfile,
            AppRoute::NewAppointment,
        ] {
            assert_eq!(route.guard(None), AppRoute::Login);
        }
        assert_eq!(AppRoute::Home.guard(None), AppRoute::Home);
        assert_eq!(AppRoute::Login.guard(None), AppRoute::Login);
        assert_eq!(AppRoute::Register.guard(None), AppRoute::Register);
        assert_eq!(AppRoute::NotFound.guard(None), AppRoute::NotFound);
    }

    #[test]
    fn wrong_role_is_sent_home() {
        assert_eq!(AppRoute::DoctorDashboard.guard(Some(Role::Patient)), AppRoute::Home);
        assert_eq!(AppRoute::DoctorProfile.guard(Some(Role::Patient)), AppRoute::Home);
        assert_eq!(AppRoute::NewAppointment.guard(Some(Role::Doctor)), AppRoute::Home);
        assert_eq!(AppRoute::PatientProfile.guard(Some(Role::Doctor)), AppRoute::Home);

        assert_eq!(
            AppRoute::NewAppointment.guard(Some(Role::Patient)),
            AppRoute::NewAppointment
        );
        assert_eq!(
            AppRoute::DoctorProfile.guard(Some(Role::Doctor)),
            AppRoute::DoctorProfile
        );
    }

    #[test]
    fn authenticated_users_skip_login_and_register() {
        assert_eq!(AppRoute::Login.guard(Some(Role::Doctor)), AppRoute::DoctorDashboard);
        assert_eq!(
            AppRoute::Register.guard(Some(Role::Patient)),
            AppRoute::PatientDashboard
        );
        assert_eq!(AppRoute::Home.guard(Some(Role::Patient)), AppRoute::Home);
    }

    #[test]
    fn navigation_depends_on_role() {
        let labels = |role| {
            nav_links(role)
                .into_iter()
                .map(|l| (l.label, l.route.to_path()))
                .collect::<Vec<_>>()
        };

        assert_eq!(
            labels(None),
            vec![("Home", "/"), ("Login", "/login"), ("Register", "/register")]
        );
        assert_eq!(
            labels(Some(Role::Patient)),
            vec![
                ("Home", "/"),
                ("Dashboard", "/patient/dashboard"),
                ("Profile", "/patient/profile")
            ]
        );
        assert_eq!(
            labels(Some(Role::Doctor)),
            vec![
                ("Home", "/"),
                ("Dashboard", "/doctor/dashboard"),
                ("Profile", "/doctor/profile")
            ]
        );
    }
}
