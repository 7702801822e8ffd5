use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod date;
pub mod error;
pub mod protocol;
pub mod validation;

pub use error::{ApiError, ApiResult};

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 持久化存储中保存 Bearer Token 的键
pub const STORAGE_TOKEN_KEY: &str = "token";
/// 持久化存储中保存用户角色的键
pub const STORAGE_ROLE_KEY: &str = "userRole";
pub const HEADER_AUTHORIZATION: &str = "Authorization";

/// 预约原因的最大长度（字符数）
pub const MAX_REASON_LEN: usize = 500;

// =========================================================
// 会话 (Session)
// =========================================================

/// 用户角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Patient,
    Doctor,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Doctor => "doctor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patient" => Ok(Role::Patient),
            "doctor" => Ok(Role::Doctor),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

/// 已认证的会话
///
/// 角色与 Token 绑定在同一个值里：不存在"有角色但无 Token"的状态。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub role: Role,
}

impl Session {
    pub fn new(token: impl Into<String>, role: Role) -> Self {
        Self {
            token: token.into(),
            role,
        }
    }

    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 预约状态
///
/// 服务端可能返回未知状态，原样保留在 `Other` 中，视为终态。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    Other(String),
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &str {
        match self {
            AppointmentStatus::Scheduled => "Scheduled",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
            AppointmentStatus::Other(s) => s,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self, AppointmentStatus::Scheduled)
    }
}

impl From<String> for AppointmentStatus {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Scheduled" => AppointmentStatus::Scheduled,
            "Completed" => AppointmentStatus::Completed,
            "Cancelled" => AppointmentStatus::Cancelled,
            _ => AppointmentStatus::Other(s),
        }
    }
}

impl From<AppointmentStatus> for String {
    fn from(status: AppointmentStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: i64,
    pub doctor_id: i64,
    #[serde(default)]
    pub doctor_name: String,
    pub patient_id: i64,
    #[serde(default)]
    pub patient_name: String,
    pub appointment_date: String,
    #[serde(default)]
    pub reason: String,
    pub status: AppointmentStatus,
}

impl Appointment {
    /// 解析服务端返回的预约时间
    pub fn scheduled_at(&self) -> Option<chrono::NaiveDateTime> {
        date::parse_date_time(&self.appointment_date)
    }

    /// 从指定角色的视角显示对方的名字
    pub fn counterpart_label(&self, viewer: Role) -> String {
        match viewer {
            Role::Patient => format!("Dr. {}", self.doctor_name),
            Role::Doctor => self.patient_name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub specialization: String,
}

impl Doctor {
    /// 医生下拉框中的显示文本
    pub fn display_name(&self) -> String {
        format!(
            "Dr. {} {} - {}",
            self.first_name, self.last_name, self.specialization
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub date_of_birth: Option<String>,
}

/// 个人资料（按角色区分）
#[derive(Debug, Clone, PartialEq)]
pub enum Profile {
    Patient(Patient),
    Doctor(Doctor),
}

impl Profile {
    pub fn role(&self) -> Role {
        match self {
            Profile::Patient(_) => Role::Patient,
            Profile::Doctor(_) => Role::Doctor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appointment_uses_camel_case_fields() {
        let json = r#"{
            "id": 42,
            "doctorId": 7,
            "doctorName": "Gregory House",
            "patientId": 3,
            "patientName": "Jane Roe",
            "appointmentDate": "2026-11-02T09:30:00",
            "reason": "Check-up",
            "status": "Scheduled"
        }"#;

        let appointment: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appointment.id, 42);
        assert_eq!(appointment.doctor_name, "Gregory House");
        assert!(appointment.status.is_scheduled());
        assert_eq!(appointment.counterpart_label(Role::Patient), "Dr. Gregory House");
        assert_eq!(appointment.counterpart_label(Role::Doctor), "Jane Roe");
    }

    #[test]
    fn unknown_status_is_kept_verbatim() {
        let status: AppointmentStatus = serde_json::from_str(r#""NoShow""#).unwrap();
        assert_eq!(status, AppointmentStatus::Other("NoShow".to_string()));
        assert!(!status.is_scheduled());
        assert_eq!(serde_json::to_string(&status).unwrap(), r#""NoShow""#);
    }

    #[test]
    fn role_round_trips_through_storage_string() {
        assert_eq!("doctor".parse::<Role>(), Ok(Role::Doctor));
        assert_eq!(Role::Patient.to_string(), "patient");
        assert!("admin".parse::<Role>().is_err());
    }

    #[test]
    fn doctor_display_name_includes_specialization() {
        let doctor = Doctor {
            id: 1,
            first_name: "Lisa".into(),
            last_name: "Cuddy".into(),
            email: "cuddy@example.com".into(),
            phone_number: "5551234567".into(),
            specialization: "Endocrinology".into(),
        };
        assert_eq!(doctor.display_name(), "Dr. Lisa Cuddy - Endocrinology");
    }
}
