use crate::{Appointment, Doctor, Patient, Role};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether requests with this method carry a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Patch)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// Unlike a fixed `PATH` constant, the path is computed from the request so that
/// ids and query parameters can be embedded.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path (with query string, if any).
    fn path(&self) -> String;
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// An unrecognised role fails deserialization, so a successful login always
/// yields a valid session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub role: Role,
}

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/auth/login".to_string()
    }
}

/// Registration payload, identical for both roles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

/// Register as `role`. Serializes transparently as the inner payload.
#[derive(Debug, Clone, Serialize)]
pub struct Register<'a> {
    #[serde(skip)]
    pub role: Role,
    #[serde(flatten)]
    pub data: &'a RegisterRequest,
}

impl ApiRequest for Register<'_> {
    // The created resource is not used by the client.
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("/auth/register/{}", self.role)
    }
}

// =========================================================
// Profiles
// =========================================================

#[derive(Debug, Serialize)]
pub struct GetPatientProfile;

impl ApiRequest for GetPatientProfile {
    type Response = Patient;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/patients/me".to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePatientRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
}

impl ApiRequest for UpdatePatientRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Patch;
    fn path(&self) -> String {
        "/patients/me".to_string()
    }
}

#[derive(Debug, Serialize)]
pub struct GetDoctorProfile;

impl ApiRequest for GetDoctorProfile {
    type Response = Doctor;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/doctors/me".to_string()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDoctorRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specialization: Option<String>,
}

impl ApiRequest for UpdateDoctorRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Patch;
    fn path(&self) -> String {
        "/doctors/me".to_string()
    }
}

/// List all doctors (used by the scheduling form)
#[derive(Debug, Serialize)]
pub struct ListDoctorsRequest;

impl ApiRequest for ListDoctorsRequest {
    type Response = Vec<Doctor>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/doctors/all".to_string()
    }
}

// =========================================================
// Appointments
// =========================================================

/// One page of the caller's appointments, as seen by `role`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ListAppointmentsRequest {
    #[serde(skip)]
    pub role: Role,
    pub page: u32,
    pub page_size: u32,
}

impl ApiRequest for ListAppointmentsRequest {
    type Response = Vec<Appointment>;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        let scope = match self.role {
            Role::Patient => "patients",
            Role::Doctor => "doctors",
        };
        format!(
            "/{}/appointments/all?page={}&pageSize={}",
            scope, self.page, self.page_size
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleAppointmentRequest {
    pub doctor_id: i64,
    /// `YYYY-MM-DD`
    pub appointment_date: String,
    pub reason: String,
}

impl ApiRequest for ScheduleAppointmentRequest {
    /// 响应体不使用：创建成功只看状态码
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/patients/appointments/schedule".to_string()
    }
}

/// Cancel an appointment
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CancelAppointmentRequest {
    pub id: i64,
}

impl ApiRequest for CancelAppointmentRequest {
    type Response = IgnoredAny;
    const METHOD: HttpMethod = HttpMethod::Delete;
    fn path(&self) -> String {
        format!("/appointments/{}", self.id)
    }
}
