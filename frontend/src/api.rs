//! 远程接口客户端
//!
//! 统一负责：拼接 URL、从持久化存储读取 Token 并注入 `Authorization` 头、
//! 序列化请求体、把非 2xx 响应归一化为 `ApiError`。
//! 不做重试、超时和排队：一次失败的调用只失败一次。

use crate::request::{HttpClient, HttpError, HttpRequest};
use crate::storage::KeyValueStore;
use ramyro_shared::protocol::{
    ApiRequest, CancelAppointmentRequest, GetDoctorProfile, GetPatientProfile,
    ListAppointmentsRequest, ListDoctorsRequest, LoginRequest, LoginResponse, Register,
    RegisterRequest, ScheduleAppointmentRequest, UpdateDoctorRequest, UpdatePatientRequest,
};
use ramyro_shared::{
    ApiError, ApiResult, Appointment, Doctor, HEADER_AUTHORIZATION, Patient, Role,
    STORAGE_TOKEN_KEY,
};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

impl From<HttpError> for ApiError {
    fn from(e: HttpError) -> Self {
        ApiError::Network(e.to_string())
    }
}

/// 服务端错误响应体中的 `message` 字段
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn server_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body).ok()?.message
}

fn decode_body<T: DeserializeOwned>(body: &str) -> ApiResult<T> {
    // 空响应体（如 204）按 null 处理
    let body = if body.trim().is_empty() { "null" } else { body };
    serde_json::from_str(body).map_err(|e| ApiError::Decode(e.to_string()))
}

#[derive(Clone, Debug, PartialEq)]
pub struct RamyroApi<C, S> {
    base_url: String,
    client: C,
    storage: S,
}

impl<C: HttpClient, S: KeyValueStore> RamyroApi<C, S> {
    pub fn new(base_url: impl Into<String>, client: C, storage: S) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            client,
            storage,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// 与会话共用的持久化存储
    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    // 认证头：每次请求时从存储中读取，未登录则不携带
    fn auth_header(&self) -> Option<String> {
        self.storage
            .get(STORAGE_TOKEN_KEY)
            .map(|token| format!("Bearer {}", token))
    }

    /// 发送一个类型化的接口请求
    pub async fn call<R: ApiRequest>(&self, req: &R) -> ApiResult<R::Response> {
        let path = req.path();
        let mut http = HttpRequest::new(&self.url(&path), R::METHOD);

        if let Some(auth) = self.auth_header() {
            http = http.with_header(HEADER_AUTHORIZATION, &auth);
        }

        if R::METHOD.has_body() {
            let body = serde_json::to_string(req)
                .map_err(|e| HttpError::RequestBuildFailed(e.to_string()))?;
            http = http
                .with_header("Content-Type", "application/json")
                .with_body(body);
        }

        debug!(method = R::METHOD.as_str(), %path, "api request");

        let response = self.client.send(http).await.map_err(|e| {
            warn!(method = R::METHOD.as_str(), %path, error = %e, "api transport failure");
            ApiError::from(e)
        })?;

        if !response.ok() {
            let err = ApiError::from_status(response.status, server_message(&response.body));
            debug!(status = response.status, %path, error = %err, "api request rejected");
            return Err(err);
        }

        decode_body(&response.body)
    }

    // =========================================================
    // Auth
    // =========================================================

    pub async fn login(&self, email: &str, password: &str) -> ApiResult<LoginResponse> {
        let req = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.call(&req).await
    }

    pub async fn register(&self, role: Role, data: &RegisterRequest) -> ApiResult<()> {
        self.call(&Register { role, data }).await.map(|_| ())
    }

    // =========================================================
    // Profiles
    // =========================================================

    pub async fn patient_profile(&self) -> ApiResult<Patient> {
        self.call(&GetPatientProfile).await
    }

    pub async fn update_patient_profile(&self, update: &UpdatePatientRequest) -> ApiResult<()> {
        self.call(update).await.map(|_| ())
    }

    pub async fn doctor_profile(&self) -> ApiResult<Doctor> {
        self.call(&GetDoctorProfile).await
    }

    pub async fn update_doctor_profile(&self, update: &UpdateDoctorRequest) -> ApiResult<()> {
        self.call(update).await.map(|_| ())
    }

    pub async fn list_doctors(&self) -> ApiResult<Vec<Doctor>> {
        self.call(&ListDoctorsRequest).await
    }

    // =========================================================
    // Appointments
    // =========================================================

    pub async fn list_appointments(
        &self,
        role: Role,
        page: u32,
        page_size: u32,
    ) -> ApiResult<Vec<Appointment>> {
        let req = ListAppointmentsRequest {
            role,
            page,
            page_size,
        };
        self.call(&req).await
    }

    pub async fn schedule_appointment(
        &self,
        req: &ScheduleAppointmentRequest,
    ) -> ApiResult<()> {
        self.call(req).await.map(|_| ())
    }

    pub async fn cancel_appointment(&self, id: i64) -> ApiResult<()> {
        self.call(&CancelAppointmentRequest { id }).await.map(|_| ())
    }
}
