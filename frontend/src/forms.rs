//! 表单提交流程
//!
//! 先做本地校验，再调用接口。校验失败不会发出请求；
//! 接口失败时返回归一化后的错误，由界面展示并保留用户输入。

use crate::api::RamyroApi;
use crate::request::HttpClient;
use crate::storage::KeyValueStore;
use ramyro_shared::date::{BookingWindow, format_api_date, parse_api_date, parse_date_time};
use ramyro_shared::protocol::{UpdateDoctorRequest, UpdatePatientRequest};
use ramyro_shared::validation::{AppointmentForm, Field, ProfileForm, ValidationErrors};
use ramyro_shared::{ApiError, ApiResult, Profile, Role};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("Please correct the highlighted fields.")]
    Invalid(ValidationErrors),
    #[error(transparent)]
    Api(#[from] ApiError),
}

impl SubmitError {
    /// 字段错误；接口错误时为空
    pub fn field_errors(&self) -> ValidationErrors {
        match self {
            SubmitError::Invalid(errors) => errors.clone(),
            SubmitError::Api(_) => ValidationErrors::new(),
        }
    }
}

// =========================================================
// 预约
// =========================================================

pub async fn schedule_appointment<C: HttpClient, S: KeyValueStore>(
    api: &RamyroApi<C, S>,
    form: &AppointmentForm,
    window: &BookingWindow,
) -> Result<(), SubmitError> {
    let request = form.to_request(window).map_err(SubmitError::Invalid)?;
    api.schedule_appointment(&request).await.map_err(|e| {
        warn!(doctor_id = request.doctor_id, error = ?e, "failed to schedule appointment");
        e
    })?;
    info!(
        doctor_id = request.doctor_id,
        date = %request.appointment_date,
        "appointment scheduled"
    );
    Ok(())
}

// =========================================================
// 个人资料
// =========================================================

pub async fn load_profile<C: HttpClient, S: KeyValueStore>(
    api: &RamyroApi<C, S>,
    role: Role,
) -> ApiResult<Profile> {
    let profile = match role {
        Role::Patient => api.patient_profile().await.map(Profile::Patient),
        Role::Doctor => api.doctor_profile().await.map(Profile::Doctor),
    };
    profile.inspect_err(|e| warn!(%role, error = ?e, "failed to load profile"))
}

/// 个人资料编辑中的草稿
///
/// 邮箱只读；出生日期（患者）为 `YYYY-MM-DD` 或空，专科（医生）可为空。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub date_of_birth: String,
    pub specialization: String,
}

impl ProfileDraft {
    pub fn from_profile(profile: &Profile) -> Self {
        match profile {
            Profile::Patient(p) => Self {
                first_name: p.first_name.clone(),
                last_name: p.last_name.clone(),
                email: p.email.clone(),
                phone_number: p.phone_number.clone(),
                date_of_birth: p
                    .date_of_birth
                    .as_deref()
                    .and_then(parse_date_time)
                    .map(|dt| format_api_date(dt.date()))
                    .unwrap_or_default(),
                specialization: String::new(),
            },
            Profile::Doctor(d) => Self {
                first_name: d.first_name.clone(),
                last_name: d.last_name.clone(),
                email: d.email.clone(),
                phone_number: d.phone_number.clone(),
                date_of_birth: String::new(),
                specialization: d.specialization.clone(),
            },
        }
    }

    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ProfileForm {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone_number: self.phone_number.clone(),
        }
        .validate();

        let dob = self.date_of_birth.trim();
        if !dob.is_empty() && parse_api_date(dob).is_none() {
            errors.check(
                Field::DateOfBirth,
                Err("Please enter a valid date".to_string()),
            );
        }
        errors
    }

    fn date_of_birth(&self) -> Option<String> {
        parse_api_date(&self.date_of_birth).map(format_api_date)
    }

    fn specialization(&self) -> Option<String> {
        let s = self.specialization.trim();
        (!s.is_empty()).then(|| s.to_string())
    }

    pub fn patient_update(&self) -> UpdatePatientRequest {
        UpdatePatientRequest {
            first_name: Some(self.first_name.clone()),
            last_name: Some(self.last_name.clone()),
            phone_number: Some(self.phone_number.clone()),
            date_of_birth: self.date_of_birth(),
        }
    }

    pub fn doctor_update(&self) -> UpdateDoctorRequest {
        UpdateDoctorRequest {
            first_name: Some(self.first_name.clone()),
            last_name: Some(self.last_name.clone()),
            phone_number: Some(self.phone_number.clone()),
            specialization: self.specialization(),
        }
    }
}

pub async fn save_profile<C: HttpClient, S: KeyValueStore>(
    api: &RamyroApi<C, S>,
    role: Role,
    draft: &ProfileDraft,
) -> Result<(), SubmitError> {
    draft.validate().into_result().map_err(SubmitError::Invalid)?;
    let result = match role {
        Role::Patient => api.update_patient_profile(&draft.patient_update()).await,
        Role::Doctor => api.update_doctor_profile(&draft.doctor_update()).await,
    };
    result.map_err(|e| {
        warn!(%role, error = ?e, "failed to update profile");
        e
    })?;
    info!(%role, "profile updated");
    Ok(())
}
