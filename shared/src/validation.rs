//! 表单校验模块
//!
//! 所有字段一次性校验，每个字段只报告第一条失败的规则；
//! 只要存在任一错误，表单就不允许提交。

use crate::MAX_REASON_LEN;
use crate::date::BookingWindow;
use crate::protocol::{LoginRequest, RegisterRequest, ScheduleAppointmentRequest};
use chrono::NaiveDate;
use regex::Regex;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

pub const MIN_PASSWORD_LEN: usize = 8;
pub const MIN_NAME_LEN: usize = 2;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("email pattern"));
static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9]{10,15}$").expect("phone pattern"));

// =========================================================
// 字段与错误集合
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Email,
    Password,
    FirstName,
    LastName,
    PhoneNumber,
    Doctor,
    Date,
    Reason,
    DateOfBirth,
    Specialization,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::Email => "email",
            Field::Password => "password",
            Field::FirstName => "firstName",
            Field::LastName => "lastName",
            Field::PhoneNumber => "phoneNumber",
            Field::Doctor => "doctorId",
            Field::Date => "date",
            Field::Reason => "reason",
            Field::DateOfBirth => "dateOfBirth",
            Field::Specialization => "specialization",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 字段 -> 错误消息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录字段校验结果，只保留该字段的第一条错误
    pub fn check(&mut self, field: Field, result: Result<(), String>) {
        if let Err(message) = result {
            self.errors.entry(field).or_insert(message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.errors.contains_key(&field)
    }

    /// 用户修改字段后清除该字段的错误
    pub fn clear(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

// =========================================================
// 单字段规则
// =========================================================

pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email is required".to_string());
    }
    if !EMAIL_RE.is_match(email) {
        return Err("Please enter a valid email address".to_string());
    }
    Ok(())
}

/// 登录密码：只校验长度
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }
    Ok(())
}

/// 注册密码：长度 + 大小写字母 + 数字
pub fn validate_new_password(password: &str) -> Result<(), String> {
    validate_password(password)?;
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    if !(has_lower && has_upper && has_digit) {
        return Err("Password must include uppercase, lowercase, and number".to_string());
    }
    Ok(())
}

pub fn validate_name(label: &str, name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err(format!("{} is required", label));
    }
    if name.chars().count() < MIN_NAME_LEN {
        return Err(format!(
            "{} must be at least {} characters",
            label, MIN_NAME_LEN
        ));
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), String> {
    if phone.is_empty() {
        return Err("Phone number is required".to_string());
    }
    if !PHONE_RE.is_match(phone) {
        return Err("Please enter a valid phone number".to_string());
    }
    Ok(())
}

pub fn validate_reason(reason: &str) -> Result<(), String> {
    if reason.trim().is_empty() {
        return Err("Please provide a reason for the appointment".to_string());
    }
    if reason.chars().count() > MAX_REASON_LEN {
        return Err(format!(
            "Reason must be less than {} characters",
            MAX_REASON_LEN
        ));
    }
    Ok(())
}

pub fn validate_appointment_date(
    date: Option<NaiveDate>,
    window: &BookingWindow,
) -> Result<(), String> {
    match date {
        None => Err("Please select a date".to_string()),
        Some(d) if !window.contains(d) => Err(format!(
            "Please pick a date between {} and {}",
            window.min_attr(),
            window.max_attr()
        )),
        Some(_) => Ok(()),
    }
}

// =========================================================
// 表单
// =========================================================

/// 登录表单
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check(Field::Email, validate_email(&self.email));
        errors.check(Field::Password, validate_password(&self.password));
        errors
    }

    /// 校验通过后构造请求
    pub fn to_request(&self) -> Result<LoginRequest, ValidationErrors> {
        self.validate().into_result()?;
        Ok(LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        })
    }
}

/// 注册表单（患者与医生共用）
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check(Field::Email, validate_email(&self.email));
        errors.check(Field::Password, validate_new_password(&self.password));
        errors.check(Field::FirstName, validate_name("First name", &self.first_name));
        errors.check(Field::LastName, validate_name("Last name", &self.last_name));
        errors.check(Field::PhoneNumber, validate_phone(&self.phone_number));
        errors
    }

    pub fn to_request(&self) -> Result<RegisterRequest, ValidationErrors> {
        self.validate().into_result()?;
        Ok(RegisterRequest {
            email: self.email.clone(),
            password: self.password.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            phone_number: self.phone_number.clone(),
        })
    }
}

/// 预约表单
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppointmentForm {
    pub doctor_id: Option<i64>,
    pub date: Option<NaiveDate>,
    pub reason: String,
}

impl AppointmentForm {
    pub fn validate(&self, window: &BookingWindow) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        if self.doctor_id.is_none() {
            errors.check(Field::Doctor, Err("Please select a doctor".to_string()));
        }
        errors.check(Field::Date, validate_appointment_date(self.date, window));
        errors.check(Field::Reason, validate_reason(&self.reason));
        errors
    }

    pub fn to_request(
        &self,
        window: &BookingWindow,
    ) -> Result<ScheduleAppointmentRequest, ValidationErrors> {
        self.validate(window).into_result()?;
        match (self.doctor_id, self.date) {
            (Some(doctor_id), Some(date)) => Ok(ScheduleAppointmentRequest {
                doctor_id,
                appointment_date: crate::date::format_api_date(date),
                reason: self.reason.clone(),
            }),
            // validate() 已保证两者都存在
            _ => Err(ValidationErrors::new()),
        }
    }
}

/// 个人资料表单
///
/// 邮箱只读，不参与校验；出生日期与专科为可选字段。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
}

impl ProfileForm {
    pub fn validate(&self) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        errors.check(Field::FirstName, validate_name("First name", &self.first_name));
        errors.check(Field::LastName, validate_name("Last name", &self.last_name));
        errors.check(Field::PhoneNumber, validate_phone(&self.phone_number));
        errors
    }
}
