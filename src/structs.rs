use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;

use crate::{
    errors::AppError,
    utils::{
        require_cpf, require_email, require_id, require_salary, require_text, LONG_TEXT,
        SHORT_TEXT,
    },
};

const PHONE_LEN: usize = 14;
const POSTAL_CODE_LEN: usize = 8;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub birth_date: NaiveDateTime,
    pub phone: String,
    #[serde(rename = "CEP")]
    pub postal_code: String,
    pub address: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewUser {
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub birth_date: NaiveDateTime,
    pub phone: String,
    #[serde(rename = "CEP", alias = "postalCode")]
    pub postal_code: String,
    pub address: String,
}

impl NewUser {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text("name", &self.name, SHORT_TEXT)?;
        require_cpf(&self.cpf)?;
        require_email(&self.email)?;
        require_text("phone", &self.phone, PHONE_LEN)?;
        require_text("CEP", &self.postal_code, POSTAL_CODE_LEN)?;
        require_text("address", &self.address, LONG_TEXT)
    }
}

/// Partial update: absent fields are left untouched.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UserChanges {
    pub name: Option<String>,
    pub cpf: Option<String>,
    pub email: Option<String>,
    pub birth_date: Option<NaiveDateTime>,
    pub phone: Option<String>,
    #[serde(rename = "CEP", alias = "postalCode")]
    pub postal_code: Option<String>,
    pub address: Option<String>,
}

impl UserChanges {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.is_none()
            && self.cpf.is_none()
            && self.email.is_none()
            && self.birth_date.is_none()
            && self.phone.is_none()
            && self.postal_code.is_none()
            && self.address.is_none()
        {
            return Err(no_changes());
        }
        if let Some(name) = &self.name {
            require_text("name", name, SHORT_TEXT)?;
        }
        if let Some(cpf) = &self.cpf {
            require_cpf(cpf)?;
        }
        if let Some(email) = &self.email {
            require_email(email)?;
        }
        if let Some(phone) = &self.phone {
            require_text("phone", phone, PHONE_LEN)?;
        }
        if let Some(postal_code) = &self.postal_code {
            require_text("CEP", postal_code, POSTAL_CODE_LEN)?;
        }
        if let Some(address) = &self.address {
            require_text("address", address, LONG_TEXT)?;
        }
        Ok(())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub user_id: i64,
    pub role: String,
    pub salary: f64,
    pub admission_date: NaiveDateTime,
    pub resignation_date: Option<NaiveDateTime>,
    pub status: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewEmployee {
    pub user_id: i64,
    pub role: String,
    pub salary: f64,
    pub admission_date: NaiveDateTime,
    #[serde(default)]
    pub resignation_date: Option<NaiveDateTime>,
    pub status: String,
}

impl NewEmployee {
    pub fn validate(&self) -> Result<(), AppError> {
        require_id("userId", self.user_id)?;
        require_text("role", &self.role, SHORT_TEXT)?;
        require_salary(self.salary)?;
        require_text("status", &self.status, SHORT_TEXT)?;
        match self.resignation_date {
            Some(resigned) if resigned < self.admission_date => Err(AppError::Validation(
                "resignationDate must not precede admissionDate".to_owned(),
            )),
            _ => Ok(()),
        }
    }
}

/// `resignationDate: null` clears the date (a rehire); leaving the key out
/// keeps the stored value.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EmployeeChanges {
    pub user_id: Option<i64>,
    pub role: Option<String>,
    pub salary: Option<f64>,
    pub admission_date: Option<NaiveDateTime>,
    #[serde(
        default,
        deserialize_with = "present_or_null",
        skip_serializing_if = "Option::is_none"
    )]
    pub resignation_date: Option<Option<NaiveDateTime>>,
    pub status: Option<String>,
}

impl EmployeeChanges {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.user_id.is_none()
            && self.role.is_none()
            && self.salary.is_none()
            && self.admission_date.is_none()
            && self.resignation_date.is_none()
            && self.status.is_none()
        {
            return Err(no_changes());
        }
        if let Some(user_id) = self.user_id {
            require_id("userId", user_id)?;
        }
        if let Some(role) = &self.role {
            require_text("role", role, SHORT_TEXT)?;
        }
        if let Some(salary) = self.salary {
            require_salary(salary)?;
        }
        if let Some(status) = &self.status {
            require_text("status", status, SHORT_TEXT)?;
        }
        if let (Some(admitted), Some(Some(resigned))) = (self.admission_date, self.resignation_date)
        {
            if resigned < admitted {
                return Err(AppError::Validation(
                    "resignationDate must not precede admissionDate".to_owned(),
                ));
            }
        }
        Ok(())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    pub id: i64,
    pub user_id: i64,
    pub client_type: String,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewClient {
    pub user_id: i64,
    pub client_type: String,
}

impl NewClient {
    pub fn validate(&self) -> Result<(), AppError> {
        require_id("userId", self.user_id)?;
        require_text("clientType", &self.client_type, SHORT_TEXT)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ClientChanges {
    pub user_id: Option<i64>,
    pub client_type: Option<String>,
}

impl ClientChanges {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.user_id.is_none() && self.client_type.is_none() {
            return Err(no_changes());
        }
        if let Some(user_id) = self.user_id {
            require_id("userId", user_id)?;
        }
        if let Some(client_type) = &self.client_type {
            require_text("clientType", client_type, SHORT_TEXT)?;
        }
        Ok(())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id: i64,
    pub service_type: String,
    pub service_description: String,
    pub service_date: NaiveDateTime,
    pub employee_id: i64,
    pub client_id: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewService {
    pub service_type: String,
    pub service_description: String,
    pub service_date: NaiveDateTime,
    pub employee_id: i64,
    pub client_id: i64,
}

impl NewService {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text("serviceType", &self.service_type, SHORT_TEXT)?;
        require_text("serviceDescription", &self.service_description, LONG_TEXT)?;
        require_id("employeeId", self.employee_id)?;
        require_id("clientId", self.client_id)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ServiceChanges {
    pub service_type: Option<String>,
    pub service_description: Option<String>,
    pub service_date: Option<NaiveDateTime>,
    pub employee_id: Option<i64>,
    pub client_id: Option<i64>,
}

impl ServiceChanges {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.service_type.is_none()
            && self.service_description.is_none()
            && self.service_date.is_none()
            && self.employee_id.is_none()
            && self.client_id.is_none()
        {
            return Err(no_changes());
        }
        if let Some(service_type) = &self.service_type {
            require_text("serviceType", service_type, SHORT_TEXT)?;
        }
        if let Some(description) = &self.service_description {
            require_text("serviceDescription", description, LONG_TEXT)?;
        }
        if let Some(employee_id) = self.employee_id {
            require_id("employeeId", employee_id)?;
        }
        if let Some(client_id) = self.client_id {
            require_id("clientId", client_id)?;
        }
        Ok(())
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Emergency {
    pub id: i64,
    pub emergency_type: String,
    pub emergency_description: String,
    pub emergency_date: NaiveDateTime,
    pub employee_id: i64,
    pub client_id: i64,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewEmergency {
    pub emergency_type: String,
    pub emergency_description: String,
    pub emergency_date: NaiveDateTime,
    pub employee_id: i64,
    pub client_id: i64,
}

impl NewEmergency {
    pub fn validate(&self) -> Result<(), AppError> {
        require_text("emergencyType", &self.emergency_type, SHORT_TEXT)?;
        require_text(
            "emergencyDescription",
            &self.emergency_description,
            LONG_TEXT,
        )?;
        require_id("employeeId", self.employee_id)?;
        require_id("clientId", self.client_id)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EmergencyChanges {
    pub emergency_type: Option<String>,
    pub emergency_description: Option<String>,
    pub emergency_date: Option<NaiveDateTime>,
    pub employee_id: Option<i64>,
    pub client_id: Option<i64>,
}

impl EmergencyChanges {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.emergency_type.is_none()
            && self.emergency_description.is_none()
            && self.emergency_date.is_none()
            && self.employee_id.is_none()
            && self.client_id.is_none()
        {
            return Err(no_changes());
        }
        if let Some(emergency_type) = &self.emergency_type {
            require_text("emergencyType", emergency_type, SHORT_TEXT)?;
        }
        if let Some(description) = &self.emergency_description {
            require_text("emergencyDescription", description, LONG_TEXT)?;
        }
        if let Some(employee_id) = self.employee_id {
            require_id("employeeId", employee_id)?;
        }
        if let Some(client_id) = self.client_id {
            require_id("clientId", client_id)?;
        }
        Ok(())
    }
}

// Only called when the key is present, so `null` becomes `Some(None)`.
fn present_or_null<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn no_changes() -> AppError {
    AppError::Validation("request body contains no fields to update".to_owned())
}
