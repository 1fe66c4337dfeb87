use crate::errors::AppError;

pub const SHORT_TEXT: usize = 80;
pub const LONG_TEXT: usize = 120;

/// Rejects blank values and values longer than `max` characters.
pub fn require_text(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{} must not be empty", field)));
    }
    if value.chars().count() > max {
        return Err(AppError::Validation(format!(
            "{} must be at most {} characters long",
            field, max
        )));
    }
    Ok(())
}

pub fn require_cpf(value: &str) -> Result<(), AppError> {
    if value.len() != 11 || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(AppError::Validation(
            "cpf must be exactly 11 digits".to_owned(),
        ));
    }
    Ok(())
}

pub fn require_email(value: &str) -> Result<(), AppError> {
    require_text("email", value, LONG_TEXT)?;
    if !value.contains('@') {
        return Err(AppError::Validation("Invalid email address".to_owned()));
    }
    Ok(())
}

pub fn require_salary(value: f64) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::Validation(
            "salary must be a non-negative number".to_owned(),
        ));
    }
    Ok(())
}

pub fn require_id(field: &str, value: i64) -> Result<(), AppError> {
    if value <= 0 {
        return Err(AppError::Validation(format!(
            "{} must be a positive id",
            field
        )));
    }
    Ok(())
}

pub fn to_camel_case(snake: &str) -> String {
    let mut out = String::with_capacity(snake.len());
    let mut upper = false;
    for c in snake.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
