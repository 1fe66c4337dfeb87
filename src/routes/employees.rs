use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;

use crate::{
    db,
    errors::AppError,
    structs::{EmployeeChanges, NewEmployee},
    AppState,
};

#[post("/employees")]
pub async fn create_employee_handler(
    state: web::Data<AppState>,
    web::Json(payload): web::Json<NewEmployee>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;
    let employee = db::create_employee(&state, payload).await?;
    Ok(HttpResponse::Created().json(json!({ "message": "employee created", "id": employee.id })))
}

#[get("/employees")]
pub async fn get_employees_handler(
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let employees = db::get_all_employees(&state).await?;
    Ok(HttpResponse::Ok().json(employees))
}

#[get("/employees/{id}")]
pub async fn get_employee_handler(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let employee = db::get_employee_by_id(&state, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(employee))
}

#[put("/employees/{id}")]
pub async fn update_employee_handler(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    web::Json(changes): web::Json<EmployeeChanges>,
) -> Result<impl Responder, AppError> {
    changes.validate()?;
    db::update_employee(&state, path.into_inner(), changes).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "employee updated" })))
}

#[delete("/employees/{id}")]
pub async fn delete_employee_handler(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    db::delete_employee(&state, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "employee deleted" })))
}
