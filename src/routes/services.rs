use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;

use crate::{
    db,
    errors::AppError,
    structs::{NewService, ServiceChanges},
    AppState,
};

#[post("/services")]
pub async fn create_service_handler(
    state: web::Data<AppState>,
    web::Json(payload): web::Json<NewService>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;
    let service = db::create_service(&state, payload).await?;
    Ok(HttpResponse::Created().json(json!({ "message": "service created", "id": service.id })))
}

#[get("/services")]
pub async fn get_services_handler(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let services = db::get_all_services(&state).await?;
    Ok(HttpResponse::Ok().json(services))
}

#[get("/services/{id}")]
pub async fn get_service_handler(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let service = db::get_service_by_id(&state, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(service))
}

#[put("/services/{id}")]
pub async fn update_service_handler(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    web::Json(changes): web::Json<ServiceChanges>,
) -> Result<impl Responder, AppError> {
    changes.validate()?;
    db::update_service(&state, path.into_inner(), changes).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "service updated" })))
}

#[delete("/services/{id}")]
pub async fn delete_service_handler(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    db::delete_service(&state, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "service deleted" })))
}
