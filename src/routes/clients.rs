use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;

use crate::{
    db,
    errors::AppError,
    structs::{ClientChanges, NewClient},
    AppState,
};

#[post("/clients")]
pub async fn create_client_handler(
    state: web::Data<AppState>,
    web::Json(payload): web::Json<NewClient>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;
    let client = db::create_client(&state, payload).await?;
    Ok(HttpResponse::Created().json(json!({ "message": "client created", "id": client.id })))
}

#[get("/clients")]
pub async fn get_clients_handler(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let clients = db::get_all_clients(&state).await?;
    Ok(HttpResponse::Ok().json(clients))
}

#[get("/clients/{id}")]
pub async fn get_client_handler(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let client = db::get_client_by_id(&state, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(client))
}

#[put("/clients/{id}")]
pub async fn update_client_handler(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    web::Json(changes): web::Json<ClientChanges>,
) -> Result<impl Responder, AppError> {
    changes.validate()?;
    db::update_client(&state, path.into_inner(), changes).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "client updated" })))
}

#[delete("/clients/{id}")]
pub async fn delete_client_handler(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    db::delete_client(&state, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "client deleted" })))
}
