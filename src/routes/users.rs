use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;

use crate::{
    db,
    errors::AppError,
    structs::{NewUser, UserChanges},
    AppState,
};

#[post("/users")]
pub async fn create_user_handler(
    state: web::Data<AppState>,
    web::Json(payload): web::Json<NewUser>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;
    let user = db::create_user(&state, payload).await?;
    Ok(HttpResponse::Created().json(json!({ "message": "user created", "id": user.id })))
}

#[get("/users")]
pub async fn get_users_handler(state: web::Data<AppState>) -> Result<impl Responder, AppError> {
    let users = db::get_all_users(&state).await?;
    Ok(HttpResponse::Ok().json(users))
}

#[get("/users/{id}")]
pub async fn get_user_handler(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let user = db::get_user_by_id(&state, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(user))
}

#[put("/users/{id}")]
pub async fn update_user_handler(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    web::Json(changes): web::Json<UserChanges>,
) -> Result<impl Responder, AppError> {
    changes.validate()?;
    db::update_user(&state, path.into_inner(), changes).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "user updated" })))
}

#[delete("/users/{id}")]
pub async fn delete_user_handler(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    db::delete_user(&state, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "user deleted" })))
}
