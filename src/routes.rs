use actix_web::{
    get,
    http::Method,
    web::{self, ServiceConfig},
    HttpResponse, Responder,
};
use serde_json::json;

use crate::errors::AppError;

mod clients;
mod emergencies;
mod employees;
mod services;
mod users;

/// Registers every resource collection on the app.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .service(test_handler)
        .service(users::create_user_handler)
        .service(users::get_users_handler)
        .service(users::get_user_handler)
        .service(users::update_user_handler)
        .service(users::delete_user_handler)
        .service(employees::create_employee_handler)
        .service(employees::get_employees_handler)
        .service(employees::get_employee_handler)
        .service(employees::update_employee_handler)
        .service(employees::delete_employee_handler)
        .service(clients::create_client_handler)
        .service(clients::get_clients_handler)
        .service(clients::get_client_handler)
        .service(clients::update_client_handler)
        .service(clients::delete_client_handler)
        .service(services::create_service_handler)
        .service(services::get_services_handler)
        .service(services::get_service_handler)
        .service(services::update_service_handler)
        .service(services::delete_service_handler)
        .service(emergencies::create_emergency_handler)
        .service(emergencies::get_emergencies_handler)
        .service(emergencies::get_emergency_handler)
        .service(emergencies::update_emergency_handler)
        .service(emergencies::delete_emergency_handler);
}

/// Bad JSON of any kind is the client's fault: 400, never 500.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("Rejected request body: {}", err);
        AppError::Validation(format!("Invalid request body: {}", err)).into()
    })
}

fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, req| {
        log::debug!("No route for {}: {}", req.path(), err);
        AppError::NotFound("resource").into()
    })
}

#[get("/test")]
pub async fn test_handler() -> impl Responder {
    HttpResponse::Ok().json(json!({ "message": "test route" }))
}

pub async fn default_handler(req_method: Method) -> HttpResponse {
    match req_method {
        Method::GET => HttpResponse::NotFound().json(json!({ "message": "not found" })),
        _ => HttpResponse::MethodNotAllowed().json(json!({ "message": "method not allowed" })),
    }
}
