use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;

use crate::{
    db,
    errors::AppError,
    structs::{EmergencyChanges, NewEmergency},
    AppState,
};

#[post("/emergencies")]
pub async fn create_emergency_handler(
    state: web::Data<AppState>,
    web::Json(payload): web::Json<NewEmergency>,
) -> Result<impl Responder, AppError> {
    payload.validate()?;
    let emergency = db::create_emergency(&state, payload).await?;
    Ok(HttpResponse::Created().json(json!({ "message": "emergency created", "id": emergency.id })))
}

#[get("/emergencies")]
pub async fn get_emergencies_handler(
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let emergencies = db::get_all_emergencies(&state).await?;
    Ok(HttpResponse::Ok().json(emergencies))
}

#[get("/emergencies/{id}")]
pub async fn get_emergency_handler(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    let emergency = db::get_emergency_by_id(&state, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(emergency))
}

#[put("/emergencies/{id}")]
pub async fn update_emergency_handler(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    web::Json(changes): web::Json<EmergencyChanges>,
) -> Result<impl Responder, AppError> {
    changes.validate()?;
    db::update_emergency(&state, path.into_inner(), changes).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "emergency updated" })))
}

#[delete("/emergencies/{id}")]
pub async fn delete_emergency_handler(
    state: web::Data<AppState>,
    path: web::Path<i64>,
) -> Result<impl Responder, AppError> {
    db::delete_emergency(&state, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "emergency deleted" })))
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test as actix_test};
    use serde_json::{json, Value};

    use crate::test_support::{memory_state, seed_parties, test_app};

    #[actix_web::test]
    async fn emergency_update_and_delete() {
        let state = memory_state().await;
        let (employee, client) = seed_parties(&state).await;
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/emergencies")
            .set_json(json!({
                "emergencyType": "flooding",
                "emergencyDescription": "Basement flooded after burst pipe",
                "emergencyDate": "2024-11-02T02:10:00",
                "employeeId": employee.id,
                "clientId": client.id
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let created: Value = actix_test::read_body_json(response).await;
        let uri = format!("/emergencies/{}", created["id"]);

        let request = actix_test::TestRequest::put()
            .uri(&uri)
            .set_json(json!({ "emergencyDescription": "Water shut off, pumping out" }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let request = actix_test::TestRequest::get().uri(&uri).to_request();
        let emergency: Value = actix_test::call_and_read_body_json(&app, request).await;
        assert_eq!(emergency["emergencyDescription"], "Water shut off, pumping out");
        assert_eq!(emergency["emergencyType"], "flooding");

        let request = actix_test::TestRequest::delete().uri(&uri).to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);

        let request = actix_test::TestRequest::delete().uri(&uri).to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn emergency_for_unknown_client_is_409() {
        let state = memory_state().await;
        let (employee, client) = seed_parties(&state).await;
        let app = actix_test::init_service(test_app(state)).await;

        let request = actix_test::TestRequest::post()
            .uri("/emergencies")
            .set_json(json!({
                "emergencyType": "fire",
                "emergencyDescription": "Smoke in the kitchen",
                "emergencyDate": "2024-11-03T20:00:00",
                "employeeId": employee.id,
                "clientId": client.id + 50
            }))
            .to_request();
        let response = actix_test::call_service(&app, request).await;
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
