use crate::{
    errors::AppError,
    structs::{NewService, Service, ServiceChanges},
    AppState,
};

use super::{bounded, UpdateQuery};

pub async fn get_all_services(state: &AppState) -> Result<Vec<Service>, AppError> {
    let pool = &state.db_pool;
    let services = bounded(
        state,
        sqlx::query_as::<_, Service>("SELECT * FROM services ORDER BY id").fetch_all(pool),
    )
    .await?;
    Ok(services)
}

pub async fn get_service_by_id(state: &AppState, id: i64) -> Result<Service, AppError> {
    let pool = &state.db_pool;
    bounded(
        state,
        sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = $1")
            .bind(id)
            .fetch_optional(pool),
    )
    .await?
    .ok_or(AppError::NotFound("service"))
}

pub async fn create_service(state: &AppState, service: NewService) -> Result<Service, AppError> {
    let pool = &state.db_pool;
    let service = bounded(
        state,
        sqlx::query_as::<_, Service>(
            "INSERT INTO services (service_type, service_description, service_date, employee_id, client_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(service.service_type)
        .bind(service.service_description)
        .bind(service.service_date)
        .bind(service.employee_id)
        .bind(service.client_id)
        .fetch_one(pool),
    )
    .await?;
    log::info!(
        "Service created with id {} (employee {}, client {})",
        service.id,
        service.employee_id,
        service.client_id
    );
    Ok(service)
}

pub async fn update_service(
    state: &AppState,
    id: i64,
    changes: ServiceChanges,
) -> Result<Service, AppError> {
    let mut update = UpdateQuery::new("services");
    update
        .set("service_type", changes.service_type)
        .set("service_description", changes.service_description)
        .set("service_date", changes.service_date)
        .set("employee_id", changes.employee_id)
        .set("client_id", changes.client_id);
    let mut query = update.finish(id)?;

    let service = bounded(
        state,
        query
            .build_query_as::<Service>()
            .fetch_optional(&state.db_pool),
    )
    .await?
    .ok_or(AppError::NotFound("service"))?;
    log::info!("Service with id {} updated", service.id);
    Ok(service)
}

pub async fn delete_service(state: &AppState, id: i64) -> Result<(), AppError> {
    let pool = &state.db_pool;
    let result = bounded(
        state,
        sqlx::query("DELETE FROM services WHERE id = $1")
            .bind(id)
            .execute(pool),
    )
    .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("service"));
    }
    log::info!("Service with id {} deleted", id);
    Ok(())
}
