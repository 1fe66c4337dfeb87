use crate::{
    errors::AppError,
    structs::{Emergency, EmergencyChanges, NewEmergency},
    AppState,
};

use super::{bounded, UpdateQuery};

pub async fn get_all_emergencies(state: &AppState) -> Result<Vec<Emergency>, AppError> {
    let pool = &state.db_pool;
    let emergencies = bounded(
        state,
        sqlx::query_as::<_, Emergency>("SELECT * FROM emergencies ORDER BY id").fetch_all(pool),
    )
    .await?;
    Ok(emergencies)
}

pub async fn get_emergency_by_id(state: &AppState, id: i64) -> Result<Emergency, AppError> {
    let pool = &state.db_pool;
    bounded(
        state,
        sqlx::query_as::<_, Emergency>("SELECT * FROM emergencies WHERE id = $1")
            .bind(id)
            .fetch_optional(pool),
    )
    .await?
    .ok_or(AppError::NotFound("emergency"))
}

pub async fn create_emergency(
    state: &AppState,
    emergency: NewEmergency,
) -> Result<Emergency, AppError> {
    let pool = &state.db_pool;
    let emergency = bounded(
        state,
        sqlx::query_as::<_, Emergency>(
            "INSERT INTO emergencies (emergency_type, emergency_description, emergency_date, employee_id, client_id) \
             VALUES ($1, $2, $3, $4, $5) RETURNING *",
        )
        .bind(emergency.emergency_type)
        .bind(emergency.emergency_description)
        .bind(emergency.emergency_date)
        .bind(emergency.employee_id)
        .bind(emergency.client_id)
        .fetch_one(pool),
    )
    .await?;
    log::warn!(
        "Emergency {} opened for client {} (employee {})",
        emergency.id,
        emergency.client_id,
        emergency.employee_id
    );
    Ok(emergency)
}

pub async fn update_emergency(
    state: &AppState,
    id: i64,
    changes: EmergencyChanges,
) -> Result<Emergency, AppError> {
    let mut update = UpdateQuery::new("emergencies");
    update
        .set("emergency_type", changes.emergency_type)
        .set("emergency_description", changes.emergency_description)
        .set("emergency_date", changes.emergency_date)
        .set("employee_id", changes.employee_id)
        .set("client_id", changes.client_id);
    let mut query = update.finish(id)?;

    let emergency = bounded(
        state,
        query
            .build_query_as::<Emergency>()
            .fetch_optional(&state.db_pool),
    )
    .await?
    .ok_or(AppError::NotFound("emergency"))?;
    log::info!("Emergency with id {} updated", emergency.id);
    Ok(emergency)
}

pub async fn delete_emergency(state: &AppState, id: i64) -> Result<(), AppError> {
    let pool = &state.db_pool;
    let result = bounded(
        state,
        sqlx::query("DELETE FROM emergencies WHERE id = $1")
            .bind(id)
            .execute(pool),
    )
    .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("emergency"));
    }
    log::info!("Emergency with id {} deleted", id);
    Ok(())
}
