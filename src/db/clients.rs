use crate::{
    errors::AppError,
    structs::{Client, ClientChanges, NewClient},
    AppState,
};

use super::{bounded, UpdateQuery};

pub async fn get_all_clients(state: &AppState) -> Result<Vec<Client>, AppError> {
    let pool = &state.db_pool;
    let clients = bounded(
        state,
        sqlx::query_as::<_, Client>("SELECT * FROM clients ORDER BY id").fetch_all(pool),
    )
    .await?;
    Ok(clients)
}

pub async fn get_client_by_id(state: &AppState, id: i64) -> Result<Client, AppError> {
    let pool = &state.db_pool;
    bounded(
        state,
        sqlx::query_as::<_, Client>("SELECT * FROM clients WHERE id = $1")
            .bind(id)
            .fetch_optional(pool),
    )
    .await?
    .ok_or(AppError::NotFound("client"))
}

pub async fn create_client(state: &AppState, client: NewClient) -> Result<Client, AppError> {
    let pool = &state.db_pool;
    let client = bounded(
        state,
        sqlx::query_as::<_, Client>(
            "INSERT INTO clients (user_id, client_type) VALUES ($1, $2) RETURNING *",
        )
        .bind(client.user_id)
        .bind(client.client_type)
        .fetch_one(pool),
    )
    .await?;
    log::info!(
        "Client created with id {} for user {}",
        client.id,
        client.user_id
    );
    Ok(client)
}

pub async fn update_client(
    state: &AppState,
    id: i64,
    changes: ClientChanges,
) -> Result<Client, AppError> {
    let mut update = UpdateQuery::new("clients");
    update
        .set("user_id", changes.user_id)
        .set("client_type", changes.client_type);
    let mut query = update.finish(id)?;

    let client = bounded(
        state,
        query.build_query_as::<Client>().fetch_optional(&state.db_pool),
    )
    .await?
    .ok_or(AppError::NotFound("client"))?;
    log::info!("Client with id {} updated", client.id);
    Ok(client)
}

pub async fn delete_client(state: &AppState, id: i64) -> Result<(), AppError> {
    let pool = &state.db_pool;
    let result = bounded(
        state,
        sqlx::query("DELETE FROM clients WHERE id = $1")
            .bind(id)
            .execute(pool),
    )
    .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("client"));
    }
    log::info!("Client with id {} deleted", id);
    Ok(())
}
