use crate::{
    errors::AppError,
    structs::{NewUser, User, UserChanges},
    AppState,
};

use super::{bounded, UpdateQuery};

pub async fn get_all_users(state: &AppState) -> Result<Vec<User>, AppError> {
    let pool = &state.db_pool;
    let users = bounded(
        state,
        sqlx::query_as::<_, User>("SELECT * FROM users ORDER BY id").fetch_all(pool),
    )
    .await?;
    Ok(users)
}

pub async fn get_user_by_id(state: &AppState, id: i64) -> Result<User, AppError> {
    let pool = &state.db_pool;
    bounded(
        state,
        sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool),
    )
    .await?
    .ok_or(AppError::NotFound("user"))
}

pub async fn create_user(state: &AppState, user: NewUser) -> Result<User, AppError> {
    let pool = &state.db_pool;
    let user = bounded(
        state,
        sqlx::query_as::<_, User>(
            "INSERT INTO users (name, cpf, email, birth_date, phone, postal_code, address) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING *",
        )
        .bind(user.name)
        .bind(user.cpf)
        .bind(user.email)
        .bind(user.birth_date)
        .bind(user.phone)
        .bind(user.postal_code)
        .bind(user.address)
        .fetch_one(pool),
    )
    .await?;
    log::info!("User created with id {}", user.id);
    Ok(user)
}

pub async fn update_user(
    state: &AppState,
    id: i64,
    changes: UserChanges,
) -> Result<User, AppError> {
    let mut update = UpdateQuery::new("users");
    update
        .set("name", changes.name)
        .set("cpf", changes.cpf)
        .set("email", changes.email)
        .set("birth_date", changes.birth_date)
        .set("phone", changes.phone)
        .set("postal_code", changes.postal_code)
        .set("address", changes.address);
    let mut query = update.finish(id)?;

    let user = bounded(
        state,
        query
            .build_query_as::<User>()
            .fetch_optional(&state.db_pool),
    )
    .await?
    .ok_or(AppError::NotFound("user"))?;
    log::info!("User with id {} updated", user.id);
    Ok(user)
}

/// Fails with a conflict while an employee or client row still points at the user.
pub async fn delete_user(state: &AppState, id: i64) -> Result<(), AppError> {
    let pool = &state.db_pool;
    let result = bounded(
        state,
        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool),
    )
    .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("user"));
    }
    log::info!("User with id {} deleted", id);
    Ok(())
}
