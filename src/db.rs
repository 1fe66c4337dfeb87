use std::{future::Future, str::FromStr, time::Duration};

use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    Encode, QueryBuilder, Sqlite, SqlitePool, Type,
};

use crate::{config::Config, errors::AppError, AppState};

mod clients;
mod emergencies;
mod employees;
mod services;
mod users;

pub use clients::*;
pub use emergencies::*;
pub use employees::*;
pub use services::*;
pub use users::*;

const SCHEMA: &str = include_str!("../sql/schema.sql");

pub async fn connect(config: &Config) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .read_only(false)
        .busy_timeout(Duration::from_secs(5));

    let db_pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.query_timeout)
        .connect_with(opts)
        .await?;
    Ok(db_pool)
}

/// Creates any missing tables. Safe to run on every start.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    log::info!("Database schema ready");
    Ok(())
}

/// Runs a single storage call under the configured query timeout.
pub(crate) async fn bounded<T, F>(state: &AppState, operation: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, sqlx::Error>>,
{
    match tokio::time::timeout(state.query_timeout, operation).await {
        Ok(result) => result.map_err(AppError::from),
        Err(_) => {
            log::error!(
                "Database call exceeded {:?} and was abandoned",
                state.query_timeout
            );
            Err(AppError::Timeout)
        }
    }
}

/// `UPDATE <table> SET ... WHERE id = ? RETURNING *` built from the
/// fields a client actually sent.
pub(crate) struct UpdateQuery<'args> {
    query: QueryBuilder<'args, Sqlite>,
    assignments: usize,
}

impl<'args> UpdateQuery<'args> {
    pub(crate) fn new(table: &str) -> Self {
        UpdateQuery {
            query: QueryBuilder::new(format!("UPDATE {} SET ", table)),
            assignments: 0,
        }
    }

    pub(crate) fn set<T>(&mut self, column: &str, value: Option<T>) -> &mut Self
    where
        T: 'args + Encode<'args, Sqlite> + Type<Sqlite> + Send,
    {
        if let Some(value) = value {
            if self.assignments > 0 {
                self.query.push(", ");
            }
            self.query.push(column).push(" = ").push_bind(value);
            self.assignments += 1;
        }
        self
    }

    pub(crate) fn finish(mut self, id: i64) -> Result<QueryBuilder<'args, Sqlite>, AppError> {
        if self.assignments == 0 {
            return Err(AppError::Validation(
                "request body contains no fields to update".to_owned(),
            ));
        }
        self.query
            .push(" WHERE id = ")
            .push_bind(id)
            .push(" RETURNING *");
        Ok(self.query)
    }
}
