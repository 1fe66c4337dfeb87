//! Fixtures shared by the storage and handler tests.

use std::{str::FromStr, time::Duration};

use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    web::{self, Data},
    App,
};
use chrono::NaiveDateTime;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

use crate::{
    db,
    routes,
    structs::{Client, Employee, NewClient, NewEmergency, NewEmployee, NewService, NewUser},
    AppState,
};

/// A fresh in-memory database. One connection only: every SQLite
/// `:memory:` connection is its own database.
pub async fn memory_state() -> AppState {
    let opts = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let db_pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(opts)
        .await
        .unwrap();
    db::init_schema(&db_pool).await.unwrap();
    AppState {
        db_pool,
        query_timeout: Duration::from_secs(5),
    }
}

pub fn test_app(
    state: AppState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(Data::new(state))
        .configure(routes::configure)
        .default_service(web::to(routes::default_handler))
}

pub fn timestamp(raw: &str) -> NaiveDateTime {
    raw.parse().unwrap()
}

pub fn new_user(n: u32) -> NewUser {
    NewUser {
        name: format!("User {}", n),
        cpf: format!("{:011}", n),
        email: format!("user{}@example.com", n),
        birth_date: timestamp("1990-01-01T00:00:00"),
        phone: "5511999990000".to_owned(),
        postal_code: "01000000".to_owned(),
        address: format!("Rua A, {}", n),
    }
}

pub fn new_employee(user_id: i64) -> NewEmployee {
    NewEmployee {
        user_id,
        role: "technician".to_owned(),
        salary: 3200.5,
        admission_date: timestamp("2020-05-01T08:00:00"),
        resignation_date: None,
        status: "active".to_owned(),
    }
}

pub fn new_client(user_id: i64) -> NewClient {
    NewClient {
        user_id,
        client_type: "residential".to_owned(),
    }
}

pub fn new_service(employee_id: i64, client_id: i64) -> NewService {
    NewService {
        service_type: "maintenance".to_owned(),
        service_description: "Yearly inspection of the heating system".to_owned(),
        service_date: timestamp("2024-06-10T14:30:00"),
        employee_id,
        client_id,
    }
}

pub fn new_emergency(employee_id: i64, client_id: i64) -> NewEmergency {
    NewEmergency {
        emergency_type: "power outage".to_owned(),
        emergency_description: "No power in the whole building".to_owned(),
        emergency_date: timestamp("2024-07-02T03:15:00"),
        employee_id,
        client_id,
    }
}

/// One employee and one client, each backed by its own user.
pub async fn seed_parties(state: &AppState) -> (Employee, Client) {
    let worker = db::create_user(state, new_user(1001)).await.unwrap();
    let customer = db::create_user(state, new_user(1002)).await.unwrap();
    let employee = db::create_employee(state, new_employee(worker.id))
        .await
        .unwrap();
    let client = db::create_client(state, new_client(customer.id))
        .await
        .unwrap();
    (employee, client)
}
