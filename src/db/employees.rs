use crate::{
    errors::AppError,
    structs::{Employee, EmployeeChanges, NewEmployee},
    AppState,
};

use super::{bounded, UpdateQuery};

pub async fn get_all_employees(state: &AppState) -> Result<Vec<Employee>, AppError> {
    let pool = &state.db_pool;
    let employees = bounded(
        state,
        sqlx::query_as::<_, Employee>("SELECT * FROM employees ORDER BY id").fetch_all(pool),
    )
    .await?;
    Ok(employees)
}

pub async fn get_employee_by_id(state: &AppState, id: i64) -> Result<Employee, AppError> {
    let pool = &state.db_pool;
    bounded(
        state,
        sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE id = $1")
            .bind(id)
            .fetch_optional(pool),
    )
    .await?
    .ok_or(AppError::NotFound("employee"))
}

pub async fn create_employee(
    state: &AppState,
    employee: NewEmployee,
) -> Result<Employee, AppError> {
    let pool = &state.db_pool;
    let employee = bounded(
        state,
        sqlx::query_as::<_, Employee>(
            "INSERT INTO employees (user_id, role, salary, admission_date, resignation_date, status) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(employee.user_id)
        .bind(employee.role)
        .bind(employee.salary)
        .bind(employee.admission_date)
        .bind(employee.resignation_date)
        .bind(employee.status)
        .fetch_one(pool),
    )
    .await?;
    log::info!(
        "Employee created with id {} for user {}",
        employee.id,
        employee.user_id
    );
    Ok(employee)
}

pub async fn update_employee(
    state: &AppState,
    id: i64,
    changes: EmployeeChanges,
) -> Result<Employee, AppError> {
    let mut update = UpdateQuery::new("employees");
    update
        .set("user_id", changes.user_id)
        .set("role", changes.role)
        .set("salary", changes.salary)
        .set("admission_date", changes.admission_date)
        .set("resignation_date", changes.resignation_date)
        .set("status", changes.status);
    let mut query = update.finish(id)?;

    let employee = bounded(
        state,
        query
            .build_query_as::<Employee>()
            .fetch_optional(&state.db_pool),
    )
    .await?
    .ok_or(AppError::NotFound("employee"))?;
    log::info!("Employee with id {} updated", employee.id);
    Ok(employee)
}

pub async fn delete_employee(state: &AppState, id: i64) -> Result<(), AppError> {
    let pool = &state.db_pool;
    let result = bounded(
        state,
        sqlx::query("DELETE FROM employees WHERE id = $1")
            .bind(id)
            .execute(pool),
    )
    .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("employee"));
    }
    log::info!("Employee with id {} deleted", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{create_user, delete_user, get_user_by_id},
        test_support::{memory_state, new_employee, new_user},
    };

    #[actix_web::test]
    async fn employee_requires_existing_user() {
        let state = memory_state().await;
        let err = create_employee(&state, new_employee(99)).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(get_all_employees(&state).await.unwrap().is_empty());
    }

    #[actix_web::test]
    async fn one_employee_record_per_user() {
        let state = memory_state().await;
        let user = create_user(&state, new_user(1)).await.unwrap();
        create_employee(&state, new_employee(user.id)).await.unwrap();
        let err = create_employee(&state, new_employee(user.id))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "userId already in use");
    }

    #[actix_web::test]
    async fn user_with_employee_cannot_be_deleted() {
        let state = memory_state().await;
        let user = create_user(&state, new_user(1)).await.unwrap();
        let employee = create_employee(&state, new_employee(user.id)).await.unwrap();

        let err = delete_user(&state, user.id).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert!(get_user_by_id(&state, user.id).await.is_ok());

        delete_employee(&state, employee.id).await.unwrap();
        delete_user(&state, user.id).await.unwrap();
    }

    #[actix_web::test]
    async fn resignation_can_be_recorded() {
        let state = memory_state().await;
        let user = create_user(&state, new_user(1)).await.unwrap();
        let employee = create_employee(&state, new_employee(user.id)).await.unwrap();
        assert_eq!(employee.resignation_date, None);

        let resigned = "2024-03-01T00:00:00".parse().unwrap();
        let changes = EmployeeChanges {
            resignation_date: Some(Some(resigned)),
            status: Some("resigned".into()),
            ..EmployeeChanges::default()
        };
        let updated = update_employee(&state, employee.id, changes).await.unwrap();
        assert_eq!(updated.resignation_date, Some(resigned));
        assert_eq!(updated.status, "resigned");
        assert_eq!(updated.salary, employee.salary);
        assert_eq!(get_employee_by_id(&state, employee.id).await.unwrap(), updated);
    }

    #[actix_web::test]
    async fn resignation_before_stored_admission_is_rejected() {
        let state = memory_state().await;
        let user = create_user(&state, new_user(1)).await.unwrap();
        let employee = create_employee(&state, new_employee(user.id)).await.unwrap();

        let changes = EmployeeChanges {
            resignation_date: Some(Some("2001-01-01T00:00:00".parse().unwrap())),
            ..EmployeeChanges::default()
        };
        let err = update_employee(&state, employee.id, changes).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.to_string(), "resignationDate must not precede admissionDate");
        assert_eq!(get_employee_by_id(&state, employee.id).await.unwrap(), employee);

        let resigned = EmployeeChanges {
            resignation_date: Some(Some("2024-03-01T00:00:00".parse().unwrap())),
            ..EmployeeChanges::default()
        };
        let resigned = update_employee(&state, employee.id, resigned).await.unwrap();

        let changes = EmployeeChanges {
            admission_date: Some("2030-01-01T00:00:00".parse().unwrap()),
            ..EmployeeChanges::default()
        };
        let err = update_employee(&state, employee.id, changes).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(get_employee_by_id(&state, employee.id).await.unwrap(), resigned);
    }

    #[actix_web::test]
    async fn resignation_can_be_cleared() {
        let state = memory_state().await;
        let user = create_user(&state, new_user(1)).await.unwrap();
        let mut employee = new_employee(user.id);
        employee.resignation_date = Some("2024-03-01T00:00:00".parse().unwrap());
        let employee = create_employee(&state, employee).await.unwrap();

        let changes = EmployeeChanges {
            status: Some("active".into()),
            ..EmployeeChanges::default()
        };
        let updated = update_employee(&state, employee.id, changes).await.unwrap();
        assert_eq!(updated.resignation_date, employee.resignation_date);

        let changes = EmployeeChanges {
            resignation_date: Some(None),
            ..EmployeeChanges::default()
        };
        let rehired = update_employee(&state, employee.id, changes).await.unwrap();
        assert_eq!(rehired.resignation_date, None);
        assert_eq!(rehired.status, "active");
    }
}
