//! Employee Repository

use super::{RepoError, RepoResult};
use crate::db::models::{Employee, EmployeeCreate, EmployeeUpdate, ProfileUpdate};
use sqlx::SqlitePool;

const COLUMNS: &str = "id, email, hash_pass, first_name, last_name, department, position, role, leave_balance, is_active, created_at, updated_at";

/// Find all active employees
pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Employee>> {
    let employees = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM employee WHERE is_active = 1 ORDER BY email"
    ))
    .fetch_all(pool)
    .await?;
    Ok(employees)
}

/// Find all employees including inactive
pub async fn find_all_with_inactive(pool: &SqlitePool) -> RepoResult<Vec<Employee>> {
    let employees = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM employee ORDER BY email"
    ))
    .fetch_all(pool)
    .await?;
    Ok(employees)
}

/// Find employee by id
pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Employee>> {
    let emp = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM employee WHERE id = ?"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(emp)
}

/// Find employee by email
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> RepoResult<Option<Employee>> {
    let emp = sqlx::query_as::<_, Employee>(&format!(
        "SELECT {COLUMNS} FROM employee WHERE email = ? LIMIT 1"
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;
    Ok(emp)
}

/// Whether any active admin account exists (used by startup seeding)
pub async fn admin_exists(pool: &SqlitePool) -> RepoResult<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM employee WHERE role = 'admin' AND is_active = 1",
    )
    .fetch_one(pool)
    .await?;
    Ok(count > 0)
}

/// Create a new employee
pub async fn create(pool: &SqlitePool, data: EmployeeCreate, now: i64) -> RepoResult<Employee> {
    // Check duplicate email first for a friendly error; the UNIQUE
    // constraint still backstops concurrent creates.
    if find_by_email(pool, &data.email).await?.is_some() {
        return Err(RepoError::Duplicate(format!(
            "Email '{}' already exists",
            data.email
        )));
    }

    let hash_pass = Employee::hash_password(&data.password)
        .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?;

    let id: i64 = sqlx::query_scalar(
        r#"INSERT INTO employee
            (email, hash_pass, first_name, last_name, department, position, role, leave_balance, is_active, created_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, 1, ?9, ?9)
           RETURNING id"#,
    )
    .bind(&data.email)
    .bind(&hash_pass)
    .bind(&data.first_name)
    .bind(&data.last_name)
    .bind(data.department.unwrap_or_default())
    .bind(data.position.unwrap_or_default())
    .bind(data.role)
    .bind(data.leave_balance.unwrap_or(20))
    .bind(now)
    .fetch_one(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create employee".to_string()))
}

/// Update an employee (administrative update, any field)
pub async fn update(
    pool: &SqlitePool,
    id: i64,
    data: EmployeeUpdate,
    now: i64,
) -> RepoResult<Employee> {
    let existing = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))?;

    // Check duplicate email if changing
    if let Some(ref new_email) = data.email {
        if new_email != &existing.email && find_by_email(pool, new_email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Email '{}' already exists",
                new_email
            )));
        }
    }

    let hash_pass = match data.password {
        Some(ref password) => Some(
            Employee::hash_password(password)
                .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?,
        ),
        None => None,
    };

    sqlx::query(
        r#"UPDATE employee SET
            email = COALESCE(?1, email),
            hash_pass = COALESCE(?2, hash_pass),
            first_name = COALESCE(?3, first_name),
            last_name = COALESCE(?4, last_name),
            department = COALESCE(?5, department),
            position = COALESCE(?6, position),
            role = COALESCE(?7, role),
            leave_balance = COALESCE(?8, leave_balance),
            is_active = COALESCE(?9, is_active),
            updated_at = ?10
           WHERE id = ?11"#,
    )
    .bind(data.email)
    .bind(hash_pass)
    .bind(data.first_name)
    .bind(data.last_name)
    .bind(data.department)
    .bind(data.position)
    .bind(data.role)
    .bind(data.leave_balance)
    .bind(data.is_active)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))
}

/// Update the caller's own profile (restricted field set)
pub async fn update_profile(
    pool: &SqlitePool,
    id: i64,
    data: ProfileUpdate,
    now: i64,
) -> RepoResult<Employee> {
    let hash_pass = match data.password {
        Some(ref password) => Some(
            Employee::hash_password(password)
                .map_err(|e| RepoError::Database(format!("Failed to hash password: {}", e)))?,
        ),
        None => None,
    };

    let rows = sqlx::query(
        r#"UPDATE employee SET
            first_name = COALESCE(?1, first_name),
            last_name = COALESCE(?2, last_name),
            hash_pass = COALESCE(?3, hash_pass),
            updated_at = ?4
           WHERE id = ?5"#,
    )
    .bind(data.first_name)
    .bind(data.last_name)
    .bind(hash_pass)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Employee {} not found", id)));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Employee {} not found", id)))
}

/// Hard delete an employee; attendance and leave records cascade
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM employee WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Employee {} not found", id)));
    }
    Ok(true)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db::models::Role;
    use sqlx::sqlite::SqlitePoolOptions;

    /// In-memory SQLite pool with the full schema applied.
    pub(crate) async fn test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        sqlx::query("PRAGMA foreign_keys = ON;")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::migrate!("./migrations").run(&pool).await.unwrap();
        pool
    }

    pub(crate) fn sample_create(email: &str, role: Role) -> EmployeeCreate {
        EmployeeCreate {
            email: email.to_string(),
            password: "hunter22secret".to_string(),
            first_name: "Alice".to_string(),
            last_name: "Nguyen".to_string(),
            department: Some("Engineering".to_string()),
            position: Some("Developer".to_string()),
            role,
            leave_balance: None,
        }
    }

    #[tokio::test]
    async fn create_defaults_and_duplicate_email() {
        let pool = test_pool().await;

        let e = create(&pool, sample_create("alice@example.com", Role::Employee), 1000)
            .await
            .unwrap();
        assert_eq!(e.leave_balance, 20);
        assert!(e.is_active);
        assert_eq!(e.role, Role::Employee);
        assert!(e.hash_pass.starts_with("$argon2"));

        let dup = create(&pool, sample_create("alice@example.com", Role::Admin), 2000).await;
        assert!(matches!(dup, Err(RepoError::Duplicate(_))));
    }

    #[tokio::test]
    async fn admin_update_can_change_role_and_balance() {
        let pool = test_pool().await;
        let e = create(&pool, sample_create("bob@example.com", Role::Employee), 1000)
            .await
            .unwrap();

        let updated = update(
            &pool,
            e.id,
            EmployeeUpdate {
                email: None,
                password: None,
                first_name: None,
                last_name: None,
                department: Some("Operations".to_string()),
                position: None,
                role: Some(Role::Admin),
                leave_balance: Some(15),
                is_active: None,
            },
            2000,
        )
        .await
        .unwrap();

        assert_eq!(updated.role, Role::Admin);
        assert_eq!(updated.leave_balance, 15);
        assert_eq!(updated.department, "Operations");
        assert_eq!(updated.first_name, "Alice");
        assert_eq!(updated.updated_at, 2000);
    }

    #[tokio::test]
    async fn profile_update_changes_only_own_fields() {
        let pool = test_pool().await;
        let e = create(&pool, sample_create("carol@example.com", Role::Employee), 1000)
            .await
            .unwrap();

        let updated = update_profile(
            &pool,
            e.id,
            ProfileUpdate {
                first_name: Some("Caroline".to_string()),
                last_name: None,
                password: Some("new-password-1".to_string()),
            },
            2000,
        )
        .await
        .unwrap();

        assert_eq!(updated.first_name, "Caroline");
        assert_eq!(updated.role, Role::Employee);
        assert!(updated.verify_password("new-password-1").unwrap());
        assert!(!updated.verify_password("hunter22secret").unwrap());
    }

    #[tokio::test]
    async fn delete_cascades_owned_records() {
        let pool = test_pool().await;
        let e = create(&pool, sample_create("dave@example.com", Role::Employee), 1000)
            .await
            .unwrap();

        crate::db::repository::attendance::check_in(&pool, e.id, "2024-03-11", 5000)
            .await
            .unwrap();

        delete(&pool, e.id).await.unwrap();

        let left: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM attendance_record WHERE employee_id = ?")
                .bind(e.id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(left, 0);

        assert!(matches!(
            delete(&pool, e.id).await,
            Err(RepoError::NotFound(_))
        ));
    }
}
