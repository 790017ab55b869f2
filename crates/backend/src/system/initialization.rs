use anyhow::Result;

/// Создать администратора `admin/admin`, если пользователей ещё нет
pub async fn ensure_admin_user_exists() -> Result<()> {
    use crate::system::users::{repository, service};
    use contracts::system::users::CreateUserDto;

    if repository::count_users().await? > 0 {
        return Ok(());
    }

    tracing::info!("No users found. Creating default admin user...");
    let admin_id = service::create(CreateUserDto {
        username: "admin".to_string(),
        password: "admin".to_string(),
        full_name: Some("Quản trị viên".to_string()),
        is_admin: true,
    })
    .await?;

    tracing::warn!("Default admin user created (admin/admin), id {}", admin_id);
    tracing::warn!("Change the default password before going to production");
    Ok(())
}

/// Демонстрационные данные для пустой БД (`[seed] demo_data`)
pub async fn seed_demo_data() -> Result<()> {
    use crate::domain::{a001_warehouse, a002_warehouse_transfer, a003_export_request};

    if a001_warehouse::repository::count().await? > 0 {
        return Ok(());
    }
    tracing::info!("Empty database, inserting demo data...");

    let warehouses = a001_warehouse::service::insert_test_data()
        .await
        .map_err(|e| anyhow::anyhow!("seed warehouses: {}", e))?;
    a002_warehouse_transfer::service::insert_test_data(&warehouses)
        .await
        .map_err(|e| anyhow::anyhow!("seed transfers: {}", e))?;
    a003_export_request::service::insert_test_data(&warehouses)
        .await
        .map_err(|e| anyhow::anyhow!("seed export requests: {}", e))?;

    tracing::info!("Demo data inserted: {} warehouses", warehouses.len());
    Ok(())
}
