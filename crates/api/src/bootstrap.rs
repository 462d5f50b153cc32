//! First-run setup performed by the binary before it starts serving.

use catalog_db::models::user::CreateUser;
use catalog_db::repositories::UserRepo;
use catalog_db::DbPool;

use crate::auth::password::hash_password;
use crate::config::AdminBootstrap;

/// Create the initial user when the `users` table is empty.
///
/// Returns `true` when a user was created. Does nothing once any user exists,
/// so changing the environment later never overwrites a password.
pub async fn ensure_admin_user(pool: &DbPool, admin: &AdminBootstrap) -> anyhow::Result<bool> {
    if UserRepo::count(pool).await? > 0 {
        return Ok(false);
    }

    let password_hash = hash_password(&admin.password)
        .map_err(|e| anyhow::anyhow!("Failed to hash bootstrap password: {e}"))?;
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: admin.username.clone(),
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, username = %user.username, "Bootstrap user created");
    Ok(true)
}
