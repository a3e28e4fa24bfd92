//! Administrative operations that have no HTTP surface.
//!
//! Roles are only ever changed through the admin endpoints, which in turn
//! need an admin. [`set_role`] breaks that loop for the first account.

use onlearn_models::{Category, Profile, Role};
use sqlx::PgPool;
use uuid::Uuid;

/// Categories inserted by `seed-categories` when no names are given.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Programación",
    "Diseño",
    "Marketing",
    "Negocios",
    "Idiomas",
    "Música",
];

/// Set the role of an existing profile. Returns `None` when no profile has
/// that id.
pub async fn set_role(pool: &PgPool, user_id: Uuid, role: Role) -> sqlx::Result<Option<Profile>> {
    sqlx::query_as::<_, Profile>(
        r#"UPDATE profiles SET role = $2
           WHERE id = $1
           RETURNING id, full_name, email, role, created_at"#,
    )
    .bind(user_id)
    .bind(role)
    .fetch_optional(pool)
    .await
}

pub async fn find_profile(pool: &PgPool, user_id: Uuid) -> sqlx::Result<Option<Profile>> {
    sqlx::query_as::<_, Profile>(
        "SELECT id, full_name, email, role, created_at FROM profiles WHERE id = $1",
    )
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Insert the given category names, skipping ones that already exist.
/// Returns only the rows that were created.
pub async fn seed_categories(pool: &PgPool, names: &[String]) -> sqlx::Result<Vec<Category>> {
    let mut created = Vec::new();
    let mut tx = pool.begin().await?;

    for name in names {
        let name = name.trim();
        if name.is_empty() {
            continue;
        }

        let row = sqlx::query_as::<_, Category>(
            r#"INSERT INTO course_categories (name) VALUES ($1)
               ON CONFLICT (name) DO NOTHING
               RETURNING id, name"#,
        )
        .bind(name)
        .fetch_optional(&mut *tx)
        .await?;

        if let Some(category) = row {
            created.push(category);
        }
    }

    tx.commit().await?;
    Ok(created)
}

/// Names to seed: the arguments when present, the defaults otherwise.
pub fn category_names(args: Vec<String>) -> Vec<String> {
    if args.is_empty() {
        DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect()
    } else {
        args
    }
}
