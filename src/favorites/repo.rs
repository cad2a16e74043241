use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use super::dto::FavoriteForm;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Favorite {
    pub user_id: Uuid,
    pub recipe_id: i64,
    pub title: String,
    pub image: String,
    pub difficulty: String,
    pub ready_in_minutes: i32,
    pub servings: String,
    pub nutrition: String,
    pub instructions: String,
    pub created_at: OffsetDateTime,
}

/// Inserts a snapshot; false means the (user, recipe) pair already
/// existed and nothing changed.
pub async fn insert(db: &PgPool, user_id: Uuid, snapshot: &FavoriteForm) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO favorites (
            user_id, recipe_id, title, image, difficulty,
            ready_in_minutes, servings, nutrition, instructions
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        ON CONFLICT DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(snapshot.recipe_id)
    .bind(&snapshot.title)
    .bind(&snapshot.image)
    .bind(&snapshot.difficulty)
    .bind(snapshot.ready_in_minutes)
    .bind(&snapshot.servings)
    .bind(&snapshot.nutrition)
    .bind(&snapshot.instructions)
    .execute(db)
    .await?;
    Ok(result.rows_affected() == 1)
}

pub async fn list_by_user(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<Favorite>> {
    let rows = sqlx::query_as::<_, Favorite>(
        r#"
        SELECT user_id, recipe_id, title, image, difficulty,
               ready_in_minutes, servings, nutrition, instructions, created_at
        FROM favorites
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn remove(db: &PgPool, user_id: Uuid, recipe_id: i64) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND recipe_id = $2")
        .bind(user_id)
        .bind(recipe_id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}
