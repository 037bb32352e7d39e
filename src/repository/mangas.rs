//! Mangas repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use super::{is_foreign_key_violation, MangaStore};
use crate::{
    error::{AppError, AppResult},
    models::{CreateManga, Manga},
};

#[derive(Clone)]
pub struct MangasRepository {
    pool: Pool<Postgres>,
}

impl MangasRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MangaStore for MangasRepository {
    async fn list(&self) -> AppResult<Vec<Manga>> {
        let rows = sqlx::query_as::<_, Manga>("SELECT * FROM mangas ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Manga>> {
        let row = sqlx::query_as::<_, Manga>("SELECT * FROM mangas WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, data: &CreateManga) -> AppResult<Manga> {
        let row = sqlx::query_as::<_, Manga>(
            r#"
            INSERT INTO mangas (titulo, autor, capitulos)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&data.titulo)
        .bind(&data.autor)
        .bind(data.capitulos)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    async fn replace(&self, manga: &Manga) -> AppResult<Option<Manga>> {
        let row = sqlx::query_as::<_, Manga>(
            r#"
            UPDATE mangas
            SET titulo = $2, autor = $3, capitulos = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(manga.id)
        .bind(&manga.titulo)
        .bind(&manga.autor)
        .bind(manga.capitulos)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM mangas WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    AppError::Conflict(format!("El manga con ID {} tiene préstamos asociados", id))
                } else {
                    AppError::Database(e)
                }
            })?;
        Ok(result.rows_affected() > 0)
    }

    async fn search_by_title(&self, titulo: &str) -> AppResult<Vec<Manga>> {
        // Literal substring match; NULL titles never match
        let rows = sqlx::query_as::<_, Manga>(
            "SELECT * FROM mangas WHERE strpos(titulo, $1) > 0 ORDER BY id",
        )
        .bind(titulo)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        let found = sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM mangas WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(found)
    }
}
