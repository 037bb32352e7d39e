//! Repository layer for database operations

pub mod mangas;
#[cfg(test)]
pub mod memory;
pub mod prestamos;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::{CreateManga, Manga, NewPrestamo, Prestamo},
};

/// Access to the manga collection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MangaStore: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Manga>>;

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Manga>>;

    async fn create(&self, data: &CreateManga) -> AppResult<Manga>;

    /// Overwrite every column of the row with `manga.id`. `None` when no such row.
    async fn replace(&self, manga: &Manga) -> AppResult<Option<Manga>>;

    /// Returns `false` when nothing was deleted
    async fn delete(&self, id: i32) -> AppResult<bool>;

    async fn search_by_title(&self, titulo: &str) -> AppResult<Vec<Manga>>;

    async fn exists(&self, id: i32) -> AppResult<bool>;
}

/// Access to the loan collection
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PrestamoStore: Send + Sync {
    async fn list(&self) -> AppResult<Vec<Prestamo>>;

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Prestamo>>;

    async fn create(&self, data: &NewPrestamo) -> AppResult<Prestamo>;

    /// Overwrite every column of the row with `prestamo.id`. `None` when no such row.
    async fn replace(&self, prestamo: &Prestamo) -> AppResult<Option<Prestamo>>;

    /// Returns `false` when nothing was deleted
    async fn delete(&self, id: i32) -> AppResult<bool>;

    async fn search_by_cliente(&self, nombre_cliente: &str) -> AppResult<Vec<Prestamo>>;

    async fn list_by_manga(&self, manga_id: i32) -> AppResult<Vec<Prestamo>>;

    /// Loans dated within `[inicio, fin]`
    async fn list_by_date_range(
        &self,
        inicio: DateTime<Utc>,
        fin: DateTime<Utc>,
    ) -> AppResult<Vec<Prestamo>>;

    async fn exists(&self, id: i32) -> AppResult<bool>;
}

/// Main repository struct holding the stores
#[derive(Clone)]
pub struct Repository {
    pool: Option<Pool<Postgres>>,
    pub mangas: Arc<dyn MangaStore>,
    pub prestamos: Arc<dyn PrestamoStore>,
}

impl Repository {
    /// Create a new repository with the given database pool
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self {
            mangas: Arc::new(mangas::MangasRepository::new(pool.clone())),
            prestamos: Arc::new(prestamos::PrestamosRepository::new(pool.clone())),
            pool: Some(pool),
        }
    }

    /// Build a repository over arbitrary store implementations (no database pool)
    pub fn with_stores(mangas: Arc<dyn MangaStore>, prestamos: Arc<dyn PrestamoStore>) -> Self {
        Self {
            pool: None,
            mangas,
            prestamos,
        }
    }

    /// Round-trip to the database, if there is one
    pub async fn ping(&self) -> AppResult<()> {
        if let Some(pool) = &self.pool {
            sqlx::query("SELECT 1").execute(pool).await?;
        }
        Ok(())
    }
}

/// PostgreSQL `foreign_key_violation`
pub(crate) fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.code().as_deref() == Some("23503"),
        _ => false,
    }
}
