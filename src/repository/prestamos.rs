//! Prestamos (loans) repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use super::{is_foreign_key_violation, PrestamoStore};
use crate::{
    error::{AppError, AppResult},
    models::{NewPrestamo, Prestamo},
};

#[derive(Clone)]
pub struct PrestamosRepository {
    pool: Pool<Postgres>,
}

impl PrestamosRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }
}

fn map_missing_manga(err: sqlx::Error, manga_id: i32) -> AppError {
    if is_foreign_key_violation(&err) {
        AppError::Validation(format!("No existe el manga con ID {}", manga_id))
    } else {
        AppError::Database(err)
    }
}

#[async_trait]
impl PrestamoStore for PrestamosRepository {
    async fn list(&self) -> AppResult<Vec<Prestamo>> {
        let rows = sqlx::query_as::<_, Prestamo>("SELECT * FROM prestamos ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Prestamo>> {
        let row = sqlx::query_as::<_, Prestamo>("SELECT * FROM prestamos WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn create(&self, data: &NewPrestamo) -> AppResult<Prestamo> {
        sqlx::query_as::<_, Prestamo>(
            r#"
            INSERT INTO prestamos (nombre_cliente, fecha_prestamo, manga_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&data.nombre_cliente)
        .bind(data.fecha_prestamo)
        .bind(data.manga_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_missing_manga(e, data.manga_id))
    }

    async fn replace(&self, prestamo: &Prestamo) -> AppResult<Option<Prestamo>> {
        sqlx::query_as::<_, Prestamo>(
            r#"
            UPDATE prestamos
            SET nombre_cliente = $2, fecha_prestamo = $3, manga_id = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(prestamo.id)
        .bind(&prestamo.nombre_cliente)
        .bind(prestamo.fecha_prestamo)
        .bind(prestamo.manga_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_missing_manga(e, prestamo.manga_id))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM prestamos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn search_by_cliente(&self, nombre_cliente: &str) -> AppResult<Vec<Prestamo>> {
        let rows = sqlx::query_as::<_, Prestamo>(
            "SELECT * FROM prestamos WHERE strpos(nombre_cliente, $1) > 0 ORDER BY id",
        )
        .bind(nombre_cliente)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_by_manga(&self, manga_id: i32) -> AppResult<Vec<Prestamo>> {
        let rows = sqlx::query_as::<_, Prestamo>(
            "SELECT * FROM prestamos WHERE manga_id = $1 ORDER BY id",
        )
        .bind(manga_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn list_by_date_range(
        &self,
        inicio: DateTime<Utc>,
        fin: DateTime<Utc>,
    ) -> AppResult<Vec<Prestamo>> {
        let rows = sqlx::query_as::<_, Prestamo>(
            r#"
            SELECT * FROM prestamos
            WHERE fecha_prestamo >= $1 AND fecha_prestamo <= $2
            ORDER BY fecha_prestamo, id
            "#,
        )
        .bind(inicio)
        .bind(fin)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        let found =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM prestamos WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(found)
    }
}
