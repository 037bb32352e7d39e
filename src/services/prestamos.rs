//! Loan (préstamo) service

use chrono::{DateTime, Utc};

use super::mangas::MangasService;
use crate::{
    error::{AppError, AppResult},
    models::{CreatePrestamo, NewPrestamo, Prestamo},
    repository::Repository,
};

#[derive(Clone)]
pub struct PrestamosService {
    repository: Repository,
    mangas: MangasService,
}

impl PrestamosService {
    pub fn new(repository: Repository, mangas: MangasService) -> Self {
        Self { repository, mangas }
    }

    pub async fn list(&self) -> AppResult<Vec<Prestamo>> {
        self.repository.prestamos.list().await
    }

    /// Absence is not an error
    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Prestamo>> {
        self.repository.prestamos.get_by_id(id).await
    }

    /// Create a loan, stamping the current time when no date is given
    pub async fn create(&self, data: &CreatePrestamo) -> AppResult<Prestamo> {
        self.ensure_manga_exists(data.manga_id).await?;

        let record = NewPrestamo {
            nombre_cliente: data.nombre_cliente.clone(),
            fecha_prestamo: data.fecha_prestamo.unwrap_or_else(Utc::now),
            manga_id: data.manga_id,
        };
        let prestamo = self.repository.prestamos.create(&record).await?;
        tracing::info!(prestamo_id = prestamo.id, manga_id = prestamo.manga_id, "Loan created");
        Ok(prestamo)
    }

    /// Replace the whole record identified by `prestamo.id`
    pub async fn update(&self, prestamo: &Prestamo) -> AppResult<Prestamo> {
        if !self.exists(prestamo.id).await? {
            return Err(not_found(prestamo.id));
        }
        self.ensure_manga_exists(prestamo.manga_id).await?;

        let updated = self
            .repository
            .prestamos
            .replace(prestamo)
            .await?
            .ok_or_else(|| not_found(prestamo.id))?;
        tracing::info!(prestamo_id = updated.id, "Loan updated");
        Ok(updated)
    }

    /// Deleting an unknown id is a no-op; returns whether a record was removed
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let deleted = self.repository.prestamos.delete(id).await?;
        if deleted {
            tracing::info!(prestamo_id = id, "Loan deleted");
        }
        Ok(deleted)
    }

    pub async fn search_by_cliente(&self, nombre_cliente: &str) -> AppResult<Vec<Prestamo>> {
        self.repository.prestamos.search_by_cliente(nombre_cliente).await
    }

    /// No check that the manga exists; unknown ids give an empty list
    pub async fn list_by_manga(&self, manga_id: i32) -> AppResult<Vec<Prestamo>> {
        self.repository.prestamos.list_by_manga(manga_id).await
    }

    /// Both bounds inclusive. An inverted range is not an error, it matches nothing.
    pub async fn list_by_date_range(
        &self,
        inicio: DateTime<Utc>,
        fin: DateTime<Utc>,
    ) -> AppResult<Vec<Prestamo>> {
        if inicio > fin {
            return Ok(Vec::new());
        }
        self.repository.prestamos.list_by_date_range(inicio, fin).await
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        self.repository.prestamos.exists(id).await
    }

    async fn ensure_manga_exists(&self, manga_id: i32) -> AppResult<()> {
        if self.mangas.exists(manga_id).await? {
            Ok(())
        } else {
            Err(AppError::Validation(format!("No existe el manga con ID {}", manga_id)))
        }
    }
}

pub fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("No se encontró el préstamo con ID {}", id))
}
