//! Manga catalog service

use crate::{
    error::{AppError, AppResult},
    models::{CreateManga, Manga},
    repository::Repository,
};

#[derive(Clone)]
pub struct MangasService {
    repository: Repository,
}

impl MangasService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self) -> AppResult<Vec<Manga>> {
        self.repository.mangas.list().await
    }

    /// Absence is not an error
    pub async fn get_by_id(&self, id: i32) -> AppResult<Option<Manga>> {
        self.repository.mangas.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateManga) -> AppResult<Manga> {
        let manga = self.repository.mangas.create(data).await?;
        tracing::info!(manga_id = manga.id, "Manga created");
        Ok(manga)
    }

    /// Replace the whole record identified by `manga.id`
    pub async fn update(&self, manga: &Manga) -> AppResult<Manga> {
        let updated = self
            .repository
            .mangas
            .replace(manga)
            .await?
            .ok_or_else(|| not_found(manga.id))?;
        tracing::info!(manga_id = updated.id, "Manga updated");
        Ok(updated)
    }

    /// Deleting an unknown id is a no-op; returns whether a record was removed
    pub async fn delete(&self, id: i32) -> AppResult<bool> {
        let deleted = self.repository.mangas.delete(id).await?;
        if deleted {
            tracing::info!(manga_id = id, "Manga deleted");
        }
        Ok(deleted)
    }

    pub async fn search_by_title(&self, titulo: &str) -> AppResult<Vec<Manga>> {
        self.repository.mangas.search_by_title(titulo).await
    }

    pub async fn exists(&self, id: i32) -> AppResult<bool> {
        self.repository.mangas.exists(id).await
    }
}

pub fn not_found(id: i32) -> AppError {
    AppError::NotFound(format!("No se encontró el manga con ID {}", id))
}
