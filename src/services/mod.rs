//! Business logic services

pub mod mangas;
pub mod prestamos;

use crate::repository::Repository;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub mangas: mangas::MangasService,
    pub prestamos: prestamos::PrestamosService,
    repository: Repository,
}

impl Services {
    /// Create all services with the given repository
    pub fn new(repository: Repository) -> Self {
        let mangas = mangas::MangasService::new(repository.clone());
        Self {
            prestamos: prestamos::PrestamosService::new(repository.clone(), mangas.clone()),
            mangas,
            repository,
        }
    }

    /// Check that the backing store answers
    pub async fn ping(&self) -> crate::error::AppResult<()> {
        self.repository.ping().await
    }
}
