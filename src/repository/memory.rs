//! In-memory stores used by unit tests

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::{MangaStore, PrestamoStore};
use crate::{
    error::{AppError, AppResult},
    models::{CreateManga, Manga, NewPrestamo, Prestamo},
};

#[derive(Default)]
struct Tables {
    mangas: Vec<Manga>,
    prestamos: Vec<Prestamo>,
    next_manga_id: i32,
    next_prestamo_id: i32,
}

/// Both collections behind one lock so the loan → manga reference can be enforced
#[derive(Default)]
pub struct InMemoryStore {
    tables: Mutex<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MangaStore for InMemoryStore {
    async fn list(&self) -> AppResult<Vec<Manga>> {
        Ok(self.tables.lock().unwrap().mangas.clone())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Manga>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.mangas.iter().find(|m| m.id == id).cloned())
    }

    async fn create(&self, data: &CreateManga) -> AppResult<Manga> {
        let mut tables = self.tables.lock().unwrap();
        tables.next_manga_id += 1;
        let manga = Manga {
            id: tables.next_manga_id,
            titulo: data.titulo.clone(),
            autor: data.autor.clone(),
            capitulos: data.capitulos,
        };
        tables.mangas.push(manga.clone());
        Ok(manga)
    }

    async fn replace(&self, manga: &Manga) -> AppResult<Option<Manga>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.mangas.iter_mut().find(|m| m.id == manga.id).map(|slot| {
            *slot = manga.clone();
            slot.clone()
        }))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        if tables.prestamos.iter().any(|p| p.manga_id == id) {
            return Err(AppError::Conflict(format!(
                "El manga con ID {} tiene préstamos asociados",
                id
            )));
        }
        let before = tables.mangas.len();
        tables.mangas.retain(|m| m.id != id);
        Ok(tables.mangas.len() < before)
    }

    async fn search_by_title(&self, titulo: &str) -> AppResult<Vec<Manga>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .mangas
            .iter()
            .filter(|m| m.titulo.as_deref().is_some_and(|t| t.contains(titulo)))
            .cloned()
            .collect())
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        Ok(self.tables.lock().unwrap().mangas.iter().any(|m| m.id == id))
    }
}

#[async_trait]
impl PrestamoStore for InMemoryStore {
    async fn list(&self) -> AppResult<Vec<Prestamo>> {
        Ok(self.tables.lock().unwrap().prestamos.clone())
    }

    async fn get_by_id(&self, id: i32) -> AppResult<Option<Prestamo>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.prestamos.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, data: &NewPrestamo) -> AppResult<Prestamo> {
        let mut tables = self.tables.lock().unwrap();
        tables.next_prestamo_id += 1;
        let prestamo = Prestamo {
            id: tables.next_prestamo_id,
            nombre_cliente: data.nombre_cliente.clone(),
            fecha_prestamo: data.fecha_prestamo,
            manga_id: data.manga_id,
        };
        tables.prestamos.push(prestamo.clone());
        Ok(prestamo)
    }

    async fn replace(&self, prestamo: &Prestamo) -> AppResult<Option<Prestamo>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables
            .prestamos
            .iter_mut()
            .find(|p| p.id == prestamo.id)
            .map(|slot| {
                *slot = prestamo.clone();
                slot.clone()
            }))
    }

    async fn delete(&self, id: i32) -> AppResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.prestamos.len();
        tables.prestamos.retain(|p| p.id != id);
        Ok(tables.prestamos.len() < before)
    }

    async fn search_by_cliente(&self, nombre_cliente: &str) -> AppResult<Vec<Prestamo>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .prestamos
            .iter()
            .filter(|p| p.nombre_cliente.contains(nombre_cliente))
            .cloned()
            .collect())
    }

    async fn list_by_manga(&self, manga_id: i32) -> AppResult<Vec<Prestamo>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .prestamos
            .iter()
            .filter(|p| p.manga_id == manga_id)
            .cloned()
            .collect())
    }

    async fn list_by_date_range(
        &self,
        inicio: DateTime<Utc>,
        fin: DateTime<Utc>,
    ) -> AppResult<Vec<Prestamo>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .prestamos
            .iter()
            .filter(|p| p.fecha_prestamo >= inicio && p.fecha_prestamo <= fin)
            .cloned()
            .collect())
    }

    async fn exists(&self, id: i32) -> AppResult<bool> {
        Ok(self.tables.lock().unwrap().prestamos.iter().any(|p| p.id == id))
    }
}
