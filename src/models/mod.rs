//! Data models for Mangateca

pub mod claims;
pub mod manga;
pub mod prestamo;

// Re-export commonly used types
pub use claims::Claims;
pub use manga::{CreateManga, Manga, UpdateManga};
pub use prestamo::{CreatePrestamo, NewPrestamo, Prestamo, UpdatePrestamo};
