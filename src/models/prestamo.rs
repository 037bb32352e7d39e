//! Loan (préstamo) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// Loan model from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct Prestamo {
    pub id: i32,
    /// Name of the borrowing client
    pub nombre_cliente: String,
    pub fecha_prestamo: DateTime<Utc>,
    /// Borrowed manga
    pub manga_id: i32,
}

/// Create loan request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct CreatePrestamo {
    #[serde(alias = "nombreCliente")]
    #[validate(custom(function = "not_blank"))]
    pub nombre_cliente: String,
    /// Defaults to the current time when absent
    #[serde(default, alias = "fechaPrestamo")]
    pub fecha_prestamo: Option<DateTime<Utc>>,
    #[serde(alias = "mangaId")]
    pub manga_id: i32,
}

/// Full replacement of a loan; `Id` must match the path
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct UpdatePrestamo {
    #[serde(default, alias = "id")]
    pub id: Option<i32>,
    #[serde(alias = "nombreCliente")]
    #[validate(custom(function = "not_blank"))]
    pub nombre_cliente: String,
    #[serde(alias = "fechaPrestamo")]
    pub fecha_prestamo: DateTime<Utc>,
    #[serde(alias = "mangaId")]
    pub manga_id: i32,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some("NombreCliente es requerido".into());
        return Err(error);
    }
    Ok(())
}

/// Values written to the store when inserting a loan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPrestamo {
    pub nombre_cliente: String,
    pub fecha_prestamo: DateTime<Utc>,
    pub manga_id: i32,
}

/// Query parameters for client search
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PrestamoSearchQuery {
    /// Substring to look for in the client name
    pub cliente: Option<String>,
}

/// Query parameters for the loan date range filter (RFC 3339, both inclusive)
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DateRangeQuery {
    pub inicio: Option<DateTime<Utc>>,
    pub fin: Option<DateTime<Utc>>,
}
