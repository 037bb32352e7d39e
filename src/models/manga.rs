//! Manga catalog model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// Manga record from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct Manga {
    /// Store-assigned identifier
    pub id: i32,
    pub titulo: Option<String>,
    pub autor: Option<String>,
    /// Number of chapters
    pub capitulos: Option<i32>,
}

/// Create manga request. Any identifier sent by the client is ignored.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct CreateManga {
    #[serde(default, alias = "titulo")]
    pub titulo: Option<String>,
    #[serde(default, alias = "autor")]
    pub autor: Option<String>,
    #[serde(default, alias = "capitulos")]
    pub capitulos: Option<i32>,
}

/// Full replacement of a manga; `Id` must match the path
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "PascalCase")]
pub struct UpdateManga {
    #[serde(default, alias = "id")]
    pub id: Option<i32>,
    #[serde(default, alias = "titulo")]
    pub titulo: Option<String>,
    #[serde(default, alias = "autor")]
    pub autor: Option<String>,
    #[serde(default, alias = "capitulos")]
    pub capitulos: Option<i32>,
}

/// Query parameters for title search
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MangaSearchQuery {
    /// Substring to look for in the title
    pub titulo: Option<String>,
}
