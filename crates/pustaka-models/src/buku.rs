//! Buku (book) domain models and DTOs.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::ValidationErrors;

use pustaka_core::validation::{as_i32, collect, required_integer, required_string};

use crate::ids::BukuId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Buku {
    pub id: BukuId,
    #[schema(example = "Laskar Pelangi")]
    pub judul: String,
    #[schema(example = "Andrea Hirata")]
    pub penulis: String,
    #[schema(example = 2005)]
    pub tahun_terbit: i32,
    pub deskripsi: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Payload for creating or replacing a buku.
///
/// Fields are kept as raw JSON so that a wrongly-typed value is reported
/// alongside every other invalid field instead of failing deserialization.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct BukuRequest {
    #[schema(value_type = String, example = "Laskar Pelangi")]
    pub judul: Option<Value>,
    #[schema(value_type = String, example = "Andrea Hirata")]
    pub penulis: Option<Value>,
    #[schema(value_type = i32, example = 2005)]
    pub tahun_terbit: Option<Value>,
    #[schema(value_type = String, example = "Kisah sepuluh anak di Belitung.")]
    pub deskripsi: Option<Value>,
}

/// Checked buku fields, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BukuFields {
    pub judul: String,
    pub penulis: String,
    pub tahun_terbit: i32,
    pub deskripsi: String,
}

impl BukuRequest {
    /// Validates every field and returns all failures at once.
    pub fn into_fields(self) -> Result<BukuFields, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let judul = collect(
            &mut errors,
            "judul",
            required_string("judul", self.judul.as_ref()),
        );
        let penulis = collect(
            &mut errors,
            "penulis",
            required_string("penulis", self.penulis.as_ref()),
        );
        let tahun_terbit = collect(
            &mut errors,
            "tahun_terbit",
            required_integer("tahun_terbit", self.tahun_terbit.as_ref())
                .and_then(|year| as_i32("tahun_terbit", year)),
        );
        let deskripsi = collect(
            &mut errors,
            "deskripsi",
            required_string("deskripsi", self.deskripsi.as_ref()),
        );

        match (judul, penulis, tahun_terbit, deskripsi) {
            (Some(judul), Some(penulis), Some(tahun_terbit), Some(deskripsi)) => Ok(BukuFields {
                judul,
                penulis,
                tahun_terbit,
                deskripsi,
            }),
            _ => Err(errors),
        }
    }
}
