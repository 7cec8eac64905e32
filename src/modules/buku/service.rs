use sqlx::PgPool;
use tracing::instrument;

use pustaka_core::AppError;
use pustaka_models::{Buku, BukuFields, BukuId};

const BUKU_COLUMNS: &str = "id, judul, penulis, tahun_terbit, deskripsi, created_at, updated_at";

fn not_found() -> AppError {
    AppError::not_found(anyhow::anyhow!("Buku not found"))
}

pub struct BukuService;

impl BukuService {
    #[instrument(skip(db))]
    pub async fn list(db: &PgPool) -> Result<Vec<Buku>, AppError> {
        let buku = sqlx::query_as::<_, Buku>(&format!(
            "SELECT {} FROM buku ORDER BY id",
            BUKU_COLUMNS
        ))
        .fetch_all(db)
        .await?;

        Ok(buku)
    }

    #[instrument(skip(db))]
    pub async fn find(db: &PgPool, id: BukuId) -> Result<Buku, AppError> {
        sqlx::query_as::<_, Buku>(&format!("SELECT {} FROM buku WHERE id = $1", BUKU_COLUMNS))
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(not_found)
    }

    #[instrument(skip(db, fields))]
    pub async fn create(db: &PgPool, fields: BukuFields) -> Result<Buku, AppError> {
        let buku = sqlx::query_as::<_, Buku>(&format!(
            "INSERT INTO buku (judul, penulis, tahun_terbit, deskripsi)
             VALUES ($1, $2, $3, $4)
             RETURNING {}",
            BUKU_COLUMNS
        ))
        .bind(&fields.judul)
        .bind(&fields.penulis)
        .bind(fields.tahun_terbit)
        .bind(&fields.deskripsi)
        .fetch_one(db)
        .await?;

        tracing::info!(buku_id = %buku.id, "Buku created");
        Ok(buku)
    }

    /// Overwrites all four fields of an existing buku.
    #[instrument(skip(db, fields))]
    pub async fn update(db: &PgPool, id: BukuId, fields: BukuFields) -> Result<Buku, AppError> {
        sqlx::query_as::<_, Buku>(&format!(
            "UPDATE buku
             SET judul = $2, penulis = $3, tahun_terbit = $4, deskripsi = $5, updated_at = NOW()
             WHERE id = $1
             RETURNING {}",
            BUKU_COLUMNS
        ))
        .bind(id)
        .bind(&fields.judul)
        .bind(&fields.penulis)
        .bind(fields.tahun_terbit)
        .bind(&fields.deskripsi)
        .fetch_optional(db)
        .await?
        .ok_or_else(not_found)
    }

    #[instrument(skip(db))]
    pub async fn delete(db: &PgPool, id: BukuId) -> Result<(), AppError> {
        sqlx::query_scalar::<_, BukuId>("DELETE FROM buku WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(db)
            .await?
            .ok_or_else(not_found)?;

        tracing::info!(buku_id = %id, "Buku deleted");
        Ok(())
    }
}
