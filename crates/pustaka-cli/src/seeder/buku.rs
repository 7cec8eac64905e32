//! Buku seeding functionality.
//!
//! Provides the buku factory and functions for inserting generated rows into
//! the database.

use chrono::{Datelike, Utc};
use fake::Fake;
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::faker::name::en::Name;
use pustaka_models::Buku;
use rayon::prelude::*;
use sqlx::{PgPool, Postgres, Transaction};
use std::time::Instant;

use super::models::BukuSeed;

/// Earliest publication year the factory generates.
pub const EARLIEST_YEAR: i32 = 1950;

/// Generates a single buku with a sentence title, a person's name as author,
/// a publication year between 1950 and the current year, and a paragraph of
/// description.
pub fn generate_one() -> BukuSeed {
    let current_year = Utc::now().year();
    let judul: String = Sentence(3..7).fake();

    BukuSeed {
        judul: judul.trim_end_matches('.').to_string(),
        penulis: Name().fake(),
        tahun_terbit: (EARLIEST_YEAR..=current_year).fake(),
        deskripsi: Paragraph(2..4).fake(),
    }
}

/// Generates buku data in parallel using Rayon
pub fn generate_buku(count: usize) -> Vec<BukuSeed> {
    (0..count).into_par_iter().map(|_| generate_one()).collect()
}

/// Seeds buku into the database
pub async fn seed_buku(db: &PgPool, count: usize) -> Result<Vec<Buku>, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("📚 Seeding {} buku...", count);

    let seeds = generate_buku(count);
    let buku = insert_buku_batch(db, &seeds).await?;

    println!(
        "   ✓ Inserted {} buku in {:?}",
        buku.len(),
        start_time.elapsed()
    );

    Ok(buku)
}

/// Inserts buku in batches using multi-value INSERT statements
pub async fn insert_buku_batch(
    db: &PgPool,
    seeds: &[BukuSeed],
) -> Result<Vec<Buku>, Box<dyn std::error::Error>> {
    let mut tx = db.begin().await?;

    // 4 params per row
    const BATCH_SIZE: usize = 1000;
    let mut all = Vec::with_capacity(seeds.len());

    for chunk in seeds.chunks(BATCH_SIZE) {
        all.extend(insert_buku_chunk(&mut tx, chunk).await?);
    }

    tx.commit().await?;
    Ok(all)
}

async fn insert_buku_chunk(
    tx: &mut Transaction<'_, Postgres>,
    seeds: &[BukuSeed],
) -> Result<Vec<Buku>, Box<dyn std::error::Error>> {
    if seeds.is_empty() {
        return Ok(Vec::new());
    }

    let mut query = String::from("INSERT INTO buku (judul, penulis, tahun_terbit, deskripsi) VALUES ");

    for i in 0..seeds.len() {
        if i > 0 {
            query.push_str(", ");
        }
        let param_idx = i * 4;
        query.push_str(&format!(
            "(${}, ${}, ${}, ${})",
            param_idx + 1,
            param_idx + 2,
            param_idx + 3,
            param_idx + 4
        ));
    }

    query.push_str(
        " RETURNING id, judul, penulis, tahun_terbit, deskripsi, created_at, updated_at",
    );

    let mut q = sqlx::query_as::<_, Buku>(&query);
    for seed in seeds {
        q = q
            .bind(&seed.judul)
            .bind(&seed.penulis)
            .bind(seed.tahun_terbit)
            .bind(&seed.deskripsi);
    }

    let mut rows = q.fetch_all(&mut **tx).await?;
    rows.sort_by_key(|buku| buku.id);
    Ok(rows)
}

/// Clears all buku from the database
pub async fn clear_buku(db: &PgPool) -> Result<u64, Box<dyn std::error::Error>> {
    let start_time = Instant::now();
    println!("🗑️  Clearing buku...");

    let result = sqlx::query("DELETE FROM buku")
        .execute(db)
        .await?
        .rows_affected();

    println!(
        "   ✓ Deleted {} buku in {:?}",
        result,
        start_time.elapsed()
    );

    Ok(result)
}
