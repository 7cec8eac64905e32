pub mod auth;
pub mod buku;
