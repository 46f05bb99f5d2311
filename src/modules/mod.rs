//! Bioinformatics feature modules

pub mod genetic_code;
pub mod io;
pub mod seq;
pub mod translation;
