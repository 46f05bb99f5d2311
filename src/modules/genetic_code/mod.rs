//! Genetic code module
//!
//! Table resolution and the compiled codon lookup used by every translation path.

pub mod lookup;
pub mod tables;

/// Convenience re-exports
pub use lookup::{lookup_for, CompiledLookup};
pub use tables::{
    all_tables, resolve_table, valid_identifiers, CodonTable, Residue, CODON_COUNT, DEFAULT_TABLE,
};
