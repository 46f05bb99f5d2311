//! Compiled codon lookup
//!
//! A `CodonTable` only knows the uppercase RNA spelling of its codons. The
//! compiled lookup adds the DNA spelling of every codon and stores both in a
//! flat array indexed by base, so the hot translation loop never hashes.
//! Compile once per table and share the result; `lookup_for` does this
//! through a process-wide cache.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::RwLock;

use super::tables::{resolve_table, CodonTable, Residue};
use crate::engines::compute::string_ops;
use crate::engines::EngineResult;

/// Symbols a codon position may hold: A, C, G, T, U
const SYMBOLS: usize = 5;

/// Slots in the flat lookup, one per (b1, b2, b3) symbol triple
const SLOTS: usize = SYMBOLS * SYMBOLS * SYMBOLS;

const NOT_A_BASE: u8 = u8::MAX;

/// Byte → symbol index; only uppercase bases are indexable
const BASE_INDEX: [u8; 256] = {
    let mut index = [NOT_A_BASE; 256];
    index[b'A' as usize] = 0;
    index[b'C' as usize] = 1;
    index[b'G' as usize] = 2;
    index[b'T' as usize] = 3;
    index[b'U' as usize] = 4;
    index
};

#[inline]
fn slot(codon: &[u8]) -> Option<usize> {
    if codon.len() != 3 {
        return None;
    }
    let mut slot = 0usize;
    for &base in codon {
        let index = BASE_INDEX[base as usize];
        if index == NOT_A_BASE {
            return None;
        }
        slot = slot * SYMBOLS + index as usize;
    }
    Some(slot)
}

/// Codon spelling (RNA or DNA, uppercase) → residue
#[derive(Debug, Clone)]
pub struct CompiledLookup {
    table_id: u8,
    table_name: &'static str,
    slots: [Option<Residue>; SLOTS],
    len: usize,
}

impl CompiledLookup {
    /// Expand `table` into its RNA and DNA spellings
    pub fn compile(table: &CodonTable) -> Self {
        let mut lookup = Self {
            table_id: table.id(),
            table_name: table.name(),
            slots: [None; SLOTS],
            len: 0,
        };

        for (rna, residue) in table.codons() {
            lookup.insert(&rna, residue);
            let dna = string_ops::reverse_transcribe(&rna);
            if dna[..] != rna[..] {
                lookup.insert(&dna, residue);
            }
        }

        log::debug!(
            "Compiled lookup for table {} ({}) with {} codon spellings",
            lookup.table_id,
            lookup.table_name,
            lookup.len
        );
        lookup
    }

    fn insert(&mut self, codon: &[u8], residue: Residue) {
        if let Some(index) = slot(codon) {
            if self.slots[index].replace(residue).is_none() {
                self.len += 1;
            }
        }
    }

    /// Look up an uppercase codon.
    ///
    /// `None` means the codon is unknown: lowercase input, ambiguity codes,
    /// gaps, or mixed T/U spellings.
    #[inline]
    pub fn get(&self, codon: &[u8]) -> Option<Residue> {
        slot(codon).and_then(|index| self.slots[index])
    }

    /// NCBI id of the source table
    pub fn table_id(&self) -> u8 {
        self.table_id
    }

    /// Canonical name of the source table
    pub fn table_name(&self) -> &'static str {
        self.table_name
    }

    /// Number of codon spellings present
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

static LOOKUP_CACHE: OnceLock<RwLock<HashMap<u8, Arc<CompiledLookup>>>> = OnceLock::new();

fn cache() -> &'static RwLock<HashMap<u8, Arc<CompiledLookup>>> {
    LOOKUP_CACHE.get_or_init(|| RwLock::new(HashMap::new()))
}

/// Resolve `identifier` and return its compiled lookup, compiling it on first use
pub fn lookup_for(identifier: &str) -> EngineResult<Arc<CompiledLookup>> {
    let table = resolve_table(identifier)?;

    if let Some(lookup) = cache().read().get(&table.id()) {
        return Ok(Arc::clone(lookup));
    }

    let mut guard = cache().write();
    let lookup = guard
        .entry(table.id())
        .or_insert_with(|| Arc::new(CompiledLookup::compile(table)));
    Ok(Arc::clone(lookup))
}
