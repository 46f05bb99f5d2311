//! Genetic code tables
//!
//! Static registry of the NCBI translation tables. Each table is stored as a
//! 64-residue string in NCBI codon order (first base slowest, bases ordered
//! `T C A G`), with `*` marking a stop codon.

use itertools::Itertools;

use crate::engines::{EngineError, EngineResult};

/// Identifier of the table used when none is given
pub const DEFAULT_TABLE: &str = "standard";

/// Number of codons in every table
pub const CODON_COUNT: usize = 64;

/// Stop marker used in the raw table strings
const STOP_MARKER: u8 = b'*';

/// NCBI base order, RNA spelling
const BASES: [u8; 4] = [b'U', b'C', b'A', b'G'];

/// What a codon encodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Residue {
    /// A one-letter amino acid symbol
    Amino(u8),
    /// Translation termination
    Stop,
}

impl Residue {
    fn from_table_byte(byte: u8) -> Self {
        if byte == STOP_MARKER {
            Residue::Stop
        } else {
            Residue::Amino(byte)
        }
    }

    pub fn is_stop(&self) -> bool {
        matches!(self, Residue::Stop)
    }
}

/// An immutable codon → residue table
#[derive(Debug)]
pub struct CodonTable {
    id: u8,
    name: &'static str,
    description: &'static str,
    residues: &'static [u8; CODON_COUNT],
}

impl CodonTable {
    const fn new(
        id: u8,
        name: &'static str,
        description: &'static str,
        residues: &'static [u8; CODON_COUNT],
    ) -> Self {
        Self {
            id,
            name,
            description,
            residues,
        }
    }

    /// NCBI table number
    pub fn id(&self) -> u8 {
        self.id
    }

    /// Canonical lowercase name
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Human-readable NCBI title
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Number of codons defined (always 64)
    pub fn len(&self) -> usize {
        self.residues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    /// Whether `identifier` names this table, either by name or by NCBI number
    pub fn matches(&self, identifier: &str) -> bool {
        identifier == self.name || identifier == self.id.to_string()
    }

    /// Look up an uppercase RNA codon
    pub fn get(&self, codon: &[u8]) -> Option<Residue> {
        if codon.len() != 3 {
            return None;
        }
        let mut index = 0;
        for &base in codon {
            let position = BASES.iter().position(|&b| b == base)?;
            index = index * 4 + position;
        }
        Some(Residue::from_table_byte(self.residues[index]))
    }

    /// All 64 (RNA codon, residue) pairs in NCBI order
    pub fn codons(&self) -> impl Iterator<Item = ([u8; 3], Residue)> + '_ {
        self.residues.iter().enumerate().map(|(index, &byte)| {
            let codon = [BASES[index / 16], BASES[(index / 4) % 4], BASES[index % 4]];
            (codon, Residue::from_table_byte(byte))
        })
    }

    /// RNA spellings of the stop codons
    pub fn stop_codons(&self) -> Vec<[u8; 3]> {
        self.codons()
            .filter(|(_, residue)| residue.is_stop())
            .map(|(codon, _)| codon)
            .collect()
    }
}

#[rustfmt::skip]
static TABLES: [CodonTable; 27] = [
    CodonTable::new(1, "standard", "Standard",
        b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    CodonTable::new(2, "vertebrate-mitochondrial", "Vertebrate Mitochondrial",
        b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSS**VVVVAAAADDEEGGGG"),
    CodonTable::new(3, "yeast-mitochondrial", "Yeast Mitochondrial",
        b"FFLLSSSSYY**CCWWTTTTPPPPHHQQRRRRIIMMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    CodonTable::new(4, "mold-mitochondrial", "Mold, Protozoan, and Coelenterate Mitochondrial and Mycoplasma/Spiroplasma",
        b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    CodonTable::new(5, "invertebrate-mitochondrial", "Invertebrate Mitochondrial",
        b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSSSSVVVVAAAADDEEGGGG"),
    CodonTable::new(6, "ciliate-nuclear", "Ciliate, Dasycladacean and Hexamita Nuclear",
        b"FFLLSSSSYYQQCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    CodonTable::new(9, "echinoderm-mitochondrial", "Echinoderm and Flatworm Mitochondrial",
        b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNNKSSSSVVVVAAAADDEEGGGG"),
    CodonTable::new(10, "euplotid-nuclear", "Euplotid Nuclear",
        b"FFLLSSSSYY**CCCWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    CodonTable::new(11, "bacterial", "Bacterial, Archaeal and Plant Plastid",
        b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    CodonTable::new(12, "alternative-yeast-nuclear", "Alternative Yeast Nuclear",
        b"FFLLSSSSYY**CC*WLLLSPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    CodonTable::new(13, "ascidian-mitochondrial", "Ascidian Mitochondrial",
        b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNKKSSGGVVVVAAAADDEEGGGG"),
    CodonTable::new(14, "alternative-flatworm-mitochondrial", "Alternative Flatworm Mitochondrial",
        b"FFLLSSSSYYY*CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNNKSSSSVVVVAAAADDEEGGGG"),
    CodonTable::new(15, "blepharisma-nuclear", "Blepharisma Macronuclear",
        b"FFLLSSSSYY*QCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    CodonTable::new(16, "chlorophycean-mitochondrial", "Chlorophycean Mitochondrial",
        b"FFLLSSSSYY*LCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    CodonTable::new(21, "trematode-mitochondrial", "Trematode Mitochondrial",
        b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIMMTTTTNNNKSSSSVVVVAAAADDEEGGGG"),
    CodonTable::new(22, "scenedesmus-mitochondrial", "Scenedesmus obliquus Mitochondrial",
        b"FFLLSS*SYY*LCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    CodonTable::new(23, "thraustochytrium-mitochondrial", "Thraustochytrium Mitochondrial",
        b"FF*LSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    CodonTable::new(24, "rhabdopleuridae-mitochondrial", "Rhabdopleuridae Mitochondrial",
        b"FFLLSSSSYY**CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSSKVVVVAAAADDEEGGGG"),
    CodonTable::new(25, "gracilibacteria", "Candidate Division SR1 and Gracilibacteria",
        b"FFLLSSSSYY**CCGWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    CodonTable::new(26, "pachysolen-nuclear", "Pachysolen tannophilus Nuclear",
        b"FFLLSSSSYY**CC*WLLLAPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    CodonTable::new(27, "karyorelict-nuclear", "Karyorelict Nuclear",
        b"FFLLSSSSYYQQCCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    CodonTable::new(28, "condylostoma-nuclear", "Condylostoma Nuclear",
        b"FFLLSSSSYYQQCCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    CodonTable::new(29, "mesodinium-nuclear", "Mesodinium Nuclear",
        b"FFLLSSSSYYYYCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    CodonTable::new(30, "peritrich-nuclear", "Peritrich Nuclear",
        b"FFLLSSSSYYEECC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    CodonTable::new(31, "blastocrithidia-nuclear", "Blastocrithidia Nuclear",
        b"FFLLSSSSYYEECCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    CodonTable::new(32, "balanophoraceae-plastid", "Balanophoraceae Plastid",
        b"FFLLSSSSYY*WCC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG"),
    CodonTable::new(33, "cephalodiscidae-mitochondrial", "Cephalodiscidae Mitochondrial",
        b"FFLLSSSSYYY*CCWWLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSSKVVVVAAAADDEEGGGG"),
];

/// Every registered table, ordered by NCBI id
pub fn all_tables() -> &'static [CodonTable] {
    &TABLES
}

/// Every identifier `resolve_table` accepts
pub fn valid_identifiers() -> Vec<String> {
    TABLES
        .iter()
        .flat_map(|table| [table.name.to_string(), table.id.to_string()])
        .collect()
}

/// Resolve a table by canonical name or NCBI number.
///
/// Matching is exact: `"standard"` and `"1"` resolve, `"Standard"` and `"01"`
/// do not.
pub fn resolve_table(identifier: &str) -> EngineResult<&'static CodonTable> {
    TABLES
        .iter()
        .find(|table| table.matches(identifier))
        .ok_or_else(|| EngineError::UnknownTable {
            identifier: identifier.to_string(),
            valid: valid_identifiers().iter().join(", "),
        })
}
