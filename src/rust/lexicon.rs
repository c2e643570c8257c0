//! Keyword lexicon used by the text features.
//!
//! Keywords are stored lowercase and matched as substrings of the lowercased
//! description, so multi-word entries such as "papel higiênico" work as-is.

use crate::types::WasteClass;

const ORGANIC_KEYWORDS: &[&str] = &[
    "alimento", "comida", "fruta", "legume", "verdura", "casca",
    "resto", "compostagem", "folha", "galho", "planta", "vegetal",
    "banana", "maçã", "tomate", "batata", "cenoura", "alface",
    "laranja", "restos alimentares", "orgânico", "biodegradável",
];

const RECYCLABLE_KEYWORDS: &[&str] = &[
    "papel", "papelão", "plástico", "garrafa", "pet", "metal",
    "alumínio", "lata", "vidro", "caixa", "embalagem", "revista",
    "jornal", "cartolina", "pote", "sacola", "reciclagem", "reciclável",
    "tetra pak", "aço", "ferro", "cobre", "papelão ondulado",
];

const REJECT_KEYWORDS: &[&str] = &[
    "papel higiênico", "absorvente", "fralda", "guardanapo sujo",
    "adesivo", "etiqueta", "papel plastificado", "papel metalizado",
    "cerâmica", "porcelana", "espelho", "vidro temperado", "cabo",
    "esponja", "bituca", "cigarro", "rejeito", "não reciclável",
];

const HAZARDOUS_KEYWORDS: &[&str] = &[
    "bateria", "pilha", "tinta", "solvente", "veneno", "inseticida",
    "pesticida", "remédio", "medicamento", "lâmpada", "fluorescente",
    "termômetro", "mercúrio", "óleo", "graxa", "aerosol", "spray",
    "tóxico", "corrosivo", "inflamável", "químico", "perigoso",
    "hospitalar", "agulha", "seringa", "eletrônico", "celular",
];

/// Immutable mapping from each class to its indicative keywords.
#[derive(Debug, Clone, Copy)]
pub struct Lexicon {
    entries: [&'static [&'static str]; 4],
}

impl Lexicon {
    /// The built-in lexicon.
    pub const fn builtin() -> Self {
        Self {
            entries: [
                ORGANIC_KEYWORDS,
                RECYCLABLE_KEYWORDS,
                REJECT_KEYWORDS,
                HAZARDOUS_KEYWORDS,
            ],
        }
    }

    /// A lexicon from static keyword tables in canonical class order.
    /// Keywords must already be lowercase.
    pub const fn from_tables(tables: [&'static [&'static str]; 4]) -> Self {
        Self { entries: tables }
    }

    pub fn keywords(&self, class: WasteClass) -> &'static [&'static str] {
        self.entries[class.index()]
    }

    /// Total number of keywords across all classes
    pub fn len(&self) -> usize {
        self.entries.iter().map(|k| k.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of `class` keywords found in `lowercase_text`. Each keyword
    /// counts at most once regardless of how often it occurs.
    pub fn count_matches(&self, class: WasteClass, lowercase_text: &str) -> usize {
        self.keywords(class)
            .iter()
            .filter(|keyword| lowercase_text.contains(*keyword))
            .count()
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Keywords found in `lowercase_text`, in table order.
pub(crate) fn matching_keywords<'a>(keywords: &[&'a str], lowercase_text: &str) -> Vec<&'a str> {
    keywords
        .iter()
        .copied()
        .filter(|keyword| lowercase_text.contains(keyword))
        .collect()
}
