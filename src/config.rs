//! Engine configuration
//!
//! Every heuristic constant lives here as data: keyword tables, marker
//! token sets, bounds. The matchers take the config as a parameter instead
//! of hard-coding vocabulary, so tests can swap in minimal lists and hosts
//! can tune for other locales without forking the engine.

/// Czech/English column-header keywords naming the quantity column.
const QUANTITY_COLUMN_KEYWORDS: &[&str] = &[
    "množství",
    "mnozstvi",
    "výměra",
    "vymera",
    "počet",
    "pocet",
    "quantity",
    "amount",
    "volume",
];

/// Column-header keywords naming the catalog-code column.
const CODE_COLUMN_KEYWORDS: &[&str] = &["kód", "kod", "code", "číslo položky", "cislo polozky"];

/// Column-header keywords naming the unit-price column.
const UNIT_PRICE_COLUMN_KEYWORDS: &[&str] = &[
    "j.cena",
    "j. cena",
    "jednotková",
    "jednotkova",
    "cena/mj",
    "unit price",
];

/// Column-header keywords naming the total-price column.
const TOTAL_PRICE_COLUMN_KEYWORDS: &[&str] = &[
    "cena celkem",
    "celkem",
    "total",
];

/// Domain vocabulary that qualifies a text cell as a work-item description:
/// materials, structural-element nouns, process verbs.
const DESCRIPTION_KEYWORDS: &[&str] = &[
    "beton",
    "železobeton",
    "zelezobeton",
    "zdivo",
    "zdící",
    "výztuž",
    "vyztuz",
    "armatura",
    "ocel",
    "bednění",
    "bedneni",
    "odbednění",
    "montáž",
    "montaz",
    "osazení",
    "osazeni",
    "zeď",
    "stěna",
    "stena",
    "deska",
    "základ",
    "zaklad",
    "sloup",
    "strop",
    "překlad",
    "potrubí",
    "potrubi",
    "izolace",
    "omítka",
    "omitka",
    "dlažba",
    "dlazba",
    "násyp",
    "nasyp",
    "výkop",
    "vykop",
    "odstranění",
    "odstraneni",
    "demontáž",
    "demontaz",
];

/// Description keywords that indicate reinforcement/steel work.
const REINFORCEMENT_KEYWORDS: &[&str] = &[
    "výztuž",
    "vyztuz",
    "armatura",
    "ocel",
    "žebírk",
    "zebirk",
    "kari",
    "steel",
];

/// Description keywords that indicate formwork/surface work.
const FORMWORK_KEYWORDS: &[&str] = &["bednění", "bedneni", "odbednění", "odbedneni", "formwork"];

/// Row-type marker tokens, per the common export conventions:
/// K/M = work item, D = section header, P/PP = descriptive note.
const WORK_ITEM_MARKERS: &[&str] = &["K", "M"];
const SECTION_MARKERS: &[&str] = &["D"];
const NOTE_MARKERS: &[&str] = &["P", "PP"];

/// Heuristic configuration for one extraction run.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Resolved quantities above this bound are treated as mis-detected
    /// codes or prices and never accepted.
    pub max_quantity: f64,

    /// Minimum character length for a description candidate.
    pub min_description_len: usize,

    /// Upper edge of the typical measured-quantity range used by the
    /// scoring rubric (values inside score a bonus).
    pub typical_quantity_max: f64,

    pub quantity_column_keywords: Vec<String>,
    pub code_column_keywords: Vec<String>,
    pub unit_price_column_keywords: Vec<String>,
    pub total_price_column_keywords: Vec<String>,
    pub description_keywords: Vec<String>,
    pub reinforcement_keywords: Vec<String>,
    pub formwork_keywords: Vec<String>,

    pub work_item_markers: Vec<String>,
    pub section_markers: Vec<String>,
    pub note_markers: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_quantity: 50_000.0,
            min_description_len: 10,
            typical_quantity_max: 10_000.0,
            quantity_column_keywords: owned(QUANTITY_COLUMN_KEYWORDS),
            code_column_keywords: owned(CODE_COLUMN_KEYWORDS),
            unit_price_column_keywords: owned(UNIT_PRICE_COLUMN_KEYWORDS),
            total_price_column_keywords: owned(TOTAL_PRICE_COLUMN_KEYWORDS),
            description_keywords: owned(DESCRIPTION_KEYWORDS),
            reinforcement_keywords: owned(REINFORCEMENT_KEYWORDS),
            formwork_keywords: owned(FORMWORK_KEYWORDS),
            work_item_markers: owned(WORK_ITEM_MARKERS),
            section_markers: owned(SECTION_MARKERS),
            note_markers: owned(NOTE_MARKERS),
        }
    }
}

impl EngineConfig {
    /// True when the lowercased column key names the quantity column.
    pub fn is_quantity_column(&self, column_key: &str) -> bool {
        contains_any(column_key, &self.quantity_column_keywords)
    }

    pub fn is_code_column(&self, column_key: &str) -> bool {
        contains_any(column_key, &self.code_column_keywords)
    }

    pub fn is_unit_price_column(&self, column_key: &str) -> bool {
        contains_any(column_key, &self.unit_price_column_keywords)
    }

    pub fn is_total_price_column(&self, column_key: &str) -> bool {
        contains_any(column_key, &self.total_price_column_keywords)
    }

    /// True when the text carries at least one domain keyword.
    pub fn has_description_keyword(&self, text: &str) -> bool {
        contains_any(text, &self.description_keywords)
    }

    pub fn has_reinforcement_keyword(&self, text: &str) -> bool {
        contains_any(text, &self.reinforcement_keywords)
    }

    pub fn has_formwork_keyword(&self, text: &str) -> bool {
        contains_any(text, &self.formwork_keywords)
    }
}

fn contains_any(text: &str, keywords: &[String]) -> bool {
    let lower = text.to_lowercase();
    keywords.iter().any(|k| lower.contains(k.as_str()))
}

fn owned(table: &[&str]) -> Vec<String> {
    table.iter().map(|s| s.to_string()).collect()
}
