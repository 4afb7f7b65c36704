//! Per-country IBAN rules and the load-once registry that holds them.
//!
//! [`CountryRules`] is the parsed, immutable dataset: for every country code
//! the total IBAN length and the ordered BBAN [`FieldSpec`]s. [`Registry`] is
//! a cheaply cloneable handle that loads a [`DatasetSource`] at most once and
//! then hands out `&CountryRules` without locking.
//!
//! The dataset is a JSON object keyed by country code:
//!
//! ```json
//! { "NL": { "length": 18, "innerStructure": "U04F10" } }
//! ```
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock, Mutex, OnceLock, PoisonError};

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::format::{FieldSpec, FieldSpecError};

/// The country dataset shipped with the crate.
pub const BUNDLED_DATASET: &str = include_str!("../data/iban-countries.json");

/// Two uppercase ASCII letters.
static COUNTRY_CODE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z]{2}$")
        .unwrap_or_else(|_| Regex::new("a^").unwrap_or_else(|_| unreachable!("regex engine broken")))
});

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A lookup for a country code that has no rule in the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("country rule not found for country code: {code}")]
pub struct CountryNotFound {
    /// The code that was looked up.
    pub code: String,
}

/// Failure to produce a [`CountryRules`] from a [`DatasetSource`].
///
/// These reflect a deployment problem (missing or corrupt dataset), never
/// bad user input. A failed load leaves the [`Registry`] unloaded.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The dataset file could not be read.
    #[error("unable to read IBAN country data from {}", path.display())]
    Read {
        /// Path of the dataset file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The dataset is not the expected JSON shape.
    #[error("unable to parse IBAN country data from {origin}")]
    Parse {
        /// Human-readable name of the dataset source.
        origin: String,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },

    /// An entry parsed as JSON but does not describe a usable rule.
    #[error("invalid IBAN rule for country {country:?}: {detail}")]
    InvalidRule {
        /// Key of the offending entry.
        country: String,
        /// What is wrong with it.
        detail: String,
    },

    /// The background task running an asynchronous load did not complete.
    #[error("IBAN country data load task failed: {detail}")]
    Join {
        /// Description of the task failure.
        detail: String,
    },
}

// ---------------------------------------------------------------------------
// CountryRule
// ---------------------------------------------------------------------------

/// Structural rule for one country's IBANs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountryRule {
    country_code: String,
    total_length: usize,
    inner_structure: String,
    fields: Vec<FieldSpec>,
    #[serde(skip)]
    structure_error: Option<FieldSpecError>,
}

impl CountryRule {
    /// Two-letter country code, e.g. `"NL"`.
    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    /// Exact length of a complete IBAN for this country.
    pub fn total_length(&self) -> usize {
        self.total_length
    }

    /// Ordered BBAN segments. Empty when the structure did not parse.
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Why `inner_structure` could not be parsed, if it could not.
    ///
    /// Such a rule is kept so the rest of the dataset stays usable, but no
    /// IBAN for its country passes the field-by-field stage.
    pub fn structure_error(&self) -> Option<&FieldSpecError> {
        self.structure_error.as_ref()
    }

    /// The field codes as they appear in the dataset, e.g. `"U04F10"`.
    pub fn inner_structure(&self) -> &str {
        &self.inner_structure
    }

    /// Sum of the declared BBAN field lengths.
    pub fn bban_length(&self) -> usize {
        self.fields.iter().map(|f| f.length).sum()
    }
}

/// A dataset entry before validation.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct RawRule {
    length: usize,
    inner_structure: String,
}

fn build_rule(country_code: String, raw: RawRule) -> Result<CountryRule, LoadError> {
    if !COUNTRY_CODE_RE.is_match(&country_code) {
        return Err(LoadError::InvalidRule {
            country: country_code,
            detail: "country code must be two uppercase letters".to_owned(),
        });
    }
    if raw.length == 0 {
        return Err(LoadError::InvalidRule {
            country: country_code,
            detail: "length must be positive".to_owned(),
        });
    }
    let (fields, structure_error) = match FieldSpec::parse_structure(&raw.inner_structure) {
        Ok(fields) => (fields, None),
        Err(e) => {
            warn!(country = %country_code, error = %e, "unparseable BBAN structure");
            (Vec::new(), Some(e))
        }
    };

    Ok(CountryRule {
        country_code,
        total_length: raw.length,
        inner_structure: raw.inner_structure,
        fields,
        structure_error,
    })
}

// ---------------------------------------------------------------------------
// CountryRules
// ---------------------------------------------------------------------------

/// The loaded rule set, keyed by country code. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CountryRules {
    rules: BTreeMap<String, CountryRule>,
}

impl CountryRules {
    /// Parses a JSON dataset.
    ///
    /// # Errors
    ///
    /// [`LoadError::Parse`] if `json` is not an object of
    /// `{ "length", "innerStructure" }` entries, or
    /// [`LoadError::InvalidRule`] for a bad key or a zero length. A malformed
    /// `innerStructure` does not fail the load; see
    /// [`CountryRule::structure_error`].
    /// field code.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Self::parse(json, "inline JSON")
    }

    /// Parses the dataset embedded in the crate.
    ///
    /// # Errors
    ///
    /// Only if the embedded file is corrupt; see [`CountryRules::from_json`].
    pub fn bundled() -> Result<Self, LoadError> {
        Self::parse(BUNDLED_DATASET, "bundled dataset")
    }

    /// Reads and parses a JSON dataset file.
    ///
    /// # Errors
    ///
    /// [`LoadError::Read`] if the file cannot be read, otherwise as
    /// [`CountryRules::from_json`].
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let json = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&json, &path.display().to_string())
    }

    fn parse(json: &str, origin: &str) -> Result<Self, LoadError> {
        let raw: BTreeMap<String, RawRule> =
            serde_json::from_str(json).map_err(|source| LoadError::Parse {
                origin: origin.to_owned(),
                source,
            })?;

        let mut rules = BTreeMap::new();
        for (code, entry) in raw {
            let rule = build_rule(code.clone(), entry)?;
            rules.insert(code, rule);
        }
        Ok(Self { rules })
    }

    /// Looks up the rule for `country_code`.
    ///
    /// # Errors
    ///
    /// [`CountryNotFound`] if the code has no rule. Codes are case-sensitive.
    pub fn get(&self, country_code: &str) -> Result<&CountryRule, CountryNotFound> {
        self.rules.get(country_code).ok_or_else(|| CountryNotFound {
            code: country_code.to_owned(),
        })
    }

    /// Returns `true` if `country_code` has a rule.
    pub fn contains(&self, country_code: &str) -> bool {
        self.rules.contains_key(country_code)
    }

    /// All rules, ordered by country code.
    pub fn iter(&self) -> impl Iterator<Item = &CountryRule> {
        self.rules.values()
    }

    /// Number of countries.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns `true` if no country has a rule.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

// ---------------------------------------------------------------------------
// DatasetSource
// ---------------------------------------------------------------------------

/// Where a [`Registry`] reads its rules from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DatasetSource {
    /// The JSON file embedded in the crate.
    #[default]
    Bundled,
    /// A JSON file on disk, read when the registry loads.
    Path(PathBuf),
    /// JSON text held in memory.
    Json(String),
}

impl DatasetSource {
    /// Reads and parses the dataset.
    ///
    /// # Errors
    ///
    /// Any [`LoadError`] from the underlying [`CountryRules`] constructor.
    pub fn read(&self) -> Result<CountryRules, LoadError> {
        match self {
            Self::Bundled => CountryRules::bundled(),
            Self::Path(path) => CountryRules::from_path(path),
            Self::Json(json) => CountryRules::from_json(json),
        }
    }
}

impl fmt::Display for DatasetSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bundled => f.write_str("bundled dataset"),
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Json(_) => f.write_str("inline JSON"),
        }
    }
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// A shared, load-once handle to [`CountryRules`].
///
/// Clones share state. The first successful [`Registry::load`] (or
/// `load_async`) stores the rules; every later call returns the same
/// instance without re-reading the source. Concurrent first loads are
/// serialized so the source is read by exactly one caller. A failed load
/// stores nothing and the next call tries again.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    shared: Arc<Shared>,
}

#[derive(Debug, Default)]
struct Shared {
    source: DatasetSource,
    rules: OnceLock<CountryRules>,
    load_guard: Mutex<()>,
}

impl Shared {
    fn load(&self) -> Result<&CountryRules, LoadError> {
        if let Some(rules) = self.rules.get() {
            return Ok(rules);
        }

        let _guard = self
            .load_guard
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        // Another caller may have finished while we waited for the guard.
        if let Some(rules) = self.rules.get() {
            return Ok(rules);
        }

        debug!(source = %self.source, "loading IBAN country rules");
        match self.source.read() {
            Ok(rules) => {
                debug!(
                    source = %self.source,
                    countries = rules.len(),
                    "loaded IBAN country rules"
                );
                Ok(self.rules.get_or_init(|| rules))
            }
            Err(e) => {
                warn!(source = %self.source, error = %e, "failed to load IBAN country rules");
                Err(e)
            }
        }
    }
}

impl Registry {
    /// Creates an unloaded registry reading from `source`.
    pub fn new(source: DatasetSource) -> Self {
        Self {
            shared: Arc::new(Shared {
                source,
                rules: OnceLock::new(),
                load_guard: Mutex::new(()),
            }),
        }
    }

    /// Creates an unloaded registry over the bundled dataset.
    pub fn bundled() -> Self {
        Self::new(DatasetSource::Bundled)
    }

    /// The source this registry loads from.
    pub fn source(&self) -> &DatasetSource {
        &self.shared.source
    }

    /// Returns `true` once a load has succeeded.
    pub fn is_loaded(&self) -> bool {
        self.shared.rules.get().is_some()
    }

    /// The loaded rules, or `None` before the first successful load.
    pub fn get(&self) -> Option<&CountryRules> {
        self.shared.rules.get()
    }

    /// Loads the rules if needed and returns them.
    ///
    /// # Errors
    ///
    /// The [`LoadError`] of this attempt; the registry stays unloaded.
    pub fn load(&self) -> Result<&CountryRules, LoadError> {
        self.shared.load()
    }

    /// Asynchronous counterpart of [`Registry::load`].
    ///
    /// Inside a tokio runtime the read runs on the blocking pool through the
    /// same guarded one-shot slot as the synchronous path, so mixing both
    /// never loads twice. Polled outside a runtime it loads inline.
    ///
    /// # Errors
    ///
    /// The [`LoadError`] of this attempt, or [`LoadError::Join`] if the
    /// blocking task was cancelled or panicked.
    #[cfg(feature = "async")]
    pub async fn load_async(&self) -> Result<&CountryRules, LoadError> {
        if let Some(rules) = self.shared.rules.get() {
            return Ok(rules);
        }

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!(source = %self.shared.source, "no tokio runtime, loading inline");
            return self.shared.load();
        };

        let shared = Arc::clone(&self.shared);
        handle
            .spawn_blocking(move || shared.load().map(|_| ()))
            .await
            .map_err(|e| LoadError::Join {
                detail: e.to_string(),
            })??;

        self.shared.load()
    }
}
