#![deny(clippy::print_stdout, clippy::print_stderr)]
//! IBAN validation and construction against per-country structural rules,
//! with ISO 7064 MOD 97-10 check digits.
//!
//! Load a [`Registry`] once, then pass its [`CountryRules`] to [`validate`]
//! and [`create`]:
//!
//! ```
//! use iban_core::{Registry, ValidationOutcome, create, validate};
//!
//! let registry = Registry::bundled();
//! let rules = registry.load().expect("bundled dataset");
//!
//! assert_eq!(validate(rules, "NL20INGB0001234567"), ValidationOutcome::ValidIban);
//! assert_eq!(
//!     create(rules, "417164300", Some("ABNANL2A"), None).expect("known country"),
//!     "NL91ABNA0417164300",
//! );
//! ```

pub mod check_digits;
pub mod create;
pub mod format;
pub mod registry;
pub mod validation;

pub use check_digits::{encode_letters_to_digits, mod97_10};
#[cfg(feature = "async")]
pub use create::create_async;
pub use create::{CreateError, create};
pub use format::{CharacterClass, FieldSpec, FieldSpecError, matches_format};
pub use registry::{
    BUNDLED_DATASET, CountryNotFound, CountryRule, CountryRules, DatasetSource, LoadError,
    Registry,
};
#[cfg(feature = "async")]
pub use validation::validate_async;
pub use validation::{ValidationOutcome, checksum, validate};
