#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! Pattern based metadata extraction from filenames.
//!
//! A [`Gleaner`] holds named regex categories such as `current = (\d+)uA`
//! and turns a filename like `300uA_20G_-170to170deg_poldown` into a map
//! of category name to value, with optional literal and regex
//! translations applied to every extracted value.

pub mod config;
pub mod error;
pub mod gleaner;
pub mod template;
pub mod translate;
pub mod value;

pub use config::{CategoryDef, GleanerConfig};
pub use error::{GleanError, Result};
pub use gleaner::{Category, Gleaned, Gleaner};
pub use translate::{RegexSub, SubFlags, Translate, TranslationTable};
pub use value::{Cast, CastError, CastFn, Value};
