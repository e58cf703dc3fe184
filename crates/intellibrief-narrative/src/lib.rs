//! Turns collected signals into the sales narrative of a strategic brief.
//!
//! `rules` holds the named inference rules, `format` the emoji-headed
//! templates, and `synthesize` wires the two together. `improve` rewrites a
//! stored brief's narrative, `compose` builds the persistable record and
//! `export` renders briefs as CSV or HTML.

pub mod compose;
pub mod export;
pub mod format;
pub mod improve;
pub mod rules;
pub mod synthesize;

pub use compose::{compose, BriefRequest};
pub use export::{to_csv, to_html, ExportFormat};
pub use improve::{improve, IMPROVED_MESSAGE};
pub use synthesize::{synthesize, NarrativeContext};
