// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Colour-shading engine for multiple sequence alignments.
//!
//! alnshade turns per-column numbers into colours: annotation scores become
//! gradient colours, percent identity becomes banded consensus shading, and
//! feature scores become graduated feature colours. Thresholds can hide
//! values on one side of a line, or redefine the colour span.
//!
//! # Key entry points
//!
//! - [`shading::shade_score`] - normalize, gate and map one raw score
//! - [`schemes::AnnotationColourGradient`] - colour residues by an
//!   annotation row
//! - [`schemes::shade_by_identity`] - banded percent-identity shading
//! - [`feature::FeatureColour`] - feature colours and their `|`-separated
//!   descriptor format
//! - [`residue_shader::ResidueShader`] - scheme plus identity threshold and
//!   conservation bleaching
//! - [`options::Options`] - TOML presets for all of the above
//!
//! # Architecture
//!
//! Everything is synchronous in-memory arithmetic. Consensus and
//! conservation are computed elsewhere and handed in; configuration objects
//! have a single owner that edits them in place. Colour schemes implement
//! [`schemes::ColourScheme`] and are enumerated through an explicit
//! [`schemes::SchemeRegistry`] rather than a global list.

pub mod annotation;
pub mod colour;
pub mod consensus;
pub mod error;
pub mod feature;
pub mod options;
pub mod residue_shader;
pub mod schemes;
pub mod shading;

pub use colour::Rgb;
pub use error::ShadeError;
