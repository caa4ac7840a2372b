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
// Complexity limits
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

//! Typewriter text animation: types a sequence of strings character by
//! character, holds, erases, and moves on to the next string.
//!
//! The animation is a pure state machine advanced once per display refresh
//! with the refresh timestamp. Hosts supply the refresh source, an optional
//! visibility signal and a render target.
//!
//! # Key entry points
//!
//! - [`component::TextType`] - one animated element (engine, visibility
//!   gate, cursor and color policy)
//! - [`animation::TypingEngine`] - the typing/erasing state machine
//! - [`options::Options`] - serializable configuration (TOML presets)
//! - [`runtime::Session`] - cancellable run loop over a
//!   [`runtime::FrameScheduler`] and [`render::RenderHost`]
//!
//! # Hosts
//!
//! The terminal host ([`runtime::terminal`]) sleeps between frames and
//! rewrites a single line. The simulated host ([`runtime::simulated`]) runs
//! on a virtual clock for tests and previews. With the `web` feature,
//! `web::WebTextType` drives a DOM element from `requestAnimationFrame`.

pub mod animation;
pub mod component;
pub mod error;
pub mod options;
pub mod render;
pub mod runtime;
pub mod util;
#[cfg(feature = "web")]
pub mod web;

pub use component::TextType;
pub use error::TextypeError;
pub use options::Options;
