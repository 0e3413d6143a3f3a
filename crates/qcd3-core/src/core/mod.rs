//! # Core Module
//!
//! Stateless building blocks of the dispersion-correction adapter. Nothing in here
//! talks to an engine; every item is a plain function or data type that the
//! [`engine`](crate::engine) and [`workflows`](crate::workflows) layers compose.
//!
//! ## Architecture
//!
//! - **Records** ([`schema`]) - Serializable request and result records
//! - **Damping** ([`damping`]) - Level resolution, method-name normalization and
//!   damping-parameter construction
//! - **Geometry** ([`structure`]) - Shape-checked atomic numbers, positions and lattice
//! - **Gradients** ([`gradient`]) - Re-expansion of real-atom gradients to the full
//!   atom list, with zero rows for ghost atoms

pub mod damping;
pub mod gradient;
pub mod schema;
pub mod structure;
