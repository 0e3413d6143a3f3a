//! # Workflows Module
//!
//! Top-level entry points that turn a complete QCSchema request into a complete
//! QCSchema result.
//!
//! ## Overview
//!
//! A workflow ties the [`crate::core`] data model and the [`crate::engine`] seam
//! together: it resolves the damping level, builds parameters through the engine,
//! prepares the real-atom structure, evaluates the dispersion correction and
//! assembles the result record.
//!
//! ## Failure reporting
//!
//! - **Recorded failures** (invalid level, parameter construction, engine refusal,
//!   unsupported driver) come back inside the result with `success == false`.
//! - **Shape errors** in the request arrays are returned as `Err` and never recorded.
//!
//! ## Workflows
//!
//! - **QCSchema runner** ([`qcschema`]) - single-point energy or gradient of one molecule.

pub mod qcschema;
