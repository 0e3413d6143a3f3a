//! # Schema Module
//!
//! The request and result records exchanged with workflow orchestrators, following
//! the QCSchema `AtomicInput` / `AtomicResult` layout restricted to the fields a
//! dispersion correction consumes or produces.
//!
//! - [`input`] - Molecule, model, driver and keyword bag of a request
//! - [`result`] - Result record, provenance, structured errors and raw engine output

pub mod input;
pub mod result;
