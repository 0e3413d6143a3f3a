//! # qcd3
//!
//! A QCSchema adapter for DFT-D3 dispersion corrections.
//!
//! The crate accepts a QCSchema-style atomic input, drives a DFT-D3 engine through
//! the [`engine::DispersionEngine`] trait and returns a QCSchema-style atomic result.
//!
//! ## Architecture
//!
//! - **[`core`]: The Foundation.** Stateless data: the request and result records,
//!   damping families and coefficients, shape-checked structures, and gradient
//!   reconstruction for ghost atoms.
//!
//! - **[`engine`]: The Seam.** The [`engine::DispersionEngine`] trait, the
//!   [`engine::model::DispersionModel`] that keeps a structure registered with an
//!   engine, damping-parameter construction, and runner configuration.
//!
//! - **[`workflows`]: The Public API.** [`workflows::qcschema::run`] executes one
//!   request end to end.

pub mod core;
pub mod engine;
pub mod workflows;
