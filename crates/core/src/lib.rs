//! # Hospital Core
//!
//! Core business logic for the hospital registry.
//!
//! This crate contains the in-memory data model and the operations over it:
//! - Department, patient, visit and note records ([`models`])
//! - The [`Hospital`] registry: enrollment, removal, lookup and visit counting by date
//! - Deterministic ingestion of tabular visit rows ([`ingestion`])
//!
//! **No presentation concerns**: credential checks, menus and report printing belong in
//! `hospital-cli`.

pub mod config;
pub mod constants;
pub mod error;
pub mod hospital;
pub mod ingestion;
pub mod models;

pub use config::{DepartmentPolicy, RegistryConfig};
pub use error::{HospitalError, HospitalResult};
pub use hospital::Hospital;
pub use hospital_types::{NonEmptyText, Role, TextError};
pub use ingestion::{parse_visit_date, IngestSummary, Ingestor, InputFormat};
pub use models::{Demographics, Department, Note, Patient, Visit};
