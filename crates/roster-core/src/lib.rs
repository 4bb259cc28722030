//! roster-core — Student records, JSON stores, and admin credentials.
//!
//! This crate holds everything the `roster` binary does besides talking to
//! the terminal: the record model, whole-file JSON persistence, the
//! password digest store, and the repository operations.

pub mod config;
pub mod credentials;
pub mod error;
pub mod model;
pub mod repository;
pub mod store;
pub mod validate;

pub use config::{load_config, load_config_from, RosterConfig};
pub use credentials::{hash_password, CredentialStore, SetupOutcome};
pub use error::{RecordError, StoreError, ValidationError};
pub use model::{AdminCredential, Student, StudentPatch};
pub use repository::{DeleteOutcome, StudentRepository};
pub use store::JsonStore;
