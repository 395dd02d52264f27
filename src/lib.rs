//! registra - multi-tenant asset registry edit-authorization core.
//!
//! Resolves, for a single physical asset record ("item") under multi-tenant
//! organizational control, the questions a request-handling layer asks on
//! every access attempt: may this actor edit this item, which organization
//! context is in effect for the session, and which single-use token (if
//! any) is the request presenting.
//!
//! The crate is a library-level decision engine: it owns the SQLite-backed
//! store, the denial taxonomy, and the session-context vocabulary, but no
//! wire protocol or page rendering. The decision paths are:
//!
//! - [`authz::LookupGate`] - resolve an item by identifier, enforcing the
//!   visibility rule for hidden and soft-deleted records.
//! - [`authz::OrgScopeResolver`] - resolve the active organization for the
//!   request; returns a new context value for the caller to persist.
//! - [`authz::TokenClassifier`] - match request tokens against ownership
//!   claims and notification records.
//! - [`authz::EditAuthorizer`] - the terminal allowed/denied verdict with a
//!   rendered notice and redirect target.

pub mod authz;
pub mod config;
pub mod db;
pub mod error;
pub mod i18n;
pub mod metrics;
pub mod session;
pub mod telemetry;

pub use authz::{
    EditAuthorizer, LookupGate, LookupParams, OrgScopeResolver, TokenClassification,
    TokenClassifier, TokenParams, item_path,
};
pub use config::Config;
pub use db::{Database, DbError};
pub use error::{DenialKind, LookupError, Verdict};
pub use i18n::{MessageKey, Translator};
pub use session::{SessionContext, SessionRegistry};

pub use registra_model as model;
