//! phonedir-core: shared data-access layer for the phonedir front-ends.
//!
//! Connection establishment with bounded retry, CRUD + search against the
//! `contacts` table, and the CSV export/import bridge. Both the interactive
//! menu and the HTTP API sit on top of this crate; neither carries SQL of
//! its own.

pub mod config;
pub mod connect;
pub mod csv_io;
pub mod error;
pub mod store;

pub use config::DbConfig;
pub use connect::connect_pool;
pub use csv_io::{import_csv, render_csv, ImportReport};
pub use error::{ConfigError, ConnectError, StoreError};
pub use store::{ensure_schema, Contact, ContactStore, NewContact};
