//! Connection parameters and the session context handed to query builders.

use derive_more::Debug;
use url::Url;

/// Everything needed to open a warehouse session.
#[derive(Clone, Debug)]
pub struct ConnectionParams {
    /// Warehouse endpoint
    pub account: Url,
    /// Warehouse user
    pub username: String,
    /// Warehouse password
    #[debug(skip)]
    pub password: String,
    /// Role activated for the session, if any
    pub role: Option<String>,
    /// Compute pool the session's queries are scheduled on, if any
    pub warehouse: Option<String>,
    /// Default database of the session
    pub database: String,
    /// Database holding the connector log tables
    pub schema: String,
}

impl ConnectionParams {
    /// Session context derived from these parameters.
    pub fn context(&self) -> WarehouseContext {
        WarehouseContext::new(self.database.clone(), self.schema.clone())
    }
}

/// Database and log schema the session is bound to.
///
/// The log schema doubles as the name of the connector's own bookkeeping
/// schema, which is excluded from volume metrics.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct WarehouseContext {
    database: String,
    schema: String,
}

impl WarehouseContext {
    /// Create a new context.
    pub const fn new(database: String, schema: String) -> Self {
        Self { database, schema }
    }

    /// Default database of the session.
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Database holding `log`, `connector` and `connector_type`.
    pub fn schema(&self) -> &str {
        &self.schema
    }
}
