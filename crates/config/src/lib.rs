//! Syncscope configuration
use clap::Parser;
use url::Url;
use warehouse::ConnectionParams;

/// Origins allowed by CORS in addition to localhost.
pub const DEFAULT_ALLOWED_ORIGINS: &str = "https://syncscope.dev,https://www.syncscope.dev";

/// Warehouse connection configuration options
#[derive(Debug, Clone, Parser)]
pub struct WarehouseOpts {
    /// Warehouse account URL
    #[clap(long = "warehouse-url", env = "WAREHOUSE_URL")]
    pub account: Url,
    /// Database the client connects to
    #[clap(long = "warehouse-db", env = "WAREHOUSE_DB", default_value = "default")]
    pub database: String,
    /// Schema holding the connector log tables
    #[clap(long = "warehouse-schema", env = "WAREHOUSE_SCHEMA", default_value = "fivetran_log")]
    pub schema: String,
    /// Warehouse username
    #[clap(long = "warehouse-username", env = "WAREHOUSE_USERNAME")]
    pub username: String,
    /// Warehouse password
    #[clap(long = "warehouse-password", env = "WAREHOUSE_PASSWORD", hide_env_values = true)]
    pub password: String,
    /// Role used for queries
    #[clap(long = "warehouse-role", env = "WAREHOUSE_ROLE")]
    pub role: Option<String>,
    /// Compute warehouse (workload) used for queries
    #[clap(long = "warehouse-name", env = "WAREHOUSE_NAME")]
    pub warehouse: Option<String>,
}

impl From<WarehouseOpts> for ConnectionParams {
    fn from(opts: WarehouseOpts) -> Self {
        Self {
            account: opts.account,
            username: opts.username,
            password: opts.password,
            role: opts.role,
            warehouse: opts.warehouse,
            database: opts.database,
            schema: opts.schema,
        }
    }
}

/// API server configuration options
#[derive(Debug, Clone, Parser)]
pub struct ApiOpts {
    /// Host to bind the API server to
    #[clap(long = "api-host", env = "API_HOST", default_value = "127.0.0.1")]
    pub host: String,
    /// Port to bind the API server to
    #[clap(long = "api-port", env = "API_PORT", default_value = "3000")]
    pub port: u16,
    /// Extra CORS origins, comma separated
    #[clap(
        long = "allowed-origins",
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_value = DEFAULT_ALLOWED_ORIGINS
    )]
    pub allowed_origins: Vec<String>,
}

/// CLI options for the syncscope API server
#[derive(Debug, Clone, Parser)]
pub struct Opts {
    /// Warehouse connection configuration
    #[clap(flatten)]
    pub warehouse: WarehouseOpts,

    /// API server configuration
    #[clap(flatten)]
    pub api: ApiOpts,
}
