pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_ENABLE_DOCS_IN_RELEASE: bool = false;
pub const DEFAULT_RUST_LOG: &str = "info,tower_http=info";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_DB_MIN_IDLE: u32 = 2;
pub const DEFAULT_DB_CONNECT_TIMEOUT_SECS: u64 = 5;
