//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Settings required to start the front-end server.
pub struct ServerConfig {
    pub address: String,
    pub port: u16,
    /// Root of the remote REST API, e.g. `http://localhost:3333`.
    pub api_base_url: String,
    /// Glob handed to Tera, e.g. `templates/**/*`.
    pub templates_dir: String,
    /// Signing key for flash-message cookies; at least 64 bytes.
    pub secret: String,
}
