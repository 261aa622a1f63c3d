//! Constants used throughout kubed.
//!
//! Centralizes magic strings and configuration values.

/// Credential store file name (.env).
pub const STORE_FILE: &str = ".env";

/// Key the vault token is stored under.
pub const TOKEN_KEY: &str = "VAULT_TOKEN";

/// Substring a captured vault token must contain.
pub const TOKEN_MARKER: &str = "hvs.CAE";

/// Reduced cluster map file name.
pub const MAP_FILE: &str = "clusters-trunc.yaml";

/// Default raw inventory file name consumed by the reducer.
pub const INVENTORY_FILE: &str = "clusters.yaml";

/// Env var overriding the cluster map location for the launcher.
pub const MAP_FILE_ENV: &str = "CLUSTERS_FILE";

/// Per-user working directory for sign-on sessions, relative to HOME.
pub const WORKDIR_NAME: &str = "k8s";

/// Control-plane domain shared by all clusters.
pub const CNC_DOMAIN: &str = "prod.infra.webex.com";

/// Control-plane identifier shared by all clusters.
pub const CNC: &str = "mccprod";

/// Vault server address shared by all clusters.
pub const VAULT_ADDR: &str = "https://keeper.cisco.com";

/// Vault namespace shared by all clusters.
pub const VAULT_NAMESPACE: &str = "meetpaas/mccprod";

/// Build the sign-on command for a cluster name.
pub fn sign_on_command(name: &str) -> String {
    format!("kubectl-wbx3 login {name} --role k8s-admin")
}
