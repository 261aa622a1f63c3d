//! Session launch command.
//!
//! Linear pipeline: credential store, token, cluster map, cluster,
//! session environment, working directory, script, execution. Every step
//! fails fast with a specific diagnostic.

use tracing::debug;

use crate::core::cluster::{self, ClusterMap};
use crate::core::platform::HostPlatform;
use crate::core::session::{self, SessionEnvironment};
use crate::core::store::{self, EnvStore};
use crate::error::{KubedError, Result};

/// Launch a sign-on session for a named cluster.
pub fn execute(cluster_name: &str) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let store = EnvStore::discover(&cwd)?;
    let token = store::load_token(&store)?;

    let map_path = cluster::discover_map_file()?;
    let map = ClusterMap::load(&map_path)?;
    let config = map.get(cluster_name)?;

    let platform = HostPlatform::detect()?;
    let home = dirs::home_dir().ok_or(KubedError::HomeMissing)?;
    let env = SessionEnvironment::build(platform, &config, &token, &home)?;
    let (script, args) = session::resolve_script(platform, &env.workdir, &config.sign_on)?;

    debug!(cluster = cluster_name, domain = %config.domain, "session resolved");
    session::launch(platform, &env, &script, &args)
}
