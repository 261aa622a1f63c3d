//! Test support utilities for kubed integration tests.
//!
//! Provides reusable test environment setup and helper commands.

#![allow(dead_code)]

pub mod assertions;

#[allow(unused_imports)]
pub use assertions::*;

use assert_cmd::Command;
use std::path::PathBuf;
use std::process::Output;
use tempfile::TempDir;

/// Test environment with isolated temp directories.
///
/// Each test gets its own temporary project dir and home dir.
/// No process-global state is mutated — child processes use `.current_dir()`
/// so tests can safely run in parallel.
pub struct Test {
    /// Temporary directory for the test project
    pub dir: TempDir,
    /// Temporary home directory
    pub home: TempDir,
}

impl Test {
    /// Create a new empty test environment.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");

        Self { dir, home }
    }

    /// Create a kubed command with correct environment variables.
    ///
    /// Returns a Command configured with:
    /// - HOME set to the temporary home directory
    /// - Current directory set to the test project directory
    /// - VAULT_TOKEN and CLUSTERS_FILE removed from the inherited env
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("kubed").expect("failed to find kubed binary");
        cmd.env("HOME", self.home.path());
        // Windows uses USERPROFILE instead of HOME for home directory
        cmd.env("USERPROFILE", self.home.path());
        cmd.env_remove("VAULT_TOKEN");
        cmd.env_remove("CLUSTERS_FILE");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Create a kubed-reduce command with the same isolation.
    pub fn reduce_cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd =
            Command::cargo_bin("kubed-reduce").expect("failed to find kubed-reduce binary");
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env_remove("CLUSTERS_SRC");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for launching a sign-on session.
    pub fn launch(&self, cluster: &str) -> Output {
        self.cmd()
            .arg(cluster)
            .output()
            .expect("failed to run kubed")
    }

    /// Write a credential store with a token into the project dir.
    pub fn write_store(&self, token: &str) {
        std::fs::write(
            self.dir.path().join(".env"),
            format!("VAULT_TOKEN=\"{token}\"\n"),
        )
        .expect("failed to write .env");
    }

    /// Write a cluster map for the given (name, domain) pairs into the
    /// project dir, where the launcher discovers it.
    pub fn write_map(&self, entries: &[(&str, &str)]) -> PathBuf {
        let path = self.dir.path().join("clusters-trunc.yaml");
        std::fs::write(&path, map_yaml(entries)).expect("failed to write cluster map");
        path
    }

    /// Write a raw inventory file into the project dir.
    pub fn write_inventory(&self, yaml: &str) -> PathBuf {
        let path = self.dir.path().join("clusters.yaml");
        std::fs::write(&path, yaml).expect("failed to write inventory");
        path
    }

    /// The per-user working directory sign-on sessions run in.
    pub fn workdir(&self) -> PathBuf {
        self.home.path().join("k8s")
    }

    /// Install an executable `kubectl-wbx3` stub into `<home>/k8s`.
    ///
    /// The stub dumps the variables the launcher must overlay, its
    /// arguments, and its working directory into `env-dump.txt`, then
    /// exits with `exit_code`.
    #[cfg(unix)]
    pub fn install_sign_on_stub(&self, exit_code: i32) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        std::fs::create_dir_all(self.workdir()).expect("failed to create workdir");
        let script = self.workdir().join("kubectl-wbx3");
        let body = format!(
            "#!/bin/sh\n{{\n  echo \"DOMAIN=$DOMAIN\"\n  echo \"CNC_DOMAIN=$CNC_DOMAIN\"\n  echo \"CNC=$CNC\"\n  echo \"VAULT_ADDR=$VAULT_ADDR\"\n  echo \"VAULT_NAMESPACE=$VAULT_NAMESPACE\"\n  echo \"VAULT_TOKEN=$VAULT_TOKEN\"\n  echo \"PATH=$PATH\"\n  echo \"CWD=$(pwd)\"\n  echo \"ARGS=$*\"\n}} > env-dump.txt\nexit {exit_code}\n"
        );
        std::fs::write(&script, body).expect("failed to write sign-on stub");
        let mut perms = std::fs::metadata(&script).unwrap().permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&script, perms).unwrap();
        script
    }

    /// Read the stub's environment dump.
    pub fn env_dump(&self) -> String {
        std::fs::read_to_string(self.workdir().join("env-dump.txt"))
            .expect("sign-on stub did not run")
    }

    /// Install fake `wl-paste`/`wl-copy` clipboard tools on a private bin
    /// dir and return (bin dir, clear-marker path).
    ///
    /// `wl-paste` prints `contents`; `wl-copy --clear` touches the marker.
    #[cfg(unix)]
    pub fn install_fake_clipboard(&self, contents: &str) -> (PathBuf, PathBuf) {
        use std::os::unix::fs::PermissionsExt;

        let bin = self.dir.path().join("fakebin");
        std::fs::create_dir_all(&bin).expect("failed to create fakebin");
        let marker = self.dir.path().join("clipboard-cleared");

        let paste = bin.join("wl-paste");
        std::fs::write(&paste, format!("#!/bin/sh\nprintf '%s' '{contents}'\n")).unwrap();
        let copy = bin.join("wl-copy");
        std::fs::write(
            &copy,
            format!("#!/bin/sh\ntouch '{}'\n", marker.display()),
        )
        .unwrap();

        for tool in [&paste, &copy] {
            let mut perms = std::fs::metadata(tool).unwrap().permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(tool, perms).unwrap();
        }

        (bin, marker)
    }
}

/// Build cluster map YAML the way the reducer serializes it.
pub fn map_yaml(entries: &[(&str, &str)]) -> String {
    let mut yaml = String::new();
    for (name, domain) in entries {
        yaml.push_str(&format!(
            "{name}:\n  domain: {domain}\n  CNC_DOMAIN: prod.infra.webex.com\n  CNC: mccprod\n  VAULT_ADDR: https://keeper.cisco.com\n  VAULT_NAMESPACE: meetpaas/mccprod\n  SIGN_ON: kubectl-wbx3 login {name} --role k8s-admin\n"
        ));
    }
    yaml
}
