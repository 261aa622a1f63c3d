//! Tests for the `kubed-reduce` inventory reducer.

mod support;
use support::*;

#[test]
fn reduces_valid_records() {
    let t = Test::new();
    t.write_inventory(
        "clusters:\n  - name: east1\n    domain: east1.example.com\n    region: us-east\n",
    );

    let output = t
        .reduce_cmd()
        .args(["--src", "clusters.yaml", "--dst", "clusters-trunc.yaml"])
        .output()
        .unwrap();
    assert_success(&output);
    assert_stdout_contains(&output, "1 clusters written");

    let map = std::fs::read_to_string(t.dir.path().join("clusters-trunc.yaml")).unwrap();
    assert!(map.contains("east1:"));
    assert!(map.contains("domain: east1.example.com"));
    assert!(map.contains("CNC_DOMAIN: prod.infra.webex.com"));
    assert!(map.contains("CNC: mccprod"));
    assert!(map.contains("VAULT_ADDR: https://keeper.cisco.com"));
    assert!(map.contains("VAULT_NAMESPACE: meetpaas/mccprod"));
    assert!(map.contains("SIGN_ON: kubectl-wbx3 login east1 --role k8s-admin"));
}

#[test]
fn skips_records_missing_fields_and_continues() {
    let t = Test::new();
    t.write_inventory(
        "clusters:\n  - name: east1\n    domain: east1.example.com\n  - name: broken\n  - name: west2\n    domain: west2.example.com\n",
    );

    let output = t.reduce_cmd().output().unwrap();
    assert_success(&output);
    assert_stderr_contains(&output, "item #1 missing name/domain");
    assert_stdout_contains(&output, "2 clusters written");

    let map = std::fs::read_to_string(t.dir.path().join("clusters-trunc.yaml")).unwrap();
    assert!(map.contains("east1:"));
    assert!(map.contains("west2:"));
    assert!(!map.contains("broken"));
}

#[test]
fn preserves_source_order() {
    let t = Test::new();
    t.write_inventory(
        "clusters:\n  - name: zeta\n    domain: z.example.com\n  - name: alpha\n    domain: a.example.com\n",
    );

    let output = t.reduce_cmd().output().unwrap();
    assert_success(&output);

    let map = std::fs::read_to_string(t.dir.path().join("clusters-trunc.yaml")).unwrap();
    let zeta = map.find("zeta:").unwrap();
    let alpha = map.find("alpha:").unwrap();
    assert!(zeta < alpha, "source order not preserved: {map}");
}

#[test]
fn rerun_is_byte_identical() {
    let t = Test::new();
    t.write_inventory(
        "clusters:\n  - name: east1\n    domain: east1.example.com\n  - name: west2\n    domain: west2.example.com\n",
    );

    assert_success(&t.reduce_cmd().output().unwrap());
    let first = std::fs::read_to_string(t.dir.path().join("clusters-trunc.yaml")).unwrap();

    assert_success(&t.reduce_cmd().output().unwrap());
    let second = std::fs::read_to_string(t.dir.path().join("clusters-trunc.yaml")).unwrap();

    assert_eq!(first, second);
}

#[test]
fn missing_source_fails_without_writing() {
    let t = Test::new();

    let output = t.reduce_cmd().output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "clusters.yaml");
    assert!(!t.dir.path().join("clusters-trunc.yaml").exists());
}

#[test]
fn invalid_yaml_fails_without_writing() {
    let t = Test::new();
    t.write_inventory("clusters: [unterminated\n");

    let output = t.reduce_cmd().output().unwrap();
    assert_failure(&output);
    assert_stderr_contains(&output, "invalid inventory");
    assert!(!t.dir.path().join("clusters-trunc.yaml").exists());
}

#[test]
fn src_honors_env_override() {
    let t = Test::new();
    std::fs::write(
        t.dir.path().join("elsewhere.yaml"),
        "clusters:\n  - name: east1\n    domain: east1.example.com\n",
    )
    .unwrap();

    let output = t
        .reduce_cmd()
        .env("CLUSTERS_SRC", "elsewhere.yaml")
        .output()
        .unwrap();
    assert_success(&output);

    let map = std::fs::read_to_string(t.dir.path().join("clusters-trunc.yaml")).unwrap();
    assert!(map.contains("east1:"));
}
