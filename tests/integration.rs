use predicates::prelude::*;
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_composedoc")))
}

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
}

const WEB_COMPOSE: &str = "\
services:
  web:
    container_name: web
    ports:
      - \"80:80\"
    labels:
      readme.description: Frontend
";

// -- full runs --

#[test]
fn full_run_substitutes_both_tables() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "docker-compose.yml", WEB_COMPOSE);
    write(dir.path(), ".env.local", "# DB host\nDB_HOST=localhost\nDB_PORT=5432\n");
    write(
        dir.path(),
        "tpl.md",
        "# Stack\n\n{containers}\n\n## Variables\n\n{envs}",
    );

    cmd()
        .current_dir(dir.path())
        .args(["-t", "tpl.md", "-o", "out.md"])
        .arg("docker-compose.yml")
        .assert()
        .success();

    let output = fs::read_to_string(dir.path().join("out.md")).unwrap();
    assert!(output.starts_with("# Stack\n"));
    assert!(output.contains("| [web](docker-compose.yml#L3) | Frontend | `80:80` | |"));
    assert!(output.contains("| `DB_HOST` | DB host | `localhost` |"));
    assert!(output.contains("| `DB_PORT` | | `5432` |"));
}

#[test]
fn default_template_and_output_paths() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "docker-compose.yml", WEB_COMPOSE);
    write(dir.path(), "README.tmpl.md", "{containers}\n{envs}");

    cmd()
        .current_dir(dir.path())
        .arg("docker-compose.yml")
        .assert()
        .success();

    assert!(dir.path().join("README.md").exists());
}

#[test]
fn no_compose_files_yields_header_only_tables() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "tpl.md", "{containers}{envs}");

    cmd()
        .current_dir(dir.path())
        .args(["-t", "tpl.md", "-o", "out.md"])
        .assert()
        .success();

    let output = fs::read_to_string(dir.path().join("out.md")).unwrap();
    assert_eq!(
        output,
        "| **Name** | **Description** | **Ports** | **Links** |\n\
         |---|---|---|---|\n\
         \n\
         | **Variable** | **Description** | **Example** |\n\
         |---|---|---|\n"
    );
}

#[test]
fn files_processed_in_lexicographic_order() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "b.yml",
        "services:\n  zebra:\n    container_name: zebra\n",
    );
    write(
        dir.path(),
        "a.yml",
        "services:\n  alpha:\n    container_name: alpha\n",
    );
    write(dir.path(), "tpl.md", "{containers}\n{envs}");

    cmd()
        .current_dir(dir.path())
        .args(["-t", "tpl.md", "-o", "out.md"])
        .args(["b.yml", "a.yml"])
        .assert()
        .success();

    let output = fs::read_to_string(dir.path().join("out.md")).unwrap();
    let alpha = output.find("[alpha](a.yml#L3)").unwrap();
    let zebra = output.find("[zebra](b.yml#L3)").unwrap();
    assert!(alpha < zebra);
}

#[test]
fn glob_pattern_expands() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "one.yml",
        "services:\n  one:\n    container_name: one\n",
    );
    write(
        dir.path(),
        "two.yml",
        "services:\n  two:\n    container_name: two\n",
    );
    write(dir.path(), "tpl.md", "{containers}\n{envs}");

    cmd()
        .current_dir(dir.path())
        .args(["-t", "tpl.md", "-o", "out.md"])
        .arg("*.yml")
        .assert()
        .success();

    let output = fs::read_to_string(dir.path().join("out.md")).unwrap();
    assert!(output.contains("[one](one.yml#L3)"));
    assert!(output.contains("[two](two.yml#L3)"));
}

// -- footnotes --

#[test]
fn tunnel_service_gets_footnote() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "docker-compose.yml",
        "services:\n  vpn-client:\n    container_name: vpn-client\n    network_mode: service:tunnel\n",
    );
    write(dir.path(), "tpl.md", "{containers}\n{envs}");

    cmd()
        .current_dir(dir.path())
        .args(["-t", "tpl.md", "-o", "out.md"])
        .arg("docker-compose.yml")
        .assert()
        .success();

    let output = fs::read_to_string(dir.path().join("out.md")).unwrap();
    assert!(output.contains("| [vpn-client](docker-compose.yml#L3) <sup>1</sup> |"));
    assert!(output
        .contains("<sup>1</sup>All traffic is routed via tunnel VPN client container."));
}

// -- recovered failures --

#[test]
fn unparsable_file_is_skipped_with_logged_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "bad.yml", "services: [not: {valid\n");
    write(dir.path(), "good.yml", WEB_COMPOSE);
    write(dir.path(), "tpl.md", "{containers}\n{envs}");

    cmd()
        .current_dir(dir.path())
        .args(["-t", "tpl.md", "-o", "out.md"])
        .args(["bad.yml", "good.yml"])
        .assert()
        .success()
        .stderr(predicate::str::contains("failed to parse yaml"));

    let output = fs::read_to_string(dir.path().join("out.md")).unwrap();
    assert!(output.contains("[web](good.yml#L3)"));
}

#[test]
fn missing_declaration_line_skips_row() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "docker-compose.yml",
        "services:\n  ghost:\n    image: example/ghost\n",
    );
    write(dir.path(), "tpl.md", "{containers}\n{envs}");

    cmd()
        .current_dir(dir.path())
        .args(["-t", "tpl.md", "-o", "out.md"])
        .arg("docker-compose.yml")
        .assert()
        .success()
        .stderr(predicate::str::contains("no 'container_name: ghost' line"));

    let output = fs::read_to_string(dir.path().join("out.md")).unwrap();
    assert!(!output.contains("ghost"));
}

// -- aborting failures --

#[test]
fn missing_template_fails() {
    let dir = TempDir::new().unwrap();

    cmd()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read template"));
}

#[test]
fn unknown_placeholder_fails() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "tpl.md", "{containers}\n{bogus}\n{envs}");

    cmd()
        .current_dir(dir.path())
        .args(["-t", "tpl.md", "-o", "out.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown placeholder {bogus}"));
}

#[test]
fn env_line_without_separator_fails() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), ".env.bad", "NOT A VARIABLE\n");
    write(dir.path(), "tpl.md", "{containers}\n{envs}");

    cmd()
        .current_dir(dir.path())
        .args(["-t", "tpl.md", "-o", "out.md"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing '=' separator"));
}

// -- env file ordering --

#[test]
fn env_files_processed_in_lexicographic_order() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), ".env.b", "SECOND=2\n");
    write(dir.path(), ".env.a", "FIRST=1\n");
    write(dir.path(), "tpl.md", "{containers}\n{envs}");

    cmd()
        .current_dir(dir.path())
        .args(["-t", "tpl.md", "-o", "out.md"])
        .assert()
        .success();

    let output = fs::read_to_string(dir.path().join("out.md")).unwrap();
    let first = output.find("| `FIRST` |").unwrap();
    let second = output.find("| `SECOND` |").unwrap();
    assert!(first < second);
}
