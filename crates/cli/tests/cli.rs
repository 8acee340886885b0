use assert_cmd::Command;
use std::fs;
use std::path::Path;

fn cmd() -> Command {
    Command::cargo_bin("corpus-audit").unwrap()
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn skill(root: &Path, slug: &str, related: &[&str]) {
    let related_yaml = if related.is_empty() {
        String::new()
    } else {
        let items: Vec<String> = related.iter().map(|r| format!("  - {r}")).collect();
        format!("related_skills:\n{}\n", items.join("\n"))
    };
    write(
        root,
        &format!("skills/{slug}/SKILL.md"),
        &format!(
            "---\nname: {slug}\ndescription: Working notes for the {slug} skill.\ncategory: general\n{related_yaml}---\n# {slug}\n## Level 2: Core\nbody\n## Level 3: Reference\nrefs\n"
        ),
    );
}

#[test]
fn clean_corpus_audit_passes() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "README.md", "# Root\n[a](./docs/a.md)\n");
    write(
        dir.path(),
        "docs/a.md",
        "# A\n[back](../README.md)\n## Level 2: Core\nx\n## Level 3: Reference\ny\n",
    );

    let assert = cmd()
        .args(["--root", dir.path().to_str().unwrap(), "audit"])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("result: PASS"), "stdout: {stdout}");
}

#[test]
fn broken_link_fails_the_audit() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "README.md", "# Root\n[gone](./missing.md)\n");

    let assert = cmd()
        .args(["--root", dir.path().to_str().unwrap(), "audit"])
        .assert()
        .code(1);
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("broken links"), "stdout: {stdout}");
}

#[test]
fn empty_corpus_exits_2() {
    let dir = tempfile::tempdir().unwrap();
    cmd()
        .args(["--root", dir.path().to_str().unwrap(), "audit"])
        .assert()
        .code(2);
}

#[test]
fn audit_json_output_carries_the_verdict() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "README.md", "# Root\n[gone](./missing.md)\n");

    let assert = cmd()
        .args(["--root", dir.path().to_str().unwrap(), "--json", "audit"])
        .assert()
        .code(1);
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["verdict"]["passed"], serde_json::Value::Bool(false));
    assert_eq!(value["report"]["graph"]["broken_links"][0]["raw_target"], "./missing.md");
}

#[test]
fn resolve_prints_dependencies_first() {
    let dir = tempfile::tempdir().unwrap();
    skill(dir.path(), "alpha", &["beta"]);
    skill(dir.path(), "beta", &[]);
    skill(dir.path(), "gamma", &["beta"]);

    let assert = cmd()
        .args([
            "--root",
            dir.path().to_str().unwrap(),
            "resolve",
            "alpha",
            "gamma",
        ])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("@load skills:[beta,alpha,gamma]"), "stdout: {stdout}");
}

#[test]
fn resolve_cycle_exits_1() {
    let dir = tempfile::tempdir().unwrap();
    skill(dir.path(), "a", &["b"]);
    skill(dir.path(), "b", &["a"]);

    let assert = cmd()
        .args(["--root", dir.path().to_str().unwrap(), "resolve", "a"])
        .assert()
        .code(1);
    let stderr = String::from_utf8(assert.get_output().stderr.clone()).unwrap();
    assert!(stderr.contains("dependency cycle"), "stderr: {stderr}");
}

#[test]
fn search_ranks_skills() {
    let dir = tempfile::tempdir().unwrap();
    skill(dir.path(), "api-security", &[]);
    skill(dir.path(), "unit-testing", &[]);

    let assert = cmd()
        .args([
            "--root",
            dir.path().to_str().unwrap(),
            "--json",
            "search",
            "api security",
        ])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["hits"][0]["slug"], "api-security");
}

#[test]
fn tokens_reports_violations_with_exit_1() {
    let dir = tempfile::tempdir().unwrap();
    // Rules cap level1 low enough that the document overflows it.
    write(dir.path(), "audit-rules.toml", "[token_limits]\nlevel1 = 2\n");
    write(
        dir.path(),
        "doc.md",
        "a long level one introduction well past two tokens\n## Level 2\nok\n## Level 3\nok\n",
    );

    let assert = cmd()
        .args(["--root", dir.path().to_str().unwrap(), "tokens", "doc.md"])
        .assert()
        .code(1);
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(stdout.contains("over budget"), "stdout: {stdout}");
}

#[test]
fn recommend_uses_the_product_matrix() {
    let dir = tempfile::tempdir().unwrap();
    skill(dir.path(), "api-security", &[]);
    write(
        dir.path(),
        "audit-rules.toml",
        "[product_skill_map]\napi = [\"api-security\", \"ghost-skill\"]\n",
    );

    let assert = cmd()
        .args([
            "--root",
            dir.path().to_str().unwrap(),
            "--json",
            "recommend",
            "api",
        ])
        .assert()
        .success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(value["slugs"][0], "api-security");
    assert_eq!(value["unknown"][0]["slug"], "ghost-skill");
}
