//! Integration tests for the gatekeeper binary.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn gatekeeper(project: &Path, args: &[&str]) -> Output {
    // An empty global dir keeps a developer's ~/.gatekeeper out of the tests.
    let global = project.join(".no-global-config");
    Command::new(env!("CARGO_BIN_EXE_gatekeeper"))
        .arg("--root")
        .arg(project)
        .args(args)
        .env("GATEKEEPER_CONFIG_DIR", global)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run gatekeeper")
}

fn write(base: &Path, rel: &str, content: &str) {
    let path = base.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn clean_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    write(
        tmp.path(),
        "src/components/Button.tsx",
        "export const Button = () => <button className=\"btn\">Go</button>;\n",
    );
    tmp
}

#[test]
fn clean_project_passes() {
    let tmp = clean_project();
    let output = gatekeeper(tmp.path(), &["check"]);

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(stdout(&output).contains("Gate passed: 0 violations in 1 file(s) scanned"));
}

#[test]
fn violation_fails_with_guidance_on_stderr() {
    let tmp = clean_project();
    write(tmp.path(), "src/components/Card.css", ".card {\n  color: #FF0000;\n}\n");

    let output = gatekeeper(tmp.path(), &["check", "tokens"]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("hardcoded-value [GK001]: 1 violation(s)"), "{err}");
    assert!(err.contains("src/components/Card.css:2:10"), "{err}");
    assert!(err.contains("= fix: "), "{err}");
    assert!(err.contains("Gate FAILED"), "{err}");
    assert!(!stdout(&output).contains("Gate FAILED"));
}

#[test]
fn compact_format_prints_one_line_per_violation() {
    let tmp = clean_project();
    write(
        tmp.path(),
        "src/lib/api.ts",
        "// @ts-ignore\nexport const f = (x: any) => x as unknown as string;\n",
    );

    let output = gatekeeper(tmp.path(), &["--format", "compact", "check", "types"]);

    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    let lines: Vec<&str> = err.lines().filter(|l| l.starts_with("src/")).collect();
    assert_eq!(lines.len(), 3, "{err}");
    assert!(lines[0].starts_with("src/lib/api.ts:1:4: [GK006]"));
}

#[test]
fn json_format_is_machine_readable() {
    let tmp = clean_project();
    write(
        tmp.path(),
        "app/page.tsx",
        "export default () => { const [a] = useState(0); return a; };\n",
    );

    let output = gatekeeper(tmp.path(), &["--format", "json", "check"]);

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["passed"], false);
    assert_eq!(value["files_scanned"], 2);
    assert_eq!(value["violations"][0]["rule"], "client-directive");
    assert_eq!(value["violations"][0]["location"]["file"], "app/page.tsx");
}

#[test]
fn motion_module_is_exempt() {
    let tmp = clean_project();
    write(
        tmp.path(),
        "src/design-system/motion/Fade.tsx",
        "'use client';\nimport { motion } from 'framer-motion';\n",
    );

    let output = gatekeeper(tmp.path(), &["check", "motion"]);
    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
}

#[test]
fn unknown_category_exits_one() {
    let tmp = clean_project();
    let output = gatekeeper(tmp.path(), &["check", "colors"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unknown category"));
}

#[test]
fn no_existing_root_exits_one() {
    let tmp = TempDir::new().unwrap();
    write(tmp.path(), "other/a.ts", "");

    let output = gatekeeper(tmp.path(), &["check"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("none of the scan roots exist"));
}

#[test]
fn missing_required_root_from_config_exits_one() {
    let tmp = clean_project();
    write(tmp.path(), "gatekeeper.toml", "[scan]\nrequired_roots = [\"app\"]\n");

    let output = gatekeeper(tmp.path(), &["check"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("required scan root `app`"));
}

#[test]
fn invalid_config_exits_one() {
    let tmp = clean_project();
    write(tmp.path(), "gatekeeper.toml", "[scan]\nroots = 3\n");

    let output = gatekeeper(tmp.path(), &["check"]);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn exemption_mode_flag_overrides_config() {
    let tmp = clean_project();
    write(
        tmp.path(),
        "src/design-system/tokens-backup/old.ts",
        "export const red = '#FF0000';\n",
    );

    let lax = gatekeeper(tmp.path(), &["check", "tokens"]);
    assert_eq!(lax.status.code(), Some(0));

    let strict = gatekeeper(tmp.path(), &["--exemption-mode", "prefix", "check", "tokens"]);
    assert_eq!(strict.status.code(), Some(1));
}

#[test]
fn parse_errors_warn_or_fail() {
    let tmp = clean_project();
    write(tmp.path(), "src/lib/broken.ts", "const x: any = (;\n");

    let lenient = gatekeeper(tmp.path(), &["check", "types"]);
    assert_eq!(lenient.status.code(), Some(0));
    assert!(stderr(&lenient).contains("warning: src/lib/broken.ts"));

    let strict = gatekeeper(tmp.path(), &["--fail-on-parse-error", "check", "types"]);
    assert_eq!(strict.status.code(), Some(1));
    assert!(stderr(&strict).contains("broken.ts"));
}

#[test]
fn gate_runs_every_category() {
    let tmp = clean_project();
    write(tmp.path(), "src/ui/Spin.tsx", "import gsap from 'gsap';\n");

    let output = gatekeeper(tmp.path(), &["gate"]);

    assert_eq!(output.status.code(), Some(1));
    let out = stdout(&output);
    for category in ["tokens", "motion", "client", "types"] {
        assert!(out.contains(&format!("==> {category}")), "{out}");
    }
    let err = stderr(&output);
    assert!(err.contains("motion-import [GK002]"), "{err}");
    assert!(err.contains("1 of 4 categories FAILED: motion"), "{err}");
}

#[test]
fn gate_passes_clean_project() {
    let tmp = clean_project();
    let output = gatekeeper(tmp.path(), &["gate"]);

    assert_eq!(output.status.code(), Some(0), "{}", stderr(&output));
    assert!(stdout(&output).contains("All 4 categories passed"));
}

#[test]
fn explain_known_rule() {
    let tmp = TempDir::new().unwrap();
    let output = gatekeeper(tmp.path(), &["explain", "GK001"]);

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    assert!(out.starts_with("hardcoded-value [GK001]"));
    assert!(out.contains("src/design-system/tokens"));
}

#[test]
fn explain_unknown_rule_exits_one() {
    let tmp = TempDir::new().unwrap();
    let output = gatekeeper(tmp.path(), &["explain", "no-such-rule"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("no-such-rule"));
}

#[test]
fn usage_errors_exit_one() {
    let tmp = TempDir::new().unwrap();
    assert_eq!(gatekeeper(tmp.path(), &["explain"]).status.code(), Some(1));
    assert_eq!(gatekeeper(tmp.path(), &["frobnicate"]).status.code(), Some(1));
    assert_eq!(gatekeeper(tmp.path(), &["--help"]).status.code(), Some(0));
}

#[test]
fn list_rules_shows_all_codes() {
    let tmp = TempDir::new().unwrap();
    let output = gatekeeper(tmp.path(), &["list-rules"]);

    assert_eq!(output.status.code(), Some(0));
    let out = stdout(&output);
    for code in ["GK001", "GK002", "GK003", "GK004", "GK005", "GK006"] {
        assert!(out.contains(code), "{code} missing");
    }
}

#[test]
fn init_writes_a_usable_config() {
    let tmp = clean_project();

    assert_eq!(gatekeeper(tmp.path(), &["init"]).status.code(), Some(0));
    assert!(tmp.path().join("gatekeeper.toml").is_file());
    assert_eq!(gatekeeper(tmp.path(), &["init"]).status.code(), Some(1));
    assert_eq!(gatekeeper(tmp.path(), &["init", "--force"]).status.code(), Some(0));

    assert_eq!(gatekeeper(tmp.path(), &["check"]).status.code(), Some(0));
}

#[test]
fn category_with_every_rule_disabled_passes() {
    let tmp = clean_project();
    write(tmp.path(), "src/ui/Spin.tsx", "import gsap from 'gsap';\n");
    write(tmp.path(), "gatekeeper.toml", "[rules.motion-import]\nenabled = false\n");

    let check = gatekeeper(tmp.path(), &["check", "motion"]);
    assert_eq!(check.status.code(), Some(0), "{}", stderr(&check));

    let gate = gatekeeper(tmp.path(), &["gate"]);
    assert_eq!(gate.status.code(), Some(0), "{}", stderr(&gate));
    assert!(stdout(&gate).contains("All 4 categories passed"));
}

#[test]
fn rule_keys_written_by_init_are_not_reported_unknown() {
    let tmp = clean_project();
    assert_eq!(gatekeeper(tmp.path(), &["init"]).status.code(), Some(0));

    let output = gatekeeper(tmp.path(), &["check", "types"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(!stderr(&output).contains("unknown rule"), "{}", stderr(&output));
}

#[test]
fn misspelled_rule_key_warns_once_per_gate() {
    let tmp = clean_project();
    write(tmp.path(), "gatekeeper.toml", "[rules.hardcoded-valu]\nenabled = false\n");

    let output = gatekeeper(tmp.path(), &["gate"]);
    assert_eq!(output.status.code(), Some(0));
    let err = stderr(&output);
    assert_eq!(err.matches("unknown rule: hardcoded-valu").count(), 1, "{err}");
}

#[test]
fn gate_json_is_a_single_document() {
    let tmp = clean_project();
    write(tmp.path(), "src/ui/Spin.tsx", "import gsap from 'gsap';\n");

    let output = gatekeeper(tmp.path(), &["--format", "json", "gate"]);

    assert_eq!(output.status.code(), Some(1));
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["passed"], false);
    assert_eq!(value["summary"], "1 of 4 categories FAILED: motion");
    let categories = value["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 4);
    assert_eq!(categories[1]["category"], "motion");
    assert_eq!(categories[1]["passed"], false);
    assert_eq!(categories[1]["report"]["violations"][0]["rule"], "motion-import");
    assert_eq!(categories[0]["report"]["passed"], true);
}
