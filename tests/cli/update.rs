use anyhow::Result;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, MAP_FILE, MODULE_FILE, run};

const FOO_SOURCE: &str = r#"import { log } from './logger.js';

// @desc Computes foo
export function foo(a, b) {
    return a + b;
}
"#;

#[test]
fn test_update_from_empty_map() -> Result<()> {
    let test = CliTest::with_file("scripts/utils/math.js", FOO_SOURCE)?;

    let outcome = run(test.command())?;

    assert_eq!(outcome.code, Some(0), "stderr: {}", outcome.stderr);
    assert!(outcome.stdout.contains("Scanning scripts..."));
    assert!(outcome.stdout.contains("Found 1 exported element in 1 file."));
    assert!(outcome.stdout.contains("Loading existing map from code_control/codebase-map.json..."));
    assert!(outcome.stdout.contains("Merging data..."));
    assert!(outcome.stdout.contains("Writing to code_control/codebase-map.json..."));
    assert!(outcome.stdout.contains("Generating module at scripts/utils/codebaseMap.js..."));
    assert!(outcome.stdout.contains("Update complete (1 element)"));

    assert_eq!(
        test.read_map()?,
        json!({
            "template-to-follow": [],
            "elements": [{
                "name": "foo",
                "file": "scripts/utils/math.js",
                "type": "function",
                "signature": "(a, b) => void",
                "description": "Computes foo",
                "dependencies": [],
                "sideEffects": false,
                "categories": ["UTILS"]
            }]
        })
    );

    let module = test.read_file(MODULE_FILE)?;
    assert!(module.starts_with("/**\n * Codebase Map (Auto-generated)\n"));
    assert!(module.contains("DO NOT EDIT MANUALLY"));
    assert!(module.contains("export const CODEBASE_MAP = {\n"));
    assert!(module.ends_with("};\n"));

    Ok(())
}

#[test]
fn test_explicit_update_subcommand() -> Result<()> {
    let test = CliTest::with_file("scripts/app.js", "export class App {}\n")?;

    let mut cmd = test.command();
    cmd.arg("update");
    let outcome = run(cmd)?;

    assert_eq!(outcome.code, Some(0));
    assert_eq!(
        test.read_map()?["elements"][0]["categories"],
        json!(["APP"])
    );
    Ok(())
}

#[test]
fn test_rerun_is_byte_identical() -> Result<()> {
    let test = CliTest::with_file("scripts/utils/math.js", FOO_SOURCE)?;
    test.write_file(
        "scripts/ui/chat.js",
        "export function renderChat(selections, engineResult) {}\n",
    )?;

    run(test.command())?;
    let first_map = test.read_file(MAP_FILE)?;
    let first_module = test.read_file(MODULE_FILE)?;

    let second = run(test.command())?;

    assert_eq!(second.code, Some(0));
    assert!(second.stdout.contains("0 added, 0 updated, 2 unchanged, 0 removed"));
    assert_eq!(test.read_file(MAP_FILE)?, first_map);
    assert_eq!(test.read_file(MODULE_FILE)?, first_module);
    Ok(())
}

#[test]
fn test_curated_fields_survive_update() -> Result<()> {
    let test = CliTest::with_file(
        "scripts/ui/renderer.js",
        "export function render(state) {}\n",
    )?;
    test.write_file(
        MAP_FILE,
        json!({
            "template-to-follow": [{ "name": "example", "description": "..." }],
            "elements": [{
                "name": "render",
                "file": "scripts/old.js",
                "type": "constant",
                "signature": "N/A",
                "description": "Redraws the configurator",
                "dependencies": ["state"],
                "sideEffects": true,
                "categories": ["OLD"],
                "owner": "frontend"
            }]
        })
        .to_string(),
    )?;

    let outcome = run(test.command())?;
    assert_eq!(outcome.code, Some(0), "stderr: {}", outcome.stderr);

    let map = test.read_map()?;
    assert_eq!(
        map["template-to-follow"],
        json!([{ "name": "example", "description": "..." }])
    );
    assert_eq!(
        map["elements"][0],
        json!({
            "name": "render",
            "file": "scripts/ui/renderer.js",
            "type": "function",
            "signature": "(state) => void",
            "description": "Redraws the configurator",
            "dependencies": ["state"],
            "sideEffects": true,
            "categories": ["UI"],
            "owner": "frontend"
        })
    );
    Ok(())
}

#[test]
fn test_removed_elements_are_reported() -> Result<()> {
    let test = CliTest::with_file(
        "scripts/logic.js",
        "export function evaluate(selections) {}\n",
    )?;
    test.write_file(
        MAP_FILE,
        json!({ "elements": [{ "name": "ghost", "file": "scripts/logic.js" }] }).to_string(),
    )?;

    let outcome = run(test.command())?;

    assert_eq!(outcome.code, Some(0));
    assert!(outcome.stdout.contains("1 added, 0 updated, 0 unchanged, 1 removed"));
    assert!(outcome.stdout.contains("removed: ghost (no longer found in source)"));
    let map = test.read_map()?;
    assert_eq!(map["elements"].as_array().map(Vec::len), Some(1));
    assert_eq!(map["elements"][0]["name"], "evaluate");
    Ok(())
}

#[test]
fn test_corrupt_map_is_replaced_with_warning() -> Result<()> {
    let test = CliTest::with_file("scripts/constants.js", "export const FACET_ORDER = [];\n")?;
    test.write_file(MAP_FILE, "{ not json")?;

    let outcome = run(test.command())?;

    assert_eq!(outcome.code, Some(0));
    assert!(
        outcome
            .stderr
            .contains("warning: Could not decode code_control/codebase-map.json"),
        "stderr: {}",
        outcome.stderr
    );
    assert_eq!(
        test.read_map()?["elements"][0]["categories"],
        json!(["CONSTANTS"])
    );
    Ok(())
}

#[test]
fn test_unreadable_file_is_skipped() -> Result<()> {
    let test = CliTest::with_file("scripts/app.js", "export const A = 1;\n")?;
    test.write_file("scripts/binary.js", [0xff_u8, 0xfe, 0x00, 0x41])?;

    let quiet = run(test.command())?;
    assert_eq!(quiet.code, Some(0));
    assert!(quiet.stdout.contains("Found 1 exported element in 1 file."));
    assert!(quiet.stderr.contains("1 file(s) could not be read (use -v for details)"));

    let mut cmd = test.command();
    cmd.arg("-v");
    let verbose = run(cmd)?;
    assert!(verbose.stderr.contains("warning: Skipping scripts/binary.js:"));
    Ok(())
}

#[test]
fn test_duplicate_names_warn_and_last_wins() -> Result<()> {
    let test = CliTest::with_file("scripts/a.js", "export function init() {}\n")?;
    test.write_file("scripts/b.js", "export function init(options) {}\n")?;

    let outcome = run(test.command())?;

    assert_eq!(outcome.code, Some(0));
    assert!(outcome.stderr.contains(
        "\"init\" is declared in both scripts/a.js and scripts/b.js; keeping the one in scripts/b.js"
    ));
    let map = test.read_map()?;
    assert_eq!(map["elements"][0]["signature"], "(options) => void");
    Ok(())
}

#[test]
fn test_missing_scan_root_is_an_error() -> Result<()> {
    let test = CliTest::new()?;

    let outcome = run(test.command())?;

    assert_eq!(outcome.code, Some(2));
    assert!(outcome.stderr.contains("Scan root is not a directory"));
    assert!(!test.root().join(MAP_FILE).exists());
    Ok(())
}

#[test]
fn test_config_file_settings() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".codemaprc.json",
        r#"{
            "scanRoot": "web",
            "mapFile": "map.json",
            "moduleFile": "web/generated/map.js",
            "moduleExportName": "MAP",
            "categoryRules": [{ "pathContains": "web/widgets/", "categories": ["WIDGET"] }]
        }"#,
    )?;
    test.write_file("web/widgets/button.js", "export class Button {}\n")?;

    let outcome = run(test.command())?;
    assert_eq!(outcome.code, Some(0), "stderr: {}", outcome.stderr);

    let map: serde_json::Value = serde_json::from_str(&test.read_file("map.json")?)?;
    assert_eq!(map["elements"][0]["file"], "web/widgets/button.js");
    assert_eq!(map["elements"][0]["categories"], json!(["WIDGET"]));
    assert!(test.read_file("web/generated/map.js")?.contains("export const MAP = "));

    // The generated module lives under the scan root but is never scanned.
    let rerun = run(test.command())?;
    assert!(rerun.stdout.contains("Found 1 exported element in 1 file."));
    Ok(())
}

#[test]
fn test_cli_overrides_config() -> Result<()> {
    let test = CliTest::with_file("src/app.js", "export const A = 1;\n")?;

    let mut cmd = test.command();
    cmd.args(["--scan-root", "src", "--map-file", "out/map.json"]);
    let outcome = run(cmd)?;

    assert_eq!(outcome.code, Some(0), "stderr: {}", outcome.stderr);
    assert!(test.root().join("out/map.json").exists());
    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file("scripts/app.js", "export const A = 1;\n")?;
    test.write_file(".codemaprc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let outcome = run(test.command())?;

    assert_eq!(outcome.code, Some(2));
    assert!(outcome.stderr.contains("Invalid glob pattern in 'ignores'"));
    Ok(())
}

#[test]
fn test_malformed_map_entry_is_dropped_with_warning() -> Result<()> {
    let test = CliTest::with_file(
        "scripts/logic.js",
        "export function evaluate(selections) {}\n",
    )?;
    test.write_file(
        MAP_FILE,
        json!({
            "elements": [
                { "file": "scripts/logic.js", "description": "no name" },
                { "name": "evaluate", "description": "Runs the rule engine", "sideEffects": "no" }
            ]
        })
        .to_string(),
    )?;

    let outcome = run(test.command())?;

    assert_eq!(outcome.code, Some(0));
    assert!(
        outcome
            .stderr
            .contains("warning: Ignoring elements[0] in code_control/codebase-map.json"),
        "stderr: {}",
        outcome.stderr
    );
    let map = test.read_map()?;
    assert_eq!(map["elements"][0]["description"], "Runs the rule engine");
    assert_eq!(map["elements"][0]["sideEffects"], false);
    Ok(())
}
