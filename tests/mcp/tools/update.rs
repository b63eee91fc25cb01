use codemap::mcp::{CodemapMcpServer, types::UpdateMapParams};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::json;

use crate::{
    MAP_FILE, MODULE_FILE, McpTestFixture, extract_tool_result_json, fixture_configurator,
    fixture_with_curated_map,
};

fn params(fixture: &McpTestFixture, dry_run: Option<bool>) -> Parameters<UpdateMapParams> {
    Parameters(UpdateMapParams {
        project_root_path: fixture.root(),
        dry_run,
    })
}

// ============================================================================
// update_map tests
// ============================================================================

#[tokio::test]
async fn test_update_map_writes_outputs() {
    let fixture = fixture_configurator().unwrap();
    let server = CodemapMcpServer::new();

    let result = server.update_map(params(&fixture, None)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["written"], true);
    assert_eq!(json_result["filesScanned"], 4);
    assert_eq!(json_result["elementCount"], 5);
    assert_eq!(json_result["added"].as_array().unwrap().len(), 5);
    assert_eq!(json_result["removed"], json!([]));

    assert!(fixture.root_path().join(MODULE_FILE).exists());
    let map = fixture.read_map().unwrap();
    assert_eq!(map["elements"][1]["name"], "renderChat");
    assert_eq!(map["elements"][1]["description"], "Renders the chat panel");
    assert_eq!(map["elements"][1]["categories"], json!(["CHAT", "UI"]));
}

#[tokio::test]
async fn test_update_map_dry_run() {
    let fixture = fixture_configurator().unwrap();
    let server = CodemapMcpServer::new();

    let result = server
        .update_map(params(&fixture, Some(true)))
        .await
        .unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["written"], false);
    assert_eq!(json_result["elementCount"], 5);
    assert!(!fixture.root_path().join(MAP_FILE).exists());
    assert!(!fixture.root_path().join(MODULE_FILE).exists());
}

#[tokio::test]
async fn test_update_map_preserves_and_removes() {
    let fixture = fixture_with_curated_map().unwrap();
    let server = CodemapMcpServer::new();

    let result = server.update_map(params(&fixture, None)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["updated"], json!(["evaluate"]));
    assert_eq!(json_result["removed"], json!(["legacyEvaluate"]));
    assert_eq!(json_result["unchangedCount"], 0);

    let map = fixture.read_map().unwrap();
    assert_eq!(
        map["elements"],
        json!([{
            "name": "evaluate",
            "file": "scripts/logic.js",
            "type": "function",
            "signature": "(selections, rules) => void",
            "description": "Runs the rule engine",
            "dependencies": ["rules"],
            "sideEffects": false,
            "categories": ["FACET", "LOGIC"]
        }])
    );
}

#[tokio::test]
async fn test_update_map_second_run_is_unchanged() {
    let fixture = fixture_configurator().unwrap();
    let server = CodemapMcpServer::new();

    server.update_map(params(&fixture, None)).await.unwrap();
    let result = server.update_map(params(&fixture, None)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    assert_eq!(json_result["added"], json!([]));
    assert_eq!(json_result["updated"], json!([]));
    assert_eq!(json_result["unchangedCount"], 5);
}

#[tokio::test]
async fn test_update_map_reports_warnings() {
    let fixture = fixture_configurator().unwrap();
    fixture
        .write_source("scripts/ui/duplicate.js", "export function renderChat() {}\n")
        .unwrap();
    let server = CodemapMcpServer::new();

    let result = server.update_map(params(&fixture, None)).await.unwrap();
    let json_result = extract_tool_result_json(&result);

    let warnings = json_result["warnings"].as_array().unwrap();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].as_str().unwrap().contains("\"renderChat\""));
}

#[tokio::test]
async fn test_update_map_missing_scan_root() {
    let fixture = McpTestFixture::new().unwrap();
    fixture.write_config(&json!({ "scanRoot": "web" })).unwrap();
    let server = CodemapMcpServer::new();

    let result = server.update_map(params(&fixture, None)).await;

    let err = result.unwrap_err();
    assert!(err.message.contains("Scan root is not a directory"));
    assert!(!fixture.root_path().join(MAP_FILE).exists());
}
