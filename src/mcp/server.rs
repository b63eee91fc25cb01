use std::path::PathBuf;

use anyhow::Result;
use rmcp::{
    ErrorData as McpError, ServerHandler, ServiceExt,
    handler::server::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router,
};
use serde::Serialize;

use crate::{
    cli::args::CommonArgs,
    core::{UpdateContext, emit::write_outputs, plan_update, store::load_map},
};

use super::types::{
    ConfigDto, GetConfigParams, GetMapParams, LookupElementParams, MapResult, Pagination,
    UpdateMapParams, UpdateMapResult,
};

const DEFAULT_PAGE_SIZE: usize = 50;
const MAX_PAGE_SIZE: usize = 200;

#[derive(Clone)]
pub struct CodemapMcpServer {
    tool_router: ToolRouter<Self>,
}

impl Default for CodemapMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_router]
impl CodemapMcpServer {
    pub fn new() -> Self {
        Self {
            tool_router: Self::tool_router(),
        }
    }

    /// Get the effective codemap configuration
    #[tool(description = "Get the effective codemap configuration and the resolved project root.")]
    pub async fn get_config(
        &self,
        params: Parameters<GetConfigParams>,
    ) -> Result<CallToolResult, McpError> {
        let ctx = context_for(&params.0.project_root_path)?;

        json_result(&ConfigDto {
            from_file: ctx.config_path.is_some(),
            project_root: ctx.root_dir.to_string_lossy().to_string(),
            config: ctx.config,
        })
    }

    /// Read the persisted codebase map
    #[tool(
        description = "Read exported elements from the persisted codebase map, optionally filtered by category or file. Returns a paginated list."
    )]
    pub async fn get_map(
        &self,
        params: Parameters<GetMapParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let ctx = context_for(&params.project_root_path)?;
        let limit = params
            .limit
            .map(|v| v as usize)
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .min(MAX_PAGE_SIZE);
        let offset = params.offset.map(|v| v as usize).unwrap_or(0);

        let map_path = ctx.map_path();
        let map_file = ctx.relative(&map_path);
        let loaded = load_map(&map_path, &map_file)
            .map_err(|e| McpError::internal_error(format!("Failed to load map: {}", e), None))?;

        let mut warnings: Vec<String> = loaded
            .diagnostics
            .iter()
            .map(|d| d.message())
            .collect();
        if !loaded.existed {
            warnings.push(format!(
                "{} does not exist yet; run update_map first",
                map_file
            ));
        }

        let category = params.category.as_deref().map(str::to_lowercase);
        let matching: Vec<_> = loaded
            .map
            .elements
            .into_iter()
            .filter(|el| {
                category
                    .as_ref()
                    .is_none_or(|c| el.categories.iter().any(|tag| tag.to_lowercase() == *c))
            })
            .filter(|el| {
                params
                    .file
                    .as_ref()
                    .is_none_or(|f| el.file.contains(f.as_str()))
            })
            .collect();

        let total_count = matching.len();
        let items: Vec<_> = matching.into_iter().skip(offset).take(limit).collect();
        let has_more = offset + items.len() < total_count;

        json_result(&MapResult {
            map_file,
            warnings,
            total_count,
            items,
            pagination: Pagination {
                offset,
                limit,
                has_more,
            },
        })
    }

    /// Look up one element by name
    #[tool(description = "Get a single element of the persisted codebase map by its exact name.")]
    pub async fn lookup_element(
        &self,
        params: Parameters<LookupElementParams>,
    ) -> Result<CallToolResult, McpError> {
        let ctx = context_for(&params.0.project_root_path)?;
        let map_path = ctx.map_path();
        let loaded = load_map(&map_path, &ctx.relative(&map_path))
            .map_err(|e| McpError::internal_error(format!("Failed to load map: {}", e), None))?;

        match loaded.map.find(&params.0.name) {
            Some(element) => json_result(element),
            None => Err(McpError::invalid_params(
                format!("No element named \"{}\" in the codebase map", params.0.name),
                None,
            )),
        }
    }

    /// Rescan sources and rewrite the map
    #[tool(
        description = "Rescan the source tree, merge into the codebase map and regenerate the module. Elements whose declaration is gone are removed. Use dryRun to preview."
    )]
    pub async fn update_map(
        &self,
        params: Parameters<UpdateMapParams>,
    ) -> Result<CallToolResult, McpError> {
        let ctx = context_for(&params.0.project_root_path)?;
        let dry_run = params.0.dry_run.unwrap_or(false);

        let plan = plan_update(&ctx, &mut |_| {})
            .map_err(|e| McpError::internal_error(format!("Update failed: {:#}", e), None))?;

        if !dry_run {
            write_outputs(&plan.outputs, &ctx.map_path(), &ctx.module_path())
                .map_err(|e| McpError::internal_error(format!("Write failed: {:#}", e), None))?;
        }

        let warnings = plan.diagnostics().iter().map(|d| d.message()).collect();
        json_result(&UpdateMapResult {
            written: !dry_run,
            files_scanned: plan.scan.files_scanned,
            element_count: plan.merge.map.elements.len(),
            added: plan.merge.added,
            updated: plan.merge.changed,
            unchanged_count: plan.merge.unchanged,
            removed: plan.merge.removed,
            warnings,
        })
    }
}

fn context_for(project_root_path: &str) -> Result<UpdateContext, McpError> {
    let args = CommonArgs {
        root: Some(PathBuf::from(project_root_path)),
        ..Default::default()
    };
    UpdateContext::new(&args)
        .map_err(|e| McpError::internal_error(format!("Failed to initialize: {:#}", e), None))
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json_str = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(format!("JSON serialization failed: {}", e), None)
    })?;

    Ok(CallToolResult::success(vec![Content::text(json_str)]))
}

#[tool_handler]
impl ServerHandler for CodemapMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "Codemap MCP gives AI agents a map of the exported constants, functions and classes of a JavaScript project.\n\n\
                 Available tools:\n\
                 1. get_config - Get the effective configuration and project root\n\
                 2. get_map - List elements of the codebase map (filter by category or file, paginated)\n\
                 3. lookup_element - Get one element by name\n\
                 4. update_map - Rescan sources and rewrite the map (dryRun to preview)\n\n\
                 Elements carry hand-written fields (description, dependencies, sideEffects) that survive updates.\n\
                 update_map removes elements whose declaration no longer exists in source."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

/// Entry point for MCP server
pub fn run_server() -> Result<()> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(async {
            let service = CodemapMcpServer::new();
            let server = service.serve(rmcp::transport::stdio()).await?;
            server.waiting().await?;
            Ok(())
        })
}
