#![deny(missing_docs)]

//! # Parameters Command
//!
//! Loads a metadata model and prints every parameter the core generates for it:
//! the shared catalog plus the per-target query options, key parameters and
//! function import parameters.

use crate::error::{CliError, CliResult};
use odata_openapi_core::{
    collection_query_parameters, create_function_import_parameters, create_key_parameters,
    entity_query_parameters, EdmModel, GenerationSettings, KeySegment, NavigationSource,
    ODataContext, ParameterCatalog,
};
use serde_json::{json, Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Arguments for the parameters command.
#[derive(clap::Args, Debug, Clone)]
pub struct ParametersArgs {
    /// Path to the metadata model (.yaml/.yml or .json).
    #[clap(long)]
    pub model: PathBuf,

    /// Optional settings file (.yaml/.yml or .json). Flags override its values.
    #[clap(long)]
    pub settings: Option<PathBuf>,

    /// Example value advertised on the shared `$top` parameter.
    #[clap(long, env = "ODATA_OPENAPI_TOP_EXAMPLE")]
    pub top_example: Option<u32>,

    /// Prefix key parameter names with the entity type name (`Order-Id0`).
    /// Accepts `true/false`, `1/0`, `yes/no` or `on/off`; a bare flag means `true`.
    #[clap(
        long,
        env = "ODATA_OPENAPI_PREFIX_KEY",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub prefix_entity_type_name: Option<bool>,

    /// Output path. Supports .json and .yaml/.yml extensions.
    /// If not provided, prints JSON to stdout.
    #[clap(long)]
    pub output: Option<PathBuf>,
}

/// Executes the parameters command.
pub fn execute(args: &ParametersArgs) -> CliResult<()> {
    let model = load_model(&args.model)?;
    let settings = resolve_settings(args)?;
    tracing::info!(
        namespace = %model.namespace,
        top_example = settings.top_example,
        "generating parameters"
    );

    let document = build_document(&model, &settings)?;

    let output_str = match args.output.as_deref().map(is_yaml) {
        Some(true) => serde_yaml::to_string(&document)
            .map_err(|e| CliError::General(format!("YAML serialization failed: {}", e)))?,
        _ => serde_json::to_string_pretty(&document)
            .map_err(|e| CliError::General(format!("JSON serialization failed: {}", e)))?,
    };

    if let Some(out_path) = &args.output {
        if let Some(parent) = out_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(out_path, output_str)?;
        tracing::info!(path = ?out_path, "parameters written");
    } else {
        println!("{}", output_str);
    }

    Ok(())
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn load_model(path: &Path) -> CliResult<EdmModel> {
    let content = fs::read_to_string(path)?;
    let model = if is_yaml(path) {
        EdmModel::from_yaml_str(&content)?
    } else {
        EdmModel::from_json_str(&content)?
    };
    Ok(model)
}

fn resolve_settings(args: &ParametersArgs) -> CliResult<GenerationSettings> {
    let mut settings = match &args.settings {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            if is_yaml(path) {
                serde_yaml::from_str(&content)
                    .map_err(|e| CliError::General(format!("Invalid settings file: {}", e)))?
            } else {
                serde_json::from_str(&content)
                    .map_err(|e| CliError::General(format!("Invalid settings file: {}", e)))?
            }
        }
        None => GenerationSettings::default(),
    };

    if let Some(top) = args.top_example {
        settings.top_example = top;
    }
    if let Some(prefix) = args.prefix_entity_type_name {
        settings.prefix_entity_type_name_before_key = prefix;
    }
    Ok(settings)
}

fn to_json<T: serde::Serialize>(value: &T) -> CliResult<Value> {
    serde_json::to_value(value)
        .map_err(|e| CliError::General(format!("JSON serialization failed: {}", e)))
}

/// Assembles the output document for `model`.
pub fn build_document(model: &EdmModel, settings: &GenerationSettings) -> CliResult<Value> {
    let ctx = ODataContext::new(model, settings);
    let catalog = ParameterCatalog::build(settings);

    let mut entity_sets = Map::new();
    for set in &model.container.entity_sets {
        let source = NavigationSource::EntitySet(set);
        let key = KeySegment::resolve(model, &set.entity_type, 0)?;
        entity_sets.insert(
            set.name.clone(),
            json!({
                "collection": to_json(&collection_query_parameters(&ctx, &source)?)?,
                "entity": to_json(&entity_query_parameters(&ctx, &source)?)?,
                "key": to_json(&create_key_parameters(&ctx, &key)?)?,
            }),
        );
    }

    let mut singletons = Map::new();
    for singleton in &model.container.singletons {
        let source = NavigationSource::Singleton(singleton);
        singletons.insert(
            singleton.name.clone(),
            json!({ "entity": to_json(&entity_query_parameters(&ctx, &source)?)? }),
        );
    }

    let mut function_imports = Map::new();
    for import in &model.container.function_imports {
        function_imports.insert(
            import.name.clone(),
            to_json(&create_function_import_parameters(&ctx, import)?)?,
        );
    }

    Ok(json!({
        "components": { "parameters": catalog.to_components_json()? },
        "entitySets": entity_sets,
        "singletons": singletons,
        "functionImports": function_imports,
    }))
}
