use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::{debug, info};
use std::path::{Path, PathBuf};

/// OpenAPI from Actions - Generate an OpenAPI document from a description of a web API's actions
#[derive(Parser, Debug)]
#[command(name = "openapi-from-actions")]
#[command(author, version, about, long_about = None)]
pub struct CliArgs {
    /// Action model file (.json, .yaml, .yml) or a directory of model files
    #[arg(value_name = "MODEL_PATH")]
    pub model_path: PathBuf,

    /// Output format (json or yaml)
    #[arg(short = 'f', long = "format", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Output file path (if not specified, outputs to stdout)
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output_path: Option<PathBuf>,

    /// Document title (defaults to the model file or directory name)
    #[arg(short = 't', long = "title")]
    pub title: Option<String>,

    /// Document version
    #[arg(long = "api-version", default_value = "1.0")]
    pub api_version: String,

    /// Enable verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format options
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

/// Validate and log already-parsed arguments
pub fn parse_args_from_parsed(args: CliArgs) -> Result<CliArgs> {
    debug!("Parsed arguments: {:?}", args);

    if !args.model_path.exists() {
        anyhow::bail!("Model path does not exist: {}", args.model_path.display());
    }

    info!("Model path: {}", args.model_path.display());
    info!("Output format: {:?}", args.output_format);
    match &args.output_path {
        Some(output) => info!("Output file: {}", output.display()),
        None => info!("Output: stdout"),
    }

    Ok(args)
}

/// Title used when none is given: the model path's stem, minus an `.actions` suffix.
pub fn default_title(model_path: &Path) -> String {
    model_path
        .file_stem()
        .map(|stem| stem.to_string_lossy())
        .map(|stem| stem.trim_end_matches(".actions").to_string())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| "API".to_string())
}

/// Run the main workflow
pub fn run(args: CliArgs) -> Result<()> {
    use crate::model::ModelLoader;
    use crate::openapi_builder::{build_document, Info};
    use crate::scanner::ModelScanner;
    use crate::serializer::{serialize_json, serialize_yaml, write_to_file};

    info!("Starting OpenAPI document generation...");

    // Step 1: Collect model files
    let scanner = ModelScanner::new(args.model_path.clone());
    let scan_result = scanner.scan()?;
    for warning in &scan_result.warnings {
        log::warn!("{}", warning);
    }
    if scan_result.model_files.is_empty() {
        anyhow::bail!(
            "No action model files (.json, .yaml, .yml) found in {}",
            args.model_path.display()
        );
    }
    info!("Found {} model files", scan_result.model_files.len());

    // Step 2: Load and merge them
    let model = ModelLoader::load_files(&scan_result.model_files)
        .context("Failed to load the action model")?;
    info!(
        "Loaded {} actions and {} composite types",
        model.actions.len(),
        model.types.len()
    );
    if model.actions.is_empty() {
        log::warn!("The action model contains no actions");
    }

    // Step 3: Build the document
    let info = Info {
        title: args
            .title
            .clone()
            .unwrap_or_else(|| default_title(&args.model_path)),
        version: args.api_version.clone(),
    };
    let document = build_document(&model, info);
    info!(
        "Built document with {} paths and {} schemas",
        document.paths.len(),
        document.components.schemas.len()
    );

    // Step 4: Serialize
    let content = match args.output_format {
        OutputFormat::Json => serialize_json(&document)?,
        OutputFormat::Yaml => serialize_yaml(&document)?,
    };

    // Step 5: Output to file or stdout
    match &args.output_path {
        Some(output_path) => {
            write_to_file(&content, output_path)?;
            info!("Wrote OpenAPI document to {}", output_path.display());
        }
        None => println!("{}", content),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_defaults() {
        let args = CliArgs::try_parse_from(["openapi-from-actions", "api.json"]).unwrap();

        assert_eq!(args.model_path, PathBuf::from("api.json"));
        assert_eq!(args.output_format, OutputFormat::Json);
        assert!(args.output_path.is_none());
        assert!(args.title.is_none());
        assert_eq!(args.api_version, "1.0");
        assert!(!args.verbose);
    }

    #[test]
    fn test_parse_all_options() {
        let args = CliArgs::try_parse_from([
            "openapi-from-actions",
            "models",
            "-f",
            "yaml",
            "-o",
            "out/openapi.yaml",
            "-t",
            "Shop",
            "--api-version",
            "2.1",
            "-v",
        ])
        .unwrap();

        assert_eq!(args.output_format, OutputFormat::Yaml);
        assert_eq!(args.output_path, Some(PathBuf::from("out/openapi.yaml")));
        assert_eq!(args.title.as_deref(), Some("Shop"));
        assert_eq!(args.api_version, "2.1");
        assert!(args.verbose);
    }

    #[test]
    fn test_default_title() {
        assert_eq!(default_title(Path::new("models/Shop.Api.json")), "Shop.Api");
        assert_eq!(default_title(Path::new("Shop.actions.yaml")), "Shop");
        assert_eq!(default_title(Path::new("models")), "models");
        assert_eq!(default_title(Path::new("/")), "API");
    }

    #[test]
    fn test_missing_model_path_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let args = CliArgs::try_parse_from([
            "openapi-from-actions".to_string(),
            temp_dir.path().join("missing.json").display().to_string(),
        ])
        .unwrap();

        assert!(parse_args_from_parsed(args).is_err());
    }

    #[test]
    fn test_run_writes_output_file() {
        let temp_dir = TempDir::new().unwrap();
        let model_path = temp_dir.path().join("Shop.json");
        fs::write(
            &model_path,
            r#"{"actions": [{"controller": "Health", "action": "Ping", "verbs": {"endpoint": ["GET"]}}]}"#,
        )
        .unwrap();
        let output_path = temp_dir.path().join("out").join("openapi.json");

        let args = CliArgs {
            model_path,
            output_format: OutputFormat::Json,
            output_path: Some(output_path.clone()),
            title: None,
            api_version: "1.0".to_string(),
            verbose: false,
        };
        run(args).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&output_path).unwrap()).unwrap();
        assert_eq!(written["info"]["title"], "Shop");
        assert_eq!(written["paths"]["/Health/Ping"]["get"]["operationId"], "Health_Ping");
    }

    #[test]
    fn test_run_fails_on_empty_directory() {
        let temp_dir = TempDir::new().unwrap();
        let args = CliArgs {
            model_path: temp_dir.path().to_path_buf(),
            output_format: OutputFormat::Json,
            output_path: None,
            title: None,
            api_version: "1.0".to_string(),
            verbose: false,
        };

        assert!(run(args).is_err());
    }
}
