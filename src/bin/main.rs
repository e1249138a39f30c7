//! CMS attribute table CLI
//!
//! Inspect and edit DER-encoded `SET OF Attribute` blobs such as the signed or unsigned
//! attributes extracted from a CMS `SignerInfo`.

use clap::{Parser, Subcommand, ValueEnum};
use cms_attribute_table::{
    config::{ConfigManager, ExportFormat},
    services::{parse_hex_value, parse_oid},
    AttributeError, AttributeInspector, AttributeTable, OutputFormat,
};
use der::Encode;
use miette::{Context, IntoDiagnostic, Result};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "attr-table")]
#[command(about = "Inspect and edit CMS attribute sets")]
#[command(long_about = "
CMS Attribute Table - inspect and edit DER SET OF Attribute blobs

EXAMPLES:
    # Summarize every attribute type
    attr-table dump signed_attrs.der

    # Print the messageDigest attribute
    attr-table get signed_attrs.der 1.2.840.113549.1.9.4

    # Drop the signingTime attribute
    attr-table remove signed_attrs.der 1.2.840.113549.1.9.5 -o out.der

    # Append a contentType attribute (value is hex DER)
    attr-table add attrs.der 1.2.840.113549.1.9.3 06092a864886f70d010701

ENVIRONMENT VARIABLES:
    RUST_LOG        Logging level (debug, info, warn, error)
")]
#[command(version)]
struct Cli {
    /// Configuration file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "CONFIG_FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize all attributes in a DER attribute set
    Dump {
        #[arg(value_name = "INPUT_FILE")]
        input_file: PathBuf,

        /// Output format (overrides config)
        #[arg(short, long, value_enum)]
        format: Option<OutputFormatArg>,
    },

    /// Print the records stored for one attribute type as hex DER
    Get {
        #[arg(value_name = "INPUT_FILE")]
        input_file: PathBuf,

        /// Attribute type in dotted-decimal form
        oid: String,

        /// Print every record instead of only the first
        #[arg(short, long)]
        all: bool,
    },

    /// Remove every record of one attribute type
    Remove {
        #[arg(value_name = "INPUT_FILE")]
        input_file: PathBuf,

        /// Attribute type in dotted-decimal form
        oid: String,

        /// Output file path (defaults to overwriting input file)
        #[arg(short, long, value_name = "OUTPUT_FILE")]
        output: Option<PathBuf>,
    },

    /// Append a single-valued record
    Add {
        #[arg(value_name = "INPUT_FILE")]
        input_file: PathBuf,

        /// Attribute type in dotted-decimal form
        oid: String,

        /// Attribute value as hex-encoded DER
        value: String,

        /// Output file path (defaults to overwriting input file)
        #[arg(short, long, value_name = "OUTPUT_FILE")]
        output: Option<PathBuf>,
    },

    /// Configuration management
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Create default configuration file
    Init,

    /// Set a configuration value (use `alias.<oid>` to name an attribute type)
    Set {
        /// Configuration key
        key: String,
        /// Configuration value
        value: String,
    },

    /// Export configuration
    Export {
        /// Export format
        #[arg(short, long, value_enum, default_value = "toml")]
        format: ExportFormatArg,
    },
}

#[derive(ValueEnum, Clone)]
enum OutputFormatArg {
    Text,
    Json,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Text => OutputFormat::Text,
            OutputFormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(ValueEnum, Clone)]
enum ExportFormatArg {
    Toml,
    Json,
}

impl From<ExportFormatArg> for ExportFormat {
    fn from(arg: ExportFormatArg) -> Self {
        match arg {
            ExportFormatArg::Toml => ExportFormat::Toml,
            ExportFormatArg::Json => ExportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::new().into_diagnostic()?,
    };

    match cli.command {
        Commands::Dump { input_file, format } => handle_dump(&manager, &input_file, format),
        Commands::Get {
            input_file,
            oid,
            all,
        } => handle_get(&input_file, &oid, all),
        Commands::Remove {
            input_file,
            oid,
            output,
        } => {
            let table = load_table(&input_file)?;
            let oid = parse_oid(&oid).into_diagnostic()?;
            if !table.contains(&oid) {
                log::warn!("Attribute type {oid} not present; output is unchanged");
            }
            let updated = table.remove(&oid);
            write_table(&updated, output.as_deref().unwrap_or(input_file.as_path()))
        }
        Commands::Add {
            input_file,
            oid,
            value,
            output,
        } => {
            let table = load_table(&input_file)?;
            let oid = parse_oid(&oid).into_diagnostic()?;
            let value = parse_hex_value(&value).into_diagnostic()?;
            let updated = table.add_value(oid, value).into_diagnostic()?;
            write_table(&updated, output.as_deref().unwrap_or(input_file.as_path()))
        }
        Commands::Config(config_cmd) => handle_config_command(&manager, config_cmd),
    }
}

fn load_table(path: &Path) -> Result<AttributeTable> {
    let bytes = std::fs::read(path)
        .into_diagnostic()
        .with_context(|| format!("Failed to read {}", path.display()))?;
    AttributeTable::from_der(&bytes)
        .into_diagnostic()
        .with_context(|| format!("{} is not a DER SET OF Attribute", path.display()))
}

fn write_table(table: &AttributeTable, path: &Path) -> Result<()> {
    let der = table.to_der().into_diagnostic()?;
    std::fs::write(path, der)
        .into_diagnostic()
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!(
        "Wrote {} record(s) across {} type(s) to {}",
        table.count(),
        table.oid_count(),
        path.display()
    );
    Ok(())
}

fn handle_dump(
    manager: &ConfigManager,
    input_file: &Path,
    format: Option<OutputFormatArg>,
) -> Result<()> {
    let mut config = manager
        .load_or_default()
        .and_then(|c| c.to_inspector_config())
        .into_diagnostic()?;
    if let Some(format) = format {
        config.output_format = format.into();
    }

    let table = load_table(input_file)?;
    let inspector = AttributeInspector::new(config);
    let report = inspector.inspect(&table).into_diagnostic()?;
    print!("{}", inspector.render(&report).into_diagnostic()?);
    Ok(())
}

fn handle_get(input_file: &Path, oid: &str, all: bool) -> Result<()> {
    let table = load_table(input_file)?;
    let oid = parse_oid(oid).into_diagnostic()?;

    let records = if all {
        table.get_all(&oid).to_vec()
    } else {
        table.get(&oid).cloned().into_iter().collect()
    };

    if records.is_empty() {
        return Err(miette::miette!("Attribute type {oid} not present"));
    }

    for record in records {
        let der = record
            .to_der()
            .map_err(AttributeError::from)
            .into_diagnostic()?;
        println!("{}", hex::encode(der));
    }
    Ok(())
}

fn handle_config_command(manager: &ConfigManager, cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show => {
            let config = manager.load_or_default().into_diagnostic()?;
            println!("Configuration file: {}", manager.config_path().display());
            println!("  max_value_bytes: {}", config.max_value_bytes);
            println!("  output_format: {}", config.output_format);
            println!("  show_values: {}", config.show_values);
            for (oid, name) in &config.oid_aliases {
                println!("  alias.{oid}: {name}");
            }
        }
        ConfigCommands::Init => {
            manager.load_or_create_default().into_diagnostic()?;
            println!(
                "Configuration initialized at {}",
                manager.config_path().display()
            );
        }
        ConfigCommands::Set { key, value } => {
            manager.update_value(&key, &value).into_diagnostic()?;
            println!("Set {key} = {value}");
        }
        ConfigCommands::Export { format } => {
            print!("{}", manager.export_config(format.into()).into_diagnostic()?);
        }
    }
    Ok(())
}
