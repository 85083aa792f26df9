use anyhow::{Context, Result};
use clap::Parser;
use std::collections::BTreeMap;
use std::path::PathBuf;

use tagconv::config;
use tagconv::metadata::MetadataRecord;
use tagconv::tags::{Family, RawValue, TagKey, XmpType, catalog};

#[derive(Parser, Debug)]
#[command(
    name = "tagconv",
    version,
    about = "Decode and re-encode EXIF, IPTC and XMP tag values"
)]
struct Cli {
    /// Tag key, e.g. Exif.Image.DateTime or Xmp.dc.title
    #[arg(value_name = "KEY")]
    key: Option<String>,

    /// Raw value(s); one per item for IPTC and XMP arrays, lang=text for Lang Alt
    #[arg(value_name = "RAW")]
    raw: Vec<String>,

    /// Declared type, overriding the catalog (needed for maker-note tags)
    #[arg(short = 't', long = "type", value_name = "TYPE")]
    type_name: Option<String>,

    /// Path to config file (default: config.json next to binary)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initialize a default config.json and exit
    #[arg(long)]
    init: bool,

    /// Output results as JSON
    #[arg(long)]
    json: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
        .format_timestamp(None)
        .init();

    // Handle --init
    if cli.init {
        let config = config::Config::default();
        let path = cli.config.as_deref();
        config.save(path)?;
        let save_path = match path {
            Some(p) => p.to_path_buf(),
            None => config::Config::config_path()?,
        };
        println!("Default config written to {}", save_path.display());
        return Ok(());
    }

    let Some(key) = cli.key.as_deref() else {
        anyhow::bail!("No tag key specified. Use --help for usage.");
    };

    let config = config::Config::load(cli.config.as_deref())?;
    let mut record = MetadataRecord::with_namespaces(config.namespace_registry()?);

    let tag_key = TagKey::parse(key)?;
    let type_name = match &cli.type_name {
        Some(t) => t.clone(),
        None => catalog_type(&tag_key)?,
    };
    log::debug!("{key}: declared type {type_name:?}");

    match tag_key.family() {
        Family::Exif => record.load_exif(key, &type_name, cli.raw.join(" "))?,
        Family::Iptc => record.load_iptc(key, cli.raw.clone())?,
        Family::Xmp => {
            let raw = xmp_raw(&type_name, &cli.raw)?;
            record.load_xmp(key, &type_name, raw)?;
        }
    }

    let value = record
        .value(key)
        .with_context(|| format!("Failed to decode {key}"))?;
    record
        .set(key, value.clone())
        .with_context(|| format!("Failed to re-encode {key}"))?;
    let entry = record
        .raw_entries()?
        .into_iter()
        .find(|e| e.key == key)
        .context("Tag disappeared from the record")?;

    // JSON output
    if cli.json || config.output.json {
        let out = serde_json::json!({
            "key": entry.key,
            "type": entry.type_name,
            "value": value,
            "raw": entry.raw,
        });
        let text = if config.output.pretty {
            serde_json::to_string_pretty(&out)?
        } else {
            serde_json::to_string(&out)?
        };
        println!("{text}");
        return Ok(());
    }

    print_row("Key", &entry.key);
    print_row("Type", &entry.type_name);
    print_row("Value", &value.to_string());
    print_row("Raw", &entry.raw.to_string());

    Ok(())
}

/// Declared type from the tag catalog.
fn catalog_type(key: &TagKey) -> Result<String> {
    let full = key.to_string();
    let type_name = match key.family() {
        Family::Exif => catalog::exif_type_name(&full),
        Family::Iptc => catalog::iptc_info(&full).map(|(t, _)| t),
        // Unknown XMP properties are untyped
        Family::Xmp => {
            let name = catalog::xmp_type_name(key.group(), key.base_name());
            Some(name.unwrap_or(""))
        }
    };
    type_name
        .map(str::to_string)
        .with_context(|| format!("No known type for {full}; pass one with --type"))
}

/// Shape command-line raw values for an XMP type.
fn xmp_raw(type_name: &str, raw: &[String]) -> Result<RawValue> {
    Ok(match XmpType::parse(type_name)? {
        XmpType::LangAlt => {
            let mut map = BTreeMap::new();
            for item in raw {
                let (lang, text) = item
                    .split_once('=')
                    .with_context(|| format!("Expected lang=text, got {item:?}"))?;
                map.insert(lang.to_string(), text.to_string());
            }
            RawValue::LangAlt(map)
        }
        XmpType::Bag(_) | XmpType::Seq(_) | XmpType::Alt(_) => RawValue::Array(raw.to_vec()),
        XmpType::Simple(_) | XmpType::Untyped => RawValue::Text(raw.join(" ")),
    })
}

/// Print a single row in the result table.
fn print_row(label: &str, val: &str) {
    println!("  {:<6} : {val}", label);
}
