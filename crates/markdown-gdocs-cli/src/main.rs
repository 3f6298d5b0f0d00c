use anyhow::{Context, Result, bail};
use log::{debug, info};
use markdown_gdocs_config::{CodeConfig, Config};
use markdown_gdocs_engine::{
    BatchUpdate, CodeFont, ConvertOptions, RgbColor, markdown_to_operations,
};
use std::{
    env,
    io::{IsTerminal, Read, stdin},
    path::{Path, PathBuf},
    process,
};

#[derive(Debug, Default, PartialEq)]
struct Args {
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    input: Option<PathBuf>,
    init_config: bool,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut rest = args.iter().skip(1);

    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let value = rest.next().ok_or("--config requires a path")?;
                parsed.config = Some(Config::expand_path(Path::new(value)));
            }
            "--output" | "-o" => {
                let value = rest.next().ok_or("--output requires a path")?;
                parsed.output = Some(Config::expand_path(Path::new(value)));
            }
            "--init-config" => parsed.init_config = true,
            flag if flag.starts_with('-') && flag != "-" => {
                return Err(format!("unknown option {flag}"));
            }
            file => {
                if parsed.input.is_some() {
                    return Err("only one input file may be given".to_string());
                }
                if file != "-" {
                    parsed.input = Some(Config::expand_path(Path::new(file)));
                }
            }
        }
    }

    Ok(parsed)
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load_from_path(path)?
            .with_context(|| format!("Config file '{}' does not exist", path.display())),
        None => {
            let config = Config::load()?;
            if config.is_none() {
                debug!(
                    "No config file at {}, using defaults",
                    Config::config_path().display()
                );
            }
            Ok(config.unwrap_or_default())
        }
    }
}

/// Writes a config file holding every default, refusing to overwrite one.
fn init_config(path: Option<&Path>) -> Result<PathBuf> {
    let path = path.map_or_else(Config::config_path, Path::to_path_buf);
    if path.exists() {
        bail!("Config file '{}' already exists", path.display());
    }
    Config::default().save_to_path(&path)?;
    Ok(path)
}

fn convert_options(code: &CodeConfig) -> ConvertOptions {
    ConvertOptions {
        code_font: CodeFont {
            family: code.font_family.clone(),
            weight: code.font_weight,
            background: RgbColor {
                red: code.background.red,
                green: code.background.green,
                blue: code.background.blue,
            },
        },
    }
}

fn read_markdown(input: Option<&Path>) -> Result<String> {
    if let Some(path) = input {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display()));
    }

    let mut stdin = stdin();
    if stdin.is_terminal() {
        eprintln!("Enter markdown, press CTRL+D when done:");
    }
    let mut markdown = String::new();
    stdin
        .read_to_string(&mut markdown)
        .context("Failed to read markdown from stdin")?;
    Ok(markdown)
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let parsed = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!(
                "Usage: {} [--config PATH] [--output PATH] [FILE]\n       {0} [--config PATH] --init-config",
                args.first().map_or("markdown-gdocs-cli", String::as_str)
            );
            process::exit(1);
        }
    };

    if parsed.init_config {
        let path = init_config(parsed.config.as_deref())?;
        info!("Wrote default config to {}", path.display());
        return Ok(());
    }

    let config = load_config(parsed.config.as_deref())?;
    let markdown = read_markdown(parsed.input.as_deref())?;

    let ops = markdown_to_operations(&markdown, &convert_options(&config.code))
        .context("Failed to convert markdown")?;
    let batch = BatchUpdate::from_operations(ops);
    let body = serde_json::to_string_pretty(&batch)?;

    match parsed.output {
        Some(path) => {
            std::fs::write(&path, body + "\n")
                .with_context(|| format!("Failed to write '{}'", path.display()))?;
            info!(
                "Wrote {} requests to {}",
                batch.requests.len(),
                path.display()
            );
        }
        None => println!("{body}"),
    }

    Ok(())
}
