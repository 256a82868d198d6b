//! `dtk` - design token tooling
//!
//! Every command takes a token source: a bundle file, or a directory with
//! `tokens.<ext>` and `themes/<name>.<ext>`.

use anyhow::{bail, Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use dtk_registry::{RegistryConfig, ThemeName, ThemeSnapshot, TokenRegistry};
use dtk_source::Loader;
use dtk_token::Category;
use std::path::PathBuf;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn cli() -> Command {
    let source = Arg::new("source")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Bundle file or token directory");
    let theme = Arg::new("theme")
        .long("theme")
        .short('t')
        .help("Theme to resolve under (default: base layer)");

    Command::new("dtk")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Design token registry tooling")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::Count)
                .help("Increase log verbosity (overrides RUST_LOG)"),
        )
        .arg(
            Arg::new("max-depth")
                .long("max-depth")
                .global(true)
                .value_parser(value_parser!(usize))
                .help("Maximum reference chain length"),
        )
        .subcommand(
            Command::new("check")
                .about("Validate tokens and themes")
                .arg(source.clone()),
        )
        .subcommand(
            Command::new("resolve")
                .about("Print the concrete value of a token")
                .arg(Arg::new("token").required(true).help("Token name"))
                .arg(source.clone())
                .arg(theme.clone()),
        )
        .subcommand(
            Command::new("list")
                .about("List token names")
                .arg(source.clone())
                .arg(
                    Arg::new("category")
                        .long("category")
                        .short('c')
                        .value_parser(value_parser!(Category))
                        .help("Only tokens of this category"),
                ),
        )
        .subcommand(
            Command::new("themes")
                .about("List declared themes")
                .arg(source.clone()),
        )
        .subcommand(
            Command::new("export")
                .about("Export resolved values")
                .arg(source)
                .arg(theme.help("Export a single theme (default: all themes)"))
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .default_value("css")
                        .value_parser(["css", "json"])
                        .help("Output format"),
                )
                .arg(
                    Arg::new("prefix")
                        .long("prefix")
                        .short('p')
                        .help("Custom property prefix (--<prefix>-<name>)"),
                ),
        )
}

fn init_tracing(verbosity: u8) {
    let filter = match verbosity {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load(args: &ArgMatches, config: RegistryConfig) -> Result<TokenRegistry> {
    let source = args
        .get_one::<PathBuf>("source")
        .context("missing token source")?;
    let registry = Loader::new()
        .load_registry(source, config)
        .with_context(|| format!("failed to load tokens from {}", source.display()))?;
    info!(
        source = %source.display(),
        tokens = registry.len(),
        themes = registry.themes().len(),
        "registry ready"
    );
    Ok(registry)
}

fn theme_arg(args: &ArgMatches) -> &str {
    args.get_one::<String>("theme")
        .map_or(ThemeName::DEFAULT, String::as_str)
}

fn run(matches: &ArgMatches) -> Result<()> {
    let mut config = RegistryConfig::default();
    if let Some(&max_depth) = matches.get_one::<usize>("max-depth") {
        config = config.with_max_depth(max_depth);
    }

    debug!(
        command = matches.subcommand_name().unwrap_or_default(),
        max_depth = config.max_depth,
        "dispatching"
    );
    match matches.subcommand() {
        Some(("check", args)) => {
            let registry = load(args, config)?;
            let themes = registry.themes();
            println!(
                "ok: {} tokens, {} themes ({})",
                registry.len(),
                themes.len(),
                themes.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(", ")
            );
        }
        Some(("resolve", args)) => {
            let registry = load(args, config)?;
            let token = args.get_one::<String>("token").context("missing token")?;
            let value = registry.resolve(token, theme_arg(args))?;
            println!("{value}");
        }
        Some(("list", args)) => {
            let registry = load(args, config)?;
            let category = args.get_one::<Category>("category").copied();
            for name in registry.list_tokens(category) {
                println!("{name}");
            }
        }
        Some(("themes", args)) => {
            let registry = load(args, config)?;
            for theme in registry.themes() {
                println!("{theme}");
            }
        }
        Some(("export", args)) => {
            let registry = load(args, config)?;
            let prefix = args.get_one::<String>("prefix").map(String::as_str);
            let format = args.get_one::<String>("format").map_or("css", String::as_str);
            let theme = args.get_one::<String>("theme").map(String::as_str);
            print!("{}", export(&registry, theme, format, prefix)?);
        }
        Some((other, _)) => bail!("unknown command: {other}"),
        None => bail!("no command given"),
    }
    Ok(())
}

/// Render one theme, or every theme when `theme` is `None`
///
/// CSS for all themes is a `:root` block followed by one
/// `[data-theme="<name>"]` block per theme holding only changed values.
fn export(
    registry: &TokenRegistry,
    theme: Option<&str>,
    format: &str,
    prefix: Option<&str>,
) -> Result<String> {
    let snapshots: Vec<ThemeSnapshot> = match theme {
        Some(theme) => vec![registry.resolve_all(theme)?],
        None => registry
            .themes()
            .into_iter()
            .map(|t| registry.resolve_all(t.as_str()))
            .collect::<Result<_, _>>()?,
    };

    match format {
        "json" => {
            let mut merged = serde_json::Map::new();
            for snapshot in &snapshots {
                if let serde_json::Value::Object(map) = serde_json::to_value(snapshot)? {
                    merged.extend(map);
                }
            }
            Ok(serde_json::to_string_pretty(&merged)? + "\n")
        }
        "css" => {
            let Some((first, rest)) = snapshots.split_first() else {
                return Ok(String::new());
            };
            if theme.is_some() {
                return Ok(first.to_css(":root", prefix));
            }
            let mut css = first.to_css(":root", prefix);
            for snapshot in rest {
                let selector = format!("[data-theme=\"{}\"]", snapshot.theme());
                css.push('\n');
                css.push_str(&snapshot.to_css_overrides(first, &selector, prefix));
            }
            Ok(css)
        }
        other => bail!("unsupported format: {other}"),
    }
}

fn main() {
    let matches = cli().get_matches();
    init_tracing(matches.get_count("verbose"));

    if let Err(err) = run(&matches) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtk_test_utils::{palette_builder, BUNDLE_JSON};
    use pretty_assertions::assert_eq;

    fn registry() -> TokenRegistry {
        let mut builder = dtk_registry::RegistryBuilder::new();
        builder
            .token("color.primary.500", Category::Color, "#3b82f6")
            .token("color.button.bg", Category::Color, "{color.primary.500}")
            .token("spacing.md", Category::Spacing, "1rem")
            .override_token("dark", "color.primary.500", "#60a5fa");
        builder.build().unwrap()
    }

    #[test]
    fn cli_definition_is_valid() {
        cli().debug_assert();
    }

    #[test]
    fn parses_export_flags() {
        let matches = cli()
            .try_get_matches_from(["dtk", "export", "tokens/", "--theme", "dark", "--format", "json", "-v"])
            .unwrap();
        assert_eq!(matches.get_count("verbose"), 1);
        let (name, args) = matches.subcommand().unwrap();
        assert_eq!(name, "export");
        assert_eq!(theme_arg(args), "dark");
    }

    #[test]
    fn rejects_unknown_category() {
        assert!(cli()
            .try_get_matches_from(["dtk", "list", "tokens/", "--category", "colour"])
            .is_err());
    }

    #[test]
    fn css_export_all_themes() {
        let css = export(&registry(), None, "css", None).unwrap();
        assert_eq!(
            css,
            ":root {\n  --color-button-bg: #3b82f6;\n  --color-primary-500: #3b82f6;\n  --spacing-md: 1rem;\n}\n\
             \n\
             [data-theme=\"dark\"] {\n  --color-button-bg: #60a5fa;\n  --color-primary-500: #60a5fa;\n}\n"
        );
    }

    #[test]
    fn json_export_single_theme() {
        let json = export(&registry(), Some("dark"), "json", None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["dark"]["color.button.bg"], "#60a5fa");
        assert_eq!(value["dark"]["spacing.md"], "1rem");
    }

    #[test]
    fn loads_bundle_and_dispatches() {
        let dir = tempfile::TempDir::new().unwrap();
        let bundle = dir.path().join("bundle.json");
        std::fs::write(&bundle, BUNDLE_JSON).unwrap();
        let path = bundle.to_str().unwrap();

        let matches = cli()
            .try_get_matches_from(["dtk", "resolve", "color.button.bg", path, "-t", "dark"])
            .unwrap();
        let (_, args) = matches.subcommand().unwrap();
        let registry = load(args, RegistryConfig::default()).unwrap();
        assert_eq!(registry.resolve("color.button.bg", "dark").unwrap().to_string(), "#60a5fa");
        assert!(run(&matches).is_ok());

        let invalid = cli()
            .try_get_matches_from(["dtk", "check", path, "--max-depth", "0"])
            .unwrap();
        assert!(run(&invalid).is_err());
    }

    #[test]
    fn export_unknown_theme_fails() {
        let registry = palette_builder().build().unwrap();
        assert!(export(&registry, Some("sepia"), "css", Some("ds")).is_err());
    }
}
