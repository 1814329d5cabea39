//! tailsel CLI
//!
//! Inspect how Tailwind-style variant tokens are recognized and how full
//! utility classes compose into CSS selectors.
//!
//! - tailsel classify group-hover nth-child-[2n+1]
//! - tailsel compose md:hover:bg-blue-500 --config tailsel.json
//! - tailsel nth -- -n+3 --upto 6

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use owo_colors::OwoColorize;
use serde_json::json;
use tailsel_common::warning::warn_once;
use tailsel_core::generator::{escape_selector, validate_selector};
use tailsel_core::nth::parse_nth_formula;
use tailsel_core::{ModifierResolver, ResolverConfig, classify};

/// tailsel - Tailwind variant recognition and selector composition
#[derive(Parser, Debug)]
#[command(name = "tailsel")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Which family claims a token
    tailsel classify not-first peer-checked supports-[display:grid]

    # Final selector for a class
    tailsel compose 'md:group-hover:before:content-none'

    # With custom breakpoints, as JSON
    tailsel compose --config tailsel.json --json tablet:p-4

    # Positions selected by an An+B formula
    tailsel nth 3n+1 --upto 12
"#)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify variant tokens into recognizer families
    Classify {
        /// Variant tokens such as `nth-child-3` or `group-hover`
        #[arg(required = true, value_name = "TOKEN")]
        tokens: Vec<String>,

        /// Print each modifier as JSON
        #[arg(long)]
        json: bool,
    },

    /// Resolve full utility classes and print their selectors
    Compose {
        /// Utility classes such as `md:hover:bg-blue-500`
        #[arg(required = true, value_name = "CLASS")]
        classes: Vec<String>,

        /// JSON file overriding breakpoints, containers or dark mode
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Print the resolved modifiers as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the coefficients and matched positions of an An+B formula
    Nth {
        /// `odd`, `even`, an integer, or `An+B`
        #[arg(allow_hyphen_values = true)]
        formula: String,

        /// Last position to test
        #[arg(long, default_value = "10")]
        upto: u32,
    },

    /// Escape text for use as a class selector
    Escape {
        /// Raw class name
        text: String,
    },

    /// Run the selector sanity check
    Check {
        /// Selector text
        selector: String,
    },
}

fn main() -> ExitCode {
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Classify { tokens, json } => classify_tokens(&tokens, json),
        Command::Compose {
            classes,
            config,
            json,
        } => compose_classes(&classes, config.as_deref(), json),
        Command::Nth { formula, upto } => print_nth(&formula, upto),
        Command::Escape { text } => {
            println!("{}", escape_selector(&text));
            Ok(())
        }
        Command::Check { selector } => check_selector(&selector),
    }
}

fn classify_tokens(tokens: &[String], json: bool) -> Result<()> {
    let mut unrecognized = 0usize;

    for token in tokens {
        let modifier = classify(token);
        if modifier.is_none() {
            unrecognized += 1;
        }

        if json {
            println!(
                "{}",
                serde_json::to_string(&json!({ "token": token, "modifier": modifier }))?
            );
            continue;
        }

        match modifier {
            Some(modifier) => println!(
                "{}  {}  priority {}  {}",
                token.bold(),
                modifier.family().green(),
                modifier.priority(),
                modifier.apply("&").dimmed()
            ),
            None => println!("{}  {}", token.bold(), "unrecognized".red()),
        }
    }

    if unrecognized > 0 {
        bail!("{unrecognized} of {} tokens not recognized", tokens.len());
    }
    Ok(())
}

fn compose_classes(classes: &[String], config: Option<&Path>, json: bool) -> Result<()> {
    let config = match config {
        Some(path) => ResolverConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => ResolverConfig::default(),
    };
    let resolver = ModifierResolver::new(config);
    let mut failed = 0usize;

    for class in classes {
        let resolved = match resolver.resolve(class) {
            Ok(resolved) => resolved,
            Err(err) => {
                eprintln!("{} {class}: {err}", "✗".red());
                failed += 1;
                continue;
            }
        };

        for diagnostic in &resolved.diagnostics {
            warn_once("compose", &diagnostic.to_string());
        }

        let selector = resolved.selector();
        if json {
            println!(
                "{}",
                serde_json::to_string(&json!({
                    "class": class,
                    "selector": selector,
                    "resolved": resolved,
                }))?
            );
        } else {
            println!("{selector}");
        }
    }

    if failed > 0 {
        bail!("{failed} of {} classes could not be resolved", classes.len());
    }
    Ok(())
}

fn print_nth(formula: &str, upto: u32) -> Result<()> {
    let parsed =
        parse_nth_formula(formula).with_context(|| format!("invalid nth formula '{formula}'"))?;

    let positions: Vec<String> = (1..=upto)
        .filter(|&position| parsed.matches(position))
        .map(|position| position.to_string())
        .collect();

    println!("{}  a = {}, b = {}", formula.bold(), parsed.a, parsed.b);
    if positions.is_empty() {
        println!("{}", format!("no positions in 1..={upto}").dimmed());
    } else {
        println!("{}", positions.join(" "));
    }
    Ok(())
}

fn check_selector(selector: &str) -> Result<()> {
    if !validate_selector(selector) {
        bail!("'{selector}' failed the selector sanity check");
    }
    println!("{} {selector}", "✓".green());
    Ok(())
}
