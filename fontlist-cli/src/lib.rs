//! fontlist CLI

use std::io::{self, IsTerminal, Write};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum, ValueHint};
use log::info;
use regex::Regex;

use fontlist_core::output::{write_json_pretty, write_ndjson};
use fontlist_core::{FontBackend, FontFamily, ListOptions, SystemBackend};

/// CLI entrypoint for fontlist.
#[derive(Debug, Parser)]
#[command(
    name = "fontlist",
    version,
    about = "List installed system fonts and the default UI font"
)]
pub struct Cli {
    /// Without a subcommand, print every family followed by the default font
    #[command(subcommand)]
    command: Option<Command>,

    /// Locale used to pick localized family names (e.g. de-DE)
    #[arg(long = "locale", global = true, value_hint = ValueHint::Other)]
    locale: Option<String>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List installed font families
    List(ListArgs),
    /// Show the font the OS uses for its default UI text
    Default(DefaultArgs),
}

#[derive(Debug, Args)]
struct ListArgs {
    /// Regex patterns; keep families whose name matches at least one
    #[arg(short = 'n', long = "name", value_hint = ValueHint::Other)]
    name_patterns: Vec<String>,

    /// Emit a single JSON array
    #[arg(long = "json", action = ArgAction::SetTrue, conflicts_with = "ndjson")]
    json: bool,

    /// Emit newline-delimited JSON, one family per line
    #[arg(long = "ndjson", action = ArgAction::SetTrue)]
    ndjson: bool,

    /// Format output as padded columns, one font per row
    #[arg(long = "columns", action = ArgAction::SetTrue)]
    columns: bool,

    /// Control colorized output (auto|always|never)
    #[arg(long = "color", default_value_t = ColorChoice::Auto, value_enum)]
    color: ColorChoice,
}

#[derive(Debug, Args)]
struct DefaultArgs {
    /// Emit the family as JSON
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,

    /// Control colorized output (auto|always|never)
    #[arg(long = "color", default_value_t = ColorChoice::Auto, value_enum)]
    color: ColorChoice,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn enabled(self, is_terminal: bool) -> bool {
        match self {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => is_terminal,
        }
    }
}

/// Parse CLI args and execute the selected command.
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let backend = SystemBackend::new(list_options(cli.locale.clone()));

    let stdout = io::stdout();
    let is_terminal = stdout.is_terminal();
    let mut handle = stdout.lock();

    execute(cli.command, &backend, &mut handle, is_terminal)
}

/// `--locale` wins over `FONTLIST_LOCALE`.
fn list_options(locale: Option<String>) -> ListOptions {
    match locale {
        Some(locale) => ListOptions::new().with_locale(Some(locale)),
        None => ListOptions::from_env(),
    }
}

fn execute(
    command: Option<Command>,
    backend: &impl FontBackend,
    w: &mut impl Write,
    is_terminal: bool,
) -> Result<()> {
    match command {
        Some(Command::List(args)) => run_list(&args, backend, w, is_terminal),
        Some(Command::Default(args)) => run_default(&args, backend, w, is_terminal),
        None => run_overview(backend, w),
    }
}

fn run_list(
    args: &ListArgs,
    backend: &impl FontBackend,
    w: &mut impl Write,
    is_terminal: bool,
) -> Result<()> {
    let patterns = compile_patterns(&args.name_patterns)?;
    let mut families = backend.enumerate().context("enumerating system fonts")?;
    families.retain(|family| name_matches(&family.name, &patterns));
    sort_families(&mut families);

    let color = args.color.enabled(is_terminal);
    if args.ndjson {
        write_ndjson(&families, w)?;
    } else if args.json {
        write_json_pretty(&families, w)?;
    } else if args.columns {
        write_columns(&families, w, color)?;
    } else {
        write_plain(&families, w, color)?;
    }

    Ok(())
}

fn run_default(
    args: &DefaultArgs,
    backend: &impl FontBackend,
    w: &mut impl Write,
    is_terminal: bool,
) -> Result<()> {
    let family = backend.default_font().context("resolving the default font")?;

    if args.json {
        write_json_pretty(&family, w)?;
    } else {
        write_plain(std::slice::from_ref(&family), w, args.color.enabled(is_terminal))?;
    }

    Ok(())
}

/// Every family, then the default one. Always uncolored; `list` and
/// `default` carry the `--color` switch.
fn run_overview(backend: &impl FontBackend, w: &mut impl Write) -> Result<()> {
    info!("enumerating system fonts");
    let mut families = backend.enumerate().context("enumerating system fonts")?;
    sort_families(&mut families);
    write_plain(&families, &mut *w, false)?;

    let default = backend.default_font().context("resolving the default font")?;
    write_plain(std::slice::from_ref(&default), w, false)?;

    Ok(())
}

fn compile_patterns(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|p| Regex::new(p).with_context(|| format!("invalid regex: {p}")))
        .collect()
}

fn name_matches(name: &str, patterns: &[Regex]) -> bool {
    patterns.is_empty() || patterns.iter().any(|re| re.is_match(name))
}

/// Families by name (case-insensitive), fonts by weight, style, then path.
fn sort_families(families: &mut [FontFamily]) {
    families.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });
    for family in families.iter_mut() {
        family
            .fonts
            .sort_by(|a, b| (a.weight, a.style, &a.file).cmp(&(b.weight, b.style, &b.file)));
    }
}

fn write_plain(families: &[FontFamily], mut w: impl Write, color: bool) -> Result<()> {
    for family in families {
        writeln!(w, "{}", apply_color(&family.name, color, AnsiColor::Yellow))?;
        for font in &family.fonts {
            let path = font.file.display().to_string();
            writeln!(
                w,
                "  {} weight:{} style:{}",
                apply_color(&path, color, AnsiColor::Cyan),
                font.weight,
                font.style
            )?;
        }
    }
    Ok(())
}

fn write_columns(families: &[FontFamily], mut w: impl Write, color: bool) -> Result<()> {
    let rows: Vec<(&str, String, String)> = families
        .iter()
        .flat_map(|family| {
            family.fonts.iter().map(move |font| {
                (
                    family.name.as_str(),
                    format!("{:<3} {:<7}", font.weight, font.style),
                    font.file.display().to_string(),
                )
            })
        })
        .collect();

    let name_width = rows
        .iter()
        .map(|r| r.0.chars().count())
        .max()
        .unwrap_or(0)
        .clamp(0, 60);

    for (name, traits, path) in rows {
        let padded_name = format!("{:<name_width$}", name);
        let rendered_name = apply_color(&padded_name, color, AnsiColor::Yellow);
        let rendered_traits = apply_color(&traits, color, AnsiColor::Green);
        let rendered_path = apply_color(&path, color, AnsiColor::Cyan);

        writeln!(w, "{rendered_name}  {rendered_traits}  {rendered_path}")?;
    }

    Ok(())
}

#[derive(Copy, Clone)]
enum AnsiColor {
    Cyan,
    Yellow,
    Green,
}

fn apply_color(text: &str, color: bool, code: AnsiColor) -> String {
    if !color {
        return text.to_string();
    }

    let code_str = match code {
        AnsiColor::Cyan => "36",
        AnsiColor::Yellow => "33",
        AnsiColor::Green => "32",
    };

    format!("\u{1b}[{}m{}\u{1b}[0m", code_str, text)
}
