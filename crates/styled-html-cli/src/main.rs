use anyhow::{Context, Result};
use crossterm::{
    queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use std::{
    env, fs,
    io::{self, Read, Write},
    path::PathBuf,
    process,
};
use styled_html_config::{Config, Syntax};
use styled_html_engine::{AttributeValue, InlineIntent, StyledText, format_runs, keys, parse};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Output {
    #[default]
    Text,
    Runs,
    Styled,
}

#[derive(Debug, Default, PartialEq)]
struct Args {
    input: Option<PathBuf>,
    config: Option<PathBuf>,
    syntax: Option<Syntax>,
    no_links: bool,
    output: Output,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut parsed = Args::default();
    let mut args = args.iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                let path = args.next().ok_or("--config needs a path")?;
                parsed.config = Some(PathBuf::from(path));
            }
            "--syntax" => {
                let syntax = args.next().ok_or("--syntax needs a value")?;
                parsed.syntax = Some(syntax.parse()?);
            }
            "--no-links" => parsed.no_links = true,
            "--runs" => parsed.output = Output::Runs,
            "--styled" => parsed.output = Output::Styled,
            flag if flag.starts_with("--") => return Err(format!("unknown option '{flag}'")),
            path => {
                if parsed.input.is_some() {
                    return Err("only one input file can be given".to_string());
                }
                parsed.input = Some(PathBuf::from(path));
            }
        }
    }

    Ok(parsed)
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [--config <path>] [--syntax full|inline-only|inline-only-preserving-whitespace] [--no-links] [--runs|--styled] [file]"
    )
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map_or("styled-html", String::as_str);
    let cli = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(cli) => cli,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{}", usage(program));
            process::exit(1);
        }
    };

    let mut config = match &cli.config {
        Some(path) => Config::load_from_path(path)?
            .with_context(|| format!("Config file '{}' not found", path.display()))?,
        None => Config::load()?.unwrap_or_default(),
    };
    if let Some(syntax) = cli.syntax {
        config.syntax = syntax;
    }
    if cli.no_links {
        config.allows_links = false;
    }
    let options = config.options()?;

    let html = match &cli.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read '{}'", path.display()))?,
        None => {
            let mut html = String::new();
            io::stdin()
                .read_to_string(&mut html)
                .context("Failed to read standard input")?;
            html
        }
    };

    let text = parse(&html, &options).context("Failed to build styled text")?;
    log::debug!("built {} runs", text.runs().len());

    let mut stdout = io::stdout().lock();
    match cli.output {
        Output::Text => writeln!(stdout, "{text}")?,
        Output::Runs => writeln!(stdout, "{}", format_runs(&text))?,
        Output::Styled => write_styled(&mut stdout, &text)?,
    }
    Ok(())
}

fn label_color(value: &AttributeValue) -> Option<Color> {
    let AttributeValue::Text(label) = value else {
        return None;
    };
    match label.as_str() {
        "primary" => Some(Color::Reset),
        "secondary" => Some(Color::DarkGrey),
        "tertiary" => Some(Color::Grey),
        "quaternary" => Some(Color::DarkBlue),
        _ => None,
    }
}

/// Writes `text` with ANSI styling. Symbol attachments are shown by name.
fn write_styled<W: Write>(out: &mut W, text: &StyledText) -> io::Result<()> {
    for run in text.runs() {
        let attributes = &run.attributes;
        if attributes
            .inline_intent
            .contains(InlineIntent::STRONGLY_EMPHASIZED)
        {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        if attributes.inline_intent.contains(InlineIntent::EMPHASIZED) {
            queue!(out, SetAttribute(Attribute::Italic))?;
        }
        if attributes.link.is_some() {
            queue!(out, SetAttribute(Attribute::Underlined))?;
        }
        if let Some(color) = attributes
            .custom(keys::FOREGROUND_COLOR)
            .and_then(label_color)
        {
            queue!(out, SetForegroundColor(color))?;
        }

        match attributes.custom(keys::ATTACHMENT) {
            Some(AttributeValue::Text(name)) => queue!(
                out,
                SetAttribute(Attribute::Reverse),
                Print(format!("[{name}]")),
                Print(run.text.trim_start_matches('\u{FFFC}'))
            )?,
            _ => queue!(out, Print(&run.text))?,
        }
        queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
    }
    writeln!(out)?;
    out.flush()
}
