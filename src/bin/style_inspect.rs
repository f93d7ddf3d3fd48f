//! Load a style document and print the descriptors it produces.
//!
//! Accepts a URL, a local path, inline JSON, or `--stdin`. Descriptors go to
//! stdout (pretty JSON array, or one object per line with `--ndjson`);
//! diagnostics for dropped entries go to stderr.

use anyhow::{Context, Result, bail};
use mapstyle::{
    Assembly, JsonLinesTarget, StyleConfig, StyleInput, StyleSession, init_tracing,
    parse_style_document,
};
use std::env;
use std::ffi::OsString;
use std::io::{self, Read, Write};

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = CliArgs::parse(env::args_os().skip(1))?;
    let mut config = StyleConfig::from_env();
    if args.skip_schema {
        config.validate_schema = false;
    }
    init_tracing(&config);

    let input = args.source.resolve(config.validate_schema)?;
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;

    let assembly = runtime.block_on(async {
        let session = StyleSession::new(config);
        session.set_input(input).await
    })?;
    let Some(assembly) = assembly else {
        bail!("style load was cancelled before it completed");
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_descriptors(&assembly, args.ndjson, &mut out)?;
    out.flush().context("flushing stdout")?;

    for diagnostic in &assembly.diagnostics {
        eprintln!("warning: {diagnostic}");
    }
    if args.strict && !assembly.diagnostics.is_empty() {
        bail!(
            "{} style entries were dropped (--strict)",
            assembly.diagnostics.len()
        );
    }
    Ok(())
}

fn write_descriptors(assembly: &Assembly, ndjson: bool, out: &mut impl Write) -> Result<()> {
    if ndjson {
        let mut target = JsonLinesTarget::new(out);
        assembly.apply_to(&mut target)?;
        return Ok(());
    }
    serde_json::to_writer_pretty(&mut *out, &assembly.descriptors)
        .context("serializing descriptors")?;
    writeln!(out).context("writing stdout")?;
    Ok(())
}

#[derive(Debug, PartialEq)]
enum InputSource {
    Arg(String),
    Stdin,
}

impl InputSource {
    fn resolve(&self, validate_schema: bool) -> Result<StyleInput> {
        match self {
            InputSource::Arg(raw) => StyleInput::parse_arg(raw, validate_schema),
            InputSource::Stdin => {
                let mut buf = Vec::new();
                io::stdin()
                    .read_to_end(&mut buf)
                    .context("reading stdin")?;
                let document = parse_style_document("stdin", &buf, validate_schema)?;
                Ok(StyleInput::from(document))
            }
        }
    }
}

#[derive(Debug)]
struct CliArgs {
    source: InputSource,
    ndjson: bool,
    strict: bool,
    skip_schema: bool,
}

impl CliArgs {
    fn parse(args: impl IntoIterator<Item = OsString>) -> Result<Self> {
        let mut source: Option<InputSource> = None;
        let mut ndjson = false;
        let mut strict = false;
        let mut skip_schema = false;

        for arg_os in args {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow::anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--stdin" => {
                    if source.is_some() {
                        bail!("only one style input may be provided");
                    }
                    source = Some(InputSource::Stdin);
                }
                "--ndjson" => ndjson = true,
                "--strict" => strict = true,
                "--no-schema" => skip_schema = true,
                "--help" | "-h" => {
                    print!("{}", usage());
                    std::process::exit(0);
                }
                other if other.starts_with("--") => bail!("unknown flag: {other}"),
                other => {
                    if source.is_some() {
                        bail!("only one style input may be provided");
                    }
                    source = Some(InputSource::Arg(other.to_string()));
                }
            }
        }

        let Some(source) = source else {
            bail!("missing style input\n{}", usage());
        };
        Ok(CliArgs {
            source,
            ndjson,
            strict,
            skip_schema,
        })
    }
}

fn usage() -> &'static str {
    "Usage: style-inspect [--ndjson] [--strict] [--no-schema] (URL|PATH|JSON|--stdin)\n\
Loads a style document and prints the source and layer descriptors it yields, sources first.\n"
}
