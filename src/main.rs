use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::{Parser, Subcommand};

use qr_payload::{compose, parser};
use qr_payload::{ContentType, ParseResult};

#[derive(Parser)]
#[command(name = "qr_payload", about = "QR payload interpreter and composer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse one payload and show its fields
    Parse {
        /// Raw payload text; reads all of stdin when absent
        payload: Option<String>,
        /// Emit the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Parse a file of payloads, one per line, to JSON lines
    Batch {
        /// Input file, one payload per line
        #[arg(short, long)]
        input: PathBuf,
        /// Max payloads to parse (default: all)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Build a payload string from field values
    Compose {
        /// Content type label (see `types`)
        kind: String,
        /// Field value as KEY=VALUE (repeatable; absent fields stay empty)
        #[arg(short, long = "field", value_name = "KEY=VALUE")]
        field: Vec<String>,
    },
    /// List recognized content types and their field titles
    Types,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse { payload, json } => {
            let raw = match payload {
                Some(p) => p,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("reading payload from stdin")?;
                    // Keep interior line breaks, drop the pipe's trailing one
                    let trimmed = buf.strip_suffix('\n').unwrap_or(&buf);
                    trimmed.strip_suffix('\r').unwrap_or(trimmed).to_string()
                }
            };
            let parsed = parser::parse(&raw);
            if json {
                println!("{}", serde_json::to_string_pretty(&parsed)?);
            } else {
                print_result(&parsed);
            }
            Ok(())
        }
        Commands::Batch { input, limit } => {
            let text = std::fs::read_to_string(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let mut payloads: Vec<&str> = text.lines().collect();
            if let Some(n) = limit {
                payloads.truncate(n);
            }
            if payloads.is_empty() {
                eprintln!("No payloads in {}.", input.display());
                return Ok(());
            }
            let stdout = std::io::stdout();
            let counts = parse_batch(&payloads, &mut stdout.lock())?;
            counts.print();
            Ok(())
        }
        Commands::Compose { kind, field } => {
            let Some(kind) = ContentType::from_label(&kind) else {
                anyhow::bail!(
                    "unknown type {:?}; one of: {}",
                    kind,
                    ContentType::ALL.map(|t| t.label()).join(", ")
                );
            };
            let values = parse_field_args(&field)?;
            let payload = match kind {
                ContentType::Url => compose::url(field_value(&values, "link")),
                ContentType::Text => compose::text(field_value(&values, "text")),
                ContentType::Tel => compose::tel(field_value(&values, "number")),
                ContentType::Sms => compose::sms(
                    field_value(&values, "to"),
                    field_value(&values, "message"),
                ),
                ContentType::Email => compose::email(
                    field_value(&values, "to"),
                    field_value(&values, "subject"),
                    field_value(&values, "body"),
                ),
                ContentType::Geo => compose::geo(
                    field_value(&values, "longitude"),
                    field_value(&values, "latitude"),
                ),
                ContentType::Wifi => compose::wifi(
                    field_value(&values, "ssid"),
                    field_value(&values, "encryption"),
                    field_value(&values, "password"),
                ),
                ContentType::Contact => compose::contact(
                    field_value(&values, "name"),
                    field_value(&values, "surname"),
                    field_value(&values, "phone"),
                    field_value(&values, "email"),
                ),
                ContentType::Event => compose::event(
                    field_value(&values, "title"),
                    field_value(&values, "location"),
                    field_value(&values, "description"),
                    field_value(&values, "start"),
                    field_value(&values, "end"),
                ),
            };
            println!("{}", payload);
            Ok(())
        }
        Commands::Types => {
            for t in ContentType::ALL {
                println!("{:<8} {}", t.label(), t.field_titles().join(", "));
            }
            Ok(())
        }
    };

    // Stdout carries data (batch JSON lines); timing goes to stderr.
    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        eprintln!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn print_result(result: &ParseResult) {
    println!("Type:    {}", result.kind);
    for field in &result.fields {
        println!("  {:<12} {}", field.title, field.value);
    }
    let preview = result.summary();
    if !preview.trim().is_empty() {
        println!("Preview: {}", preview);
    }
}

#[derive(Default)]
struct TypeCounts {
    total: usize,
    by_type: HashMap<ContentType, usize>,
}

impl TypeCounts {
    fn print(&self) {
        let breakdown: Vec<String> = ContentType::ALL
            .into_iter()
            .filter_map(|t| {
                let n = self.by_type.get(&t).copied().unwrap_or(0);
                (n > 0).then(|| format!("{} {}", n, t.label()))
            })
            .collect();
        eprintln!("Parsed {} payloads: {}.", self.total, breakdown.join(", "));
    }
}

fn parse_batch(payloads: &[&str], out: &mut impl Write) -> anyhow::Result<TypeCounts> {
    use indicatif::{ProgressBar, ProgressStyle};
    use rayon::prelude::*;

    let pb = ProgressBar::new(payloads.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({per_sec})")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut counts = TypeCounts::default();

    for chunk in payloads.chunks(500) {
        let results: Vec<ParseResult> = chunk.par_iter().map(|raw| parser::parse(raw)).collect();

        for (raw, parsed) in chunk.iter().zip(&results) {
            *counts.by_type.entry(parsed.kind).or_insert(0) += 1;
            counts.total += 1;
            let line = serde_json::json!({
                "payload": raw,
                "type": parsed.kind,
                "fields": parsed.fields,
            });
            writeln!(out, "{}", line)?;
        }
        pb.inc(chunk.len() as u64);
    }

    pb.finish_and_clear();
    Ok(counts)
}

fn field_value<'a>(values: &'a [(String, String)], key: &str) -> &'a str {
    values
        .iter()
        .find(|(k, _)| k.as_str() == key)
        .map(|(_, v)| v.as_str())
        .unwrap_or("")
}

fn parse_field_args(args: &[String]) -> anyhow::Result<Vec<(String, String)>> {
    args.iter()
        .map(|arg| {
            arg.split_once('=')
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .with_context(|| format!("field {:?} is not KEY=VALUE", arg))
        })
        .collect()
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_writes_one_json_object_per_line() {
        let payloads = ["TEL:+15551212", "plain note", "geo:40.7,-74.0"];
        let mut out = Vec::new();
        let counts = parse_batch(&payloads, &mut out).unwrap();
        assert_eq!(counts.total, 3);
        assert_eq!(counts.by_type.get(&ContentType::Tel), Some(&1));

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        for line in lines {
            let row: serde_json::Value = serde_json::from_str(line).unwrap();
            assert!(row["type"].is_string());
        }
    }

    #[test]
    fn field_value_defaults_to_empty() {
        let values = vec![("to".to_string(), "+1555".to_string())];
        assert_eq!(field_value(&values, "to"), "+1555");
        assert_eq!(field_value(&values, "message"), "");
    }
}
