use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use precis::request::{DEFAULT_SENTENCES, SENTENCE_RANGE};
use precis::{load_generator, summarize, Mode, RequestError, SummaryReport, SummaryRequest, TextGenerator, Unconfigured};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{EnvFilter, fmt};
use walkdir::WalkDir;

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: String,
    body: String,
}

#[derive(Serialize)]
struct OutDoc<'a> {
    id: &'a str,
    #[serde(flatten)]
    report: SummaryReport,
}

#[derive(Parser)]
#[command(name = "precis")]
#[command(about = "Summarize text extractively or with a hosted language model", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SummaryArgs {
    /// extractive, abstractive or both
    #[arg(long, default_value_t = Mode::Extractive)]
    mode: Mode,
    /// Sentences to keep in the extractive summary (1-10)
    #[arg(long, default_value_t = DEFAULT_SENTENCES)]
    sentences: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize one text given inline, from a file, or on stdin
    Text {
        /// Text to summarize; omit or pass `-` to read stdin
        text: Option<String>,
        /// Read the text from this file instead
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,
        #[command(flatten)]
        summary: SummaryArgs,
    },
    /// Summarize every document under a path, one JSON line per document
    Batch {
        /// Input path (.txt/.json/.jsonl file or a directory of them)
        #[arg(long)]
        input: String,
        /// Output JSONL file path
        #[arg(long)]
        output: String,
        #[command(flatten)]
        summary: SummaryArgs,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Text { text, file, summary } => summarize_one(text, file, &summary),
        Commands::Batch { input, output, summary } => summarize_batch(&input, &output, &summary),
    }
}

fn generator_for(mode: Mode) -> Arc<dyn TextGenerator> {
    if mode.includes_abstractive() {
        load_generator()
    } else {
        Arc::new(Unconfigured)
    }
}

fn read_input(text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    match (text, file) {
        (_, Some(path)) => fs::read_to_string(&path).with_context(|| format!("reading {}", path.display())),
        (Some(text), None) if text != "-" => Ok(text),
        _ => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

fn summarize_one(text: Option<String>, file: Option<PathBuf>, args: &SummaryArgs) -> Result<()> {
    let request = SummaryRequest::new(read_input(text, file)?, args.mode, args.sentences);
    request.validate()?;
    let generator = generator_for(args.mode);
    let report = summarize(&request, generator.as_ref());

    let mut out = io::stdout().lock();
    match (&report.extractive, &report.abstractive) {
        (Some(extractive), Some(abstractive)) => {
            writeln!(out, "Extractive summary:\n{extractive}\n")?;
            writeln!(out, "Abstractive summary:\n{abstractive}")?;
        }
        (Some(only), None) | (None, Some(only)) => writeln!(out, "{only}")?,
        (None, None) => {}
    }
    Ok(())
}

fn summarize_batch(input: &str, output: &str, args: &SummaryArgs) -> Result<()> {
    // The count is the same for every document; check it before touching the output.
    if args.mode.includes_extractive() && !SENTENCE_RANGE.contains(&args.sentences) {
        return Err(RequestError::SentenceCount(args.sentences).into());
    }
    let docs = collect_documents(Path::new(input))?;
    tracing::info!(num_docs = docs.len(), mode = %args.mode, "loaded documents");

    if let Some(dir) = Path::new(output).parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let mut out = BufWriter::new(File::create(output).with_context(|| format!("creating {output}"))?);
    let generator = generator_for(args.mode);

    let mut written = 0usize;
    for doc in &docs {
        let request = SummaryRequest::new(doc.body.as_str(), args.mode, args.sentences);
        match request.validate() {
            Ok(()) => {}
            Err(RequestError::EmptyText) => {
                tracing::warn!(id = %doc.id, "skipping empty document");
                continue;
            }
            Err(err) => return Err(err.into()),
        }
        let report = summarize(&request, generator.as_ref());
        serde_json::to_writer(&mut out, &OutDoc { id: &doc.id, report })?;
        out.write_all(b"\n")?;
        written += 1;
    }
    out.flush()?;

    tracing::info!(written, output, "batch complete");
    Ok(())
}

/// Every `.txt` file becomes one document keyed by its path; `.json` and
/// `.jsonl` files hold `{id, body}` records.
fn collect_documents(input_path: &Path) -> Result<Vec<InputDoc>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input_path.is_dir() {
        for entry in WalkDir::new(input_path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(extension(p), Some("txt" | "json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else if input_path.is_file() {
        files.push(input_path.to_path_buf());
    } else {
        anyhow::bail!("input path {} does not exist", input_path.display());
    }

    let mut docs = Vec::new();
    for file in files {
        match extension(&file) {
            Some("jsonl") => read_jsonl(&file, &mut docs)?,
            Some("json") => read_json(&file, &mut docs)?,
            _ => {
                let body = fs::read_to_string(&file).with_context(|| format!("reading {}", file.display()))?;
                let id = file.strip_prefix(input_path).unwrap_or(&file).to_string_lossy().to_string();
                let id = if id.is_empty() { file.to_string_lossy().to_string() } else { id };
                docs.push(InputDoc { id, body });
            }
        }
    }
    Ok(docs)
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|s| s.to_str())
}

fn read_jsonl(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let doc: InputDoc = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}", file.display(), lineno + 1))?;
        docs.push(doc);
    }
    Ok(())
}

fn read_json(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                docs.push(serde_json::from_value(v)?);
            }
        }
        serde_json::Value::Object(_) => docs.push(serde_json::from_value(json)?),
        _ => tracing::warn!(file = %file.display(), "ignoring JSON that is neither an object nor an array"),
    }
    Ok(())
}
