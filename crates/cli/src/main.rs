mod echo;

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use readability_core::{FetchConfig, PageSource, Readability, ReadabilityOptions};
use tracing_subscriber::EnvFilter;
use url::Url;

use echo::{Level, format_size, print_banner, print_extraction_details, print_status, print_step};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Pull the main article out of an HTML page
#[derive(Parser, Debug)]
#[command(name = "readability")]
#[command(version)]
#[command(about = "Pull the main article out of an HTML page", long_about = None)]
struct Args {
    /// URL to fetch, local HTML file, or "-" for stdin
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Host the page came from (taken from INPUT when it is a URL)
    #[arg(long, value_name = "HOST")]
    host: Option<String>,

    /// Request path with query and fragment (taken from INPUT when it is a URL)
    #[arg(long, value_name = "PATH")]
    request: Option<String>,

    /// Ignore paragraphs with less text than this when scoring
    #[arg(long, default_value = "25", value_name = "NUM")]
    min_text_length: usize,

    /// Retry without pruning when the article has less text than this
    #[arg(long, default_value = "250", value_name = "NUM")]
    retry_length: usize,

    /// Tags kept in the output, comma separated
    #[arg(long, value_delimiter = ',', default_value = "div,p", value_name = "TAGS")]
    tags: Vec<String>,

    /// Attributes kept on whitelisted tags, comma separated
    #[arg(long, value_delimiter = ',', value_name = "ATTRS")]
    attributes: Vec<String>,

    /// Site rule file (default: <config dir>/readability/special_rules.txt)
    #[arg(long, value_name = "FILE")]
    exceptions_file: Option<PathBuf>,

    /// Print the extraction result as JSON
    #[arg(long)]
    json: bool,

    /// HTTP timeout in seconds
    #[arg(long, default_value = "30", value_name = "SECS")]
    timeout: u64,

    /// Custom User-Agent for HTTP requests
    #[arg(long, value_name = "UA")]
    user_agent: Option<String>,

    /// Show progress on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Trace scoring and cleaning decisions on stderr
    #[arg(short, long)]
    debug: bool,
}

fn init_tracing(debug: bool) {
    let filter = if debug {
        EnvFilter::new("readability=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).with_target(false).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    init_tracing(args.debug);

    if args.verbose {
        print_banner();
        if args.debug {
            print_status(Level::Info, "Debug tracing enabled");
        }
        eprintln!();
    }

    let source = PageSource::parse(&args.input);
    if args.verbose {
        let step = match &source {
            PageSource::Stdin => "Reading from stdin".to_string(),
            PageSource::Url(url) => format!("Fetching from {}", url.as_str().bright_white().underline()),
            PageSource::File(path) => format!("Reading from file {}", path.display().bright_white()),
        };
        print_step(1, 3, &step);
    }

    let mut config = FetchConfig { timeout: args.timeout, ..Default::default() };
    if let Some(user_agent) = &args.user_agent {
        config.user_agent = user_agent.clone();
    }
    let page = source.read(&config).await.with_context(|| match &source {
        PageSource::Stdin => "Failed to read from stdin".to_string(),
        PageSource::Url(url) => format!("Failed to fetch URL: {}", url),
        PageSource::File(path) => format!("Failed to read file: {}", path.display()),
    })?;

    if args.verbose {
        eprintln!("  {} {}\n", "Size:".dimmed(), format_size(page.html.len()).bright_white());
        if let PageSource::Url(requested) = &source
            && let Some(url) = page.url.as_ref().filter(|url| *url != requested)
        {
            print_status(Level::Info, &format!("Redirected to {}", url));
        }
    }

    let mut builder = ReadabilityOptions::builder()
        .min_text_length(args.min_text_length)
        .retry_length(args.retry_length)
        .tags(&args.tags)
        .attributes(&args.attributes)
        .debug(args.debug);
    if let Some(path) = &args.exceptions_file {
        builder = builder.exceptions_file(path);
    }

    let reader = Readability::with_options(builder.build()).context("Failed to load site rules")?;

    let mut doc = reader.document(&page.html, page.url.as_ref().map(Url::as_str)).context("Failed to read page address")?;
    if let Some(host) = &args.host {
        doc = doc.with_base_uri(host);
    }
    if let Some(request) = &args.request {
        doc = doc.with_request(request);
    }

    if args.verbose {
        print_step(2, 3, "Extracting main content");
        if doc.host().is_empty() {
            print_status(Level::Warning, "No host known, site-specific extraction is off");
        } else {
            eprintln!("  {} {}", "Host:".dimmed(), doc.host().bright_white());
        }
    }

    let extracted = doc.extract();

    if args.verbose {
        print_extraction_details(&extracted);
        print_step(3, 3, "Writing output");
    }

    let output = if args.json {
        serde_json::to_string_pretty(&extracted).context("Failed to serialize result")?
    } else {
        extracted.content
    };

    match args.output {
        Some(path) => {
            fs::write(&path, output).with_context(|| format!("Failed to write to file: {}", path.display()))?;
            print_status(Level::Success, &format!("Output written to {}", path.display().bright_white()));
        }
        None => {
            println!("{}", output);
        }
    }

    Ok(())
}
