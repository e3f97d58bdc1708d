use std::{env, fs, path::PathBuf};

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=OUT_DIR");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let completions_dir = out_dir.join("completions");

    fs::create_dir_all(&completions_dir).unwrap();

    let mut cmd = clap::Command::new("readability")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Pull the main article out of an HTML page")
        .arg(clap::arg!(<INPUT> "URL to fetch, local HTML file, or '-' for stdin"))
        .arg(
            clap::arg!(-o --output <FILE> "Output file (default: stdout)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--host <HOST> "Host the page came from"))
        .arg(clap::arg!(--request <PATH> "Request path with query and fragment"))
        .arg(clap::arg!(--"min-text-length" <NUM> "Ignore paragraphs with less text than this").default_value("25"))
        .arg(clap::arg!(--"retry-length" <NUM> "Retry without pruning below this article length").default_value("250"))
        .arg(clap::arg!(--tags <TAGS> "Tags kept in the output, comma separated").default_value("div,p"))
        .arg(clap::arg!(--attributes <ATTRS> "Attributes kept on whitelisted tags, comma separated"))
        .arg(
            clap::arg!(--"exceptions-file" <FILE> "Site rule file")
                .value_name("FILE")
                .value_parser(clap::value_parser!(std::path::PathBuf)),
        )
        .arg(clap::arg!(--json "Print the extraction result as JSON"))
        .arg(clap::arg!(--timeout <SECS> "HTTP timeout in seconds").default_value("30"))
        .arg(clap::arg!(--"user-agent" <UA> "Custom User-Agent for HTTP requests").value_name("UA"))
        .arg(clap::arg!(-v --verbose "Show progress on stderr"))
        .arg(clap::arg!(-d --debug "Trace scoring and cleaning decisions on stderr"));

    for shell in [
        clap_complete::Shell::Bash,
        clap_complete::Shell::Zsh,
        clap_complete::Shell::Fish,
        clap_complete::Shell::PowerShell,
    ] {
        clap_complete::generate_to(shell, &mut cmd, "readability", &completions_dir).unwrap();
    }
}
