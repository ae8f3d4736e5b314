//! fb2text - FB2 ebook text extractor

use std::process::ExitCode;

use clap::Parser;

use fb2text::{ParseOptions, parse_file};

#[derive(Parser)]
#[command(name = "fb2text")]
#[command(version, about = "FB2 ebook text extractor", long_about = None)]
#[command(after_help = "EXAMPLES:
    fb2text book.fb2            Print the annotated text lines
    fb2text book.fb2.zip        Archives are unpacked automatically
    fb2text -i book.fb2         Show book metadata only
    fb2text -p book.fb2         Plain text, no {{...}} markers")]
struct Cli {
    /// Input file (FB2, optionally inside a ZIP or GZIP container)
    #[arg(value_name = "INPUT")]
    input: String,

    /// Show book metadata without extracting text
    #[arg(short, long)]
    info: bool,

    /// Suppress structural and emphasis markers in the output
    #[arg(short, long)]
    plain: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = if cli.info {
        show_info(&cli.input)
    } else {
        dump_text(&cli.input, cli.plain)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn show_info(path: &str) -> Result<(), String> {
    let book = parse_file(path, &ParseOptions::default()).map_err(|e| e.to_string())?;

    let info = &book.info;
    println!("File: {path}");
    println!("Title: {}", info.title);
    if !info.authors.is_empty() {
        let names: Vec<String> = info
            .authors
            .iter()
            .map(|a| format!("{} {}", a.first_name, a.last_name).trim().to_string())
            .collect();
        println!("Authors: {}", names.join(", "));
    }
    if !info.sequence.is_empty() {
        println!("Sequence: {}", info.sequence);
    }
    if !info.genre.is_empty() {
        println!("Genre: {}", info.genre);
    }
    if !info.language.is_empty() {
        println!("Language: {}", info.language);
    }

    Ok(())
}

fn dump_text(path: &str, plain: bool) -> Result<(), String> {
    let mut options = ParseOptions::new().with_body();
    if plain {
        options = options.with_skip_system_lines();
    }

    let book = parse_file(path, &options).map_err(|e| e.to_string())?;
    for line in &book.lines {
        println!("{line}");
    }

    Ok(())
}
