//! b2q CLI - convert bracketed phrase-structure trees to tikz-qtree LaTeX

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use qtex::{bracket_to_qtree, Blocks, BoundaryPolicy, CompileOptions, Config, LatexFormatter};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read};
#[cfg(feature = "cli")]
use std::time::Duration;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "b2q")]
#[command(version)]
#[command(about = "Convert bracketed phrase-structure trees to tikz-qtree LaTeX", long_about = None)]
struct Cli {
    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Option of \documentclass
    #[arg(long, default_value = "standalone")]
    doc_option: String,

    /// Style options for the tikzpicture environment
    #[arg(long, default_value = "")]
    tikz_opt: String,

    /// Compile each tree to a PDF instead of printing LaTeX
    #[arg(long)]
    enable_pdf: bool,

    /// Prefix used to name generated PDF and log files (with --enable-pdf)
    #[arg(long, default_value = "qt00")]
    out_prefix: String,

    /// Treat blank lines purely as block boundaries, without bracket-depth checking
    #[arg(long)]
    lenient: bool,

    /// Typesetter executable to invoke (with --enable-pdf)
    #[arg(long, default_value = "pdflatex")]
    latex_cmd: String,

    /// Per-tree compile timeout in seconds (with --enable-pdf)
    #[arg(long, default_value_t = 60)]
    timeout: u64,
}

#[cfg(feature = "cli")]
fn main() -> io::Result<()> {
    let cli = Cli::parse();

    let input = match cli.input_file {
        Some(ref path) => fs::read_to_string(path)?,
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let policy = if cli.lenient {
        BoundaryPolicy::Lenient
    } else {
        BoundaryPolicy::Strict
    };
    let formatter = LatexFormatter::new(Config {
        doc_class: cli.doc_option.clone(),
        tikz_opt: cli.tikz_opt.clone(),
    });
    let compile_options = CompileOptions {
        latex_cmd: cli.latex_cmd.clone(),
        out_prefix: cli.out_prefix.clone(),
        timeout: Duration::from_secs(cli.timeout),
    };

    let mut documents = Vec::new();
    let mut failed = 0usize;

    for (i, block) in Blocks::new(&input, policy).enumerate() {
        let block = match block {
            Ok(block) => block,
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        };
        let document = formatter.render(&bracket_to_qtree(&block));

        if cli.enable_pdf {
            match qtex::compile_document(&document, i, &compile_options) {
                Ok(path) => eprintln!("✓ {}", path.display()),
                Err(e) if e.is_recoverable() => {
                    eprintln!("✗ tree {}: {}", i, e);
                    failed += 1;
                }
                Err(e) => {
                    // I/O errors are fatal; only typesetter failures skip the tree.
                    eprintln!("error: {}", e);
                    std::process::exit(1);
                }
            }
        } else {
            documents.push(document);
        }
    }

    if !cli.enable_pdf && !documents.is_empty() {
        let rendered = documents.join("\n\n");
        match cli.output {
            Some(ref path) => {
                fs::write(path, rendered + "\n")?;
                eprintln!("✓ Output written to: {}", path);
            }
            None => println!("{}", rendered),
        }
    }

    // Compile failures don't stop the batch, but they do fail the run.
    if failed > 0 {
        std::process::exit(1);
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install qtex --features cli");
}
