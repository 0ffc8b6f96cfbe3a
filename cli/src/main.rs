mod document;
mod test_runner;

use std::path::Path;
use std::process;

use clap::{Parser, Subcommand};
use codespan_reporting::diagnostic::Diagnostic;
use codespan_reporting::files::SimpleFiles;
use codespan_reporting::term;
use codespan_reporting::term::termcolor::{ColorChoice, StandardStream};

use mdtags::{Renderer, Validator};

use document::Overrides;

const SUBCOMMANDS: &[&str] = &["render", "test", "help"];

#[derive(Parser)]
#[command(name = "mdtags", version, about = "Render markdown from typed document trees")]
struct Cli {
    /// Disable colored error output
    #[arg(long, global = true)]
    no_color: bool,

    /// Log debug output to stderr (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a TOML document description to markdown
    Render(RenderArgs),

    /// Run .test.toml fixture files
    Test(TestArgs),
}

#[derive(clap::Args)]
struct RenderArgs {
    /// TOML document file
    file: String,

    /// Target dialect (basic or reddit); overrides the file's `dialect` key
    #[arg(short, long)]
    dialect: Option<String>,

    /// Render without validating
    #[arg(long)]
    recover: bool,

    /// Validate only, don't render (exit 0 if valid)
    #[arg(long)]
    check: bool,

    /// Dump the built node tree
    #[arg(long)]
    tree: bool,
}

#[derive(clap::Args)]
struct TestArgs {
    /// Path to a .test.toml file or directory containing them
    path: String,

    /// Run only tests in these categories (subfolder names). Repeatable.
    #[arg(short, long)]
    category: Vec<String>,

    /// List available categories and exit
    #[arg(long)]
    list_categories: bool,
}

fn main() {
    // `mdtags doc.toml` is shorthand for `mdtags render doc.toml`.
    let mut args: Vec<String> = std::env::args().collect();
    if let Some(pos) = args
        .iter()
        .skip(1)
        .position(|a| !a.starts_with('-'))
        .map(|i| i + 1)
    {
        if !SUBCOMMANDS.contains(&args[pos].as_str()) {
            args.insert(pos, "render".to_string());
        }
    }

    let cli = Cli::parse_from(&args);
    init_logging(cli.verbose);

    match cli.command {
        Command::Render(render_args) => do_render(render_args, cli.no_color),
        Command::Test(test_args) => {
            let path = Path::new(&test_args.path);
            if test_args.list_categories {
                test_runner::list_categories(path);
                return;
            }
            let exit_code = test_runner::run_tests(path, cli.no_color, &test_args.category);
            process::exit(exit_code);
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

fn do_render(args: RenderArgs, no_color: bool) {
    let source = match std::fs::read_to_string(&args.file) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", args.file, e);
            process::exit(1);
        }
    };

    let mut files = SimpleFiles::new();
    let file_id = files.add(args.file.clone(), source.clone());

    let overrides = Overrides {
        dialect: args.dialect,
        recover: args.recover,
    };
    let loaded = match document::load(&source, &overrides) {
        Ok(loaded) => loaded,
        Err(error) => {
            emit(no_color, &files, &error.to_diagnostic(file_id));
            process::exit(1);
        }
    };

    if args.tree {
        println!("{:#?}", loaded.document);
        return;
    }

    let registry = mdtags_reddit::registry();

    if args.check {
        match Validator::new(&registry).validate(&loaded.document, loaded.options.dialect) {
            Ok(()) => eprintln!(
                "ok: {} is valid {} markdown",
                args.file, loaded.options.dialect
            ),
            Err(error) => {
                emit(no_color, &files, &error.to_diagnostic());
                process::exit(1);
            }
        }
        return;
    }

    match Renderer::new(&registry).render(&loaded.document, loaded.options) {
        Ok(markdown) => println!("{}", markdown),
        Err(error) => {
            emit(no_color, &files, &error.to_diagnostic());
            process::exit(1);
        }
    }
}

fn emit(no_color: bool, files: &SimpleFiles<String, String>, diagnostic: &Diagnostic<usize>) {
    let color_choice = if no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let writer = StandardStream::stderr(color_choice);
    let config = term::Config::default();
    let _ = term::emit_to_write_style(&mut writer.lock(), &config, files, diagnostic);
}
