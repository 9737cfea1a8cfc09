use std::env;
use std::fs;
use std::process;

use anyhow::Context;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use stackgen::codegen::CodeGenerator;
use stackgen::config::{Config, USAGE};
use stackgen::{Error, loader, report};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = match Config::from_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            eprintln!("{}", USAGE);
            process::exit(1);
        }
    };

    if let Err(e) = run(&config) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(config: &Config) -> anyhow::Result<()> {
    info!(input = %config.input.display(), "compiling");

    let source = fs::read_to_string(&config.input)
        .with_context(|| format!("reading {}", config.input.display()))?;
    let program = loader::load(&source)
        .map_err(Error::from)
        .inspect_err(log_failure)
        .with_context(|| format!("loading {}", config.input.display()))?;

    if config.tree {
        print!("{}", report::render_tree(&program.ast, program.root));
    }
    if let Some(path) = &config.dot {
        fs::write(path, report::to_dot(&program.ast, program.root))
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "DOT graph written");
    }
    if let Some(path) = &config.symbols {
        fs::write(path, report::symbol_report(&program.symbols))
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "symbol table written");
    }

    CodeGenerator::new(&program.ast, &program.symbols)
        .with_options(config.codegen_options())
        .generate_file(program.root, &config.output)
        .inspect_err(log_failure)?;

    println!("Assembly generated: {}", config.output.display());
    Ok(())
}

fn log_failure(err: &Error) {
    error!(category = %err.category(), error = ?err, "compilation failed");
}
