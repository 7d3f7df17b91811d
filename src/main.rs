//! csv2bib: CSV to BibTeX CLI Tool
//!
//! Reads a CSV bibliography export, negotiates which columns become which
//! BibTeX fields, and writes one `@article` record per row.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use csv2bib::cli::{Cli, NonInteractivePrompter, TerminalPrompter};
use csv2bib::pipeline::{run_conversion, ConvertError, JsonMappingStore, Prompter};
use csv2bib::utils::{init_logging, print_banner, print_completion, print_config, print_error};

/// Exit status when the input table is rejected during validation
const EXIT_INPUT_REJECTED: u8 = 3;

fn main() -> ExitCode {
    // Wrong argument count prints usage and exits here, before any file is touched
    let cli = Cli::parse();
    init_logging();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&format!("{:#}", e));
            let rejected = e
                .downcast_ref::<ConvertError>()
                .is_some_and(ConvertError::is_input_rejection);
            if rejected {
                print_error("Input rejected; no output was written.");
                ExitCode::from(EXIT_INPUT_REJECTED)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let options = cli.convert_options();

    if options.show_progress {
        print_banner(env!("CARGO_PKG_VERSION"));
        print_config(&cli.input, &cli.output, &cli.mapping_file);
    }

    let store = JsonMappingStore::new(&cli.mapping_file);
    let mut prompter: Box<dyn Prompter> = if cli.no_confirm {
        Box::new(NonInteractivePrompter)
    } else {
        Box::new(TerminalPrompter)
    };

    let summary = run_conversion(
        &cli.input,
        &cli.output,
        &store,
        prompter.as_mut(),
        &options,
    )?;

    if options.show_progress {
        summary.display();
        print_completion(&cli.output);
    }

    Ok(())
}
