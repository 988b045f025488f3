use clap::Parser;
use drillhole_qaqc::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Drill Hole QAQC - Sample QC Insertion and Naming");
    println!("================================================");
    println!();
    println!("Insert blank, standard and duplicate QC samples into drill hole");
    println!("sample lists and assign stable, depth-ordered sample names.");
    println!();
    println!("USAGE:");
    println!("    drillhole-qaqc <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    insert      Insert QC samples and assign names (main command)");
    println!("    renumber    Assign names to uncommitted samples only");
    println!("    validate    Check names, duplicate links and depth order");
    println!("    preview     Estimate QC counts for a number of regular samples");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Insert QC samples into one hole using a config file:");
    println!("    drillhole-qaqc insert DH001.csv --config qaqc.json --hole-token DH001-");
    println!();
    println!("    # Process a directory of holes, writing to ./out:");
    println!("    drillhole-qaqc insert holes/ --output out/");
    println!();
    println!("    # Validate a finished sample list as JSON:");
    println!("    drillhole-qaqc validate DH001_qaqc.csv --format json");
    println!();
    println!("    # Expected QC counts for 250 samples:");
    println!("    drillhole-qaqc preview --count 250");
    println!();
    println!("For detailed help on any command, use:");
    println!("    drillhole-qaqc <COMMAND> --help");
}
