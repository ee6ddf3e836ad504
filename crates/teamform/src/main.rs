//! `teamform` - CLI for filling in team forms
//!
//! This binary drives a team form from the terminal, either interactively or
//! from a script of session commands.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::fs::File;
use std::io::{self, BufRead, BufReader};

use clap::Parser;

use teamform::cli::{Cli, Command, ConfigCommand, OutputFormat};
use teamform::{init_logging, Config, Session, Team};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    // Execute the command
    match cli.command {
        Command::Edit(edit_cmd) => {
            let stdin = io::stdin();
            let mut session = Session::new(&config)?;
            let team = session.run_interactive(stdin.lock(), &mut io::stdout())?;
            print_outcome(team.as_ref(), edit_cmd.format)
        }
        Command::Run(run_cmd) => {
            let input: Box<dyn BufRead> = if run_cmd.script.as_os_str() == "-" {
                Box::new(BufReader::new(io::stdin()))
            } else {
                Box::new(BufReader::new(File::open(&run_cmd.script)?))
            };
            let mut session = Session::new(&config)?;
            let team = session.run_script(input, &mut io::stdout())?;
            print_outcome(team.as_ref(), run_cmd.format)
        }
        Command::Config(config_cmd) => handle_config(&config, config_cmd),
    }
}

fn print_outcome(team: Option<&Team>, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let Some(team) = team else {
        println!("Form closed without submitting.");
        return Ok(());
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(team)?),
        OutputFormat::Plain => {
            println!("Team submitted");
            println!("==============");
            println!("Name:          {}", team.name);
            println!("Status:        {}", team.status);
            println!("Description:   {}", team.description);
            if let Some(logo) = &team.logo_url {
                println!("Logo:          {logo}");
            }
            println!("Members:       {}", team.members_text());
            println!("Links:         {}", team.links_text());
            println!("Submitted at:  {}", team.submitted_at.to_rfc3339());
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> Result<(), Box<dyn std::error::Error>> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                for (title, list) in [("Members", &config.members), ("Links", &config.links)] {
                    println!();
                    println!("[{title}]");
                    println!("  Max entries:        {}", list.max_entries);
                    println!("  Placeholder:        {}", list.placeholder);
                    println!("  Enforce minimum:    {}", list.enforce_minimum);
                }
                println!();
                println!("[Form]");
                println!(
                    "  Default description: {}",
                    config.form.default_description
                );
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
