// Copyright 2023 System76 <info@system76.com>
// SPDX-License-Identifier: MPL-2.0

use clap::Parser;
use fomat_macros::fomat;
use headctl::layout::{self, Arrangement};
use headctl::{xrandr, Config, HeadCollection};
use nu_ansi_term::{Color, Style};
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod table;
use table::Table;

/// Inspect and arrange RandR outputs
#[derive(clap::Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Override the default location of the config file.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Show column headers in the `table` and `tabs` commands.
    #[arg(long, global = true)]
    header: bool,

    /// Stack monitors vertically instead of side by side.
    #[arg(long, global = true)]
    vertical: bool,

    /// Print the xrandr command without executing it.
    #[arg(long, global = true)]
    dry_run: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// List every output, including disabled and disconnected ones.
    All,

    /// List every connected output, enabled or disabled.
    Connected,

    /// Print the name of each enabled output.
    List,

    /// Make one connected output the primary monitor.
    Primary { head: String },

    /// Look up the geometry of an output by name, alias, or `primary`.
    Query { head: String },

    /// Enable exactly these outputs, in order, and disable everything else.
    Set {
        #[arg(required = true)]
        heads: Vec<String>,
    },

    /// Print the current layout as an aligned table.
    Table,

    /// Print the current layout tab-separated, for parsing.
    Tabs,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(why) => {
            let _res = why.print();
            return if why.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(why) = run(cli) {
        eprintln!("{} {why}", Color::Red.bold().paint("error:"));
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load(cli.config.as_deref());
    let collection = HeadCollection::discover(headctl::randr::query()?);

    let arrangement = if cli.vertical {
        Arrangement::Vertical
    } else {
        Arrangement::Horizontal
    };

    match cli.command {
        Commands::All => print_lines(&outputs_lines(&config, &collection, true)),

        Commands::Connected => print_lines(&outputs_lines(&config, &collection, false)),

        Commands::List => {
            let lines: Vec<String> = collection
                .heads()
                .iter()
                .map(|head| config.alias_of(&head.name).to_owned())
                .collect();
            print_lines(&lines);
        }

        Commands::Primary { head } => return primary(&config, &collection, &head, cli.dry_run),

        Commands::Query { head } => return query(&config, &collection, &head),

        Commands::Set { heads } => {
            return set(&config, &collection, &heads, arrangement, cli.dry_run)
        }

        Commands::Table => table(&config, &collection, cli.header),

        Commands::Tabs => tabs(&config, &collection, cli.header),
    }

    Ok(())
}

/// Enables exactly the named outputs and disables every other output in
/// the snapshot, echoing the xrandr command line before running it.
fn set(
    config: &Config,
    collection: &HeadCollection,
    names: &[String],
    arrangement: Arrangement,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let enable = validate_set(config, collection, names)?;

    let directives = layout::plan(collection, &enable, arrangement);
    let args = layout::xrandr_args(&directives);

    println!("{}", xrandr::command_line(&args));

    if dry_run {
        return Ok(());
    }

    relay(xrandr::run(&args)?)
}

/// Resolves and validates the `set` arguments: no `primary` literal, every
/// name connected, no output named twice.
fn validate_set(
    config: &Config,
    collection: &HeadCollection,
    names: &[String],
) -> Result<Vec<String>, String> {
    let mut enable = Vec::with_capacity(names.len());

    for name in names {
        if name == "primary" {
            return Err(
                "the 'set' command takes specific head names, which does not include 'primary'"
                    .to_owned(),
            );
        }

        let Some(output) = collection.resolve_connected(config, name) else {
            return Err(fomat!(
                "the head name '" (name) "' does not refer to a connected monitor"
            ));
        };

        if enable
            .iter()
            .any(|already: &String| already.eq_ignore_ascii_case(output))
        {
            return Err(fomat!(
                "the head name '" (output) "' (alias '" (config.alias_of(output)) "') "
                "was specified twice, which is not allowed"
            ));
        }

        enable.push(output.to_owned());
    }

    Ok(enable)
}

fn primary(
    config: &Config,
    collection: &HeadCollection,
    name: &str,
    dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let Some(output) = collection.resolve_connected(config, name) else {
        return Err(
            fomat!("the head name '" (name) "' does not refer to a connected monitor").into(),
        );
    };

    let args = vec![
        "--output".to_owned(),
        output.to_owned(),
        "--primary".to_owned(),
    ];

    println!("{}", xrandr::command_line(&args));

    if dry_run {
        return Ok(());
    }

    relay(xrandr::run(&args)?)
}

fn query(
    config: &Config,
    collection: &HeadCollection,
    name: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(head) = collection.find_enabled(config, name) {
        println!(
            "{}\t{}\t{}\t{}\t{}",
            config.alias_of(&head.name),
            head.x,
            head.y,
            head.width,
            head.height
        );
        return Ok(());
    }

    if let Some(output) = collection.find_disabled(config, name) {
        println!("{} disabled", config.alias_of(output));
        return Ok(());
    }

    Err(fomat!("could not find a head matching the name '" (name) "'").into())
}

fn table(config: &Config, collection: &HeadCollection, header: bool) {
    let mut table = Table::default();

    if header {
        table.push(
            [
                "Monitor number",
                "Nice output name",
                "Output name",
                "(X, Y)",
                "WidthxHeight",
                "Is primary",
            ]
            .map(str::to_owned),
        );
    }

    for (index, head) in collection.heads().iter().enumerate() {
        table.push([
            index.to_string(),
            config.alias_of(&head.name).to_owned(),
            head.name.clone(),
            fomat!("(" (head.x) ", " (head.y) ")"),
            fomat!((head.width) "x" (head.height)),
            if collection.is_primary(head) {
                "primary".to_owned()
            } else {
                String::new()
            },
        ]);
    }

    let mut lines = table.render();
    if header && !lines.is_empty() {
        let painted = Style::new().bold().paint(lines[0].as_str()).to_string();
        lines[0] = painted;
    }

    print_lines(&lines);
}

fn tabs(config: &Config, collection: &HeadCollection, header: bool) {
    let mut lines = Vec::with_capacity(collection.heads().len() + 1);

    if header {
        lines.push(
            "Monitor number\tNice output name\tOutput name\tX\tY\tWidth\tHeight\tIs primary"
                .to_owned(),
        );
    }

    for (index, head) in collection.heads().iter().enumerate() {
        lines.push(fomat!(
            (index) "\t"
            (config.alias_of(&head.name)) "\t"
            (head.name) "\t"
            (head.x) "\t" (head.y) "\t"
            (head.width) "\t" (head.height) "\t"
            if collection.is_primary(head) { "primary" }
        ));
    }

    print_lines(&lines);
}

/// Builds the sorted `connected`/`all` listing: one line per output, with
/// geometry for enabled heads and a state word otherwise.
fn outputs_lines(config: &Config, collection: &HeadCollection, all: bool) -> Vec<String> {
    let mut lines = Vec::new();

    for head in collection.heads() {
        lines.push(fomat!(
            (config.alias_of(&head.name))
            " (" (head.x) ", " (head.y) ") "
            (head.width) "x" (head.height)
        ));
    }

    for output in collection.disabled() {
        lines.push(fomat!((config.alias_of(output)) " disabled"));
    }

    if all {
        for output in collection.disconnected() {
            lines.push(fomat!((config.alias_of(output)) " disconnected"));
        }
    }

    lines.sort_unstable();
    lines
}

fn print_lines(lines: &[String]) {
    let mut stdout = std::io::stdout().lock();
    for line in lines {
        let _res = writeln!(stdout, "{line}");
    }
    let _res = stdout.flush();
}

/// Relays the captured output of the external tool verbatim. A non-zero
/// exit becomes an error after both streams have been printed.
fn relay(output: std::process::Output) -> Result<(), Box<dyn std::error::Error>> {
    {
        let mut stdout = std::io::stdout().lock();
        let _res = stdout.write_all(&output.stdout);
        let _res = stdout.flush();
    }
    let _res = std::io::stderr().write_all(&output.stderr);

    if output.status.success() {
        Ok(())
    } else {
        Err(fomat!((xrandr::PROGRAM) " exited with " (output.status)).into())
    }
}
