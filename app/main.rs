use std::{env::current_dir, fmt::Debug, path::PathBuf};

use clap::{Parser, Subcommand};
use lib::{checkout::checkout, commit::commit, dot_vcs::DotVcs, error::Error};

const COMMANDS: &[(&str, &str)] = &[
    ("config", "Get and set a username."),
    ("add", "Add a file to the index."),
    ("log", "Show commit logs."),
    ("commit", "Save changes."),
    ("checkout", "Restore a file."),
];

#[derive(Parser, Debug)]
#[command(
    name = "svcs",
    disable_help_flag = true,
    disable_help_subcommand = true
)]
struct Arguments {
    #[arg(long, help = "print the list of commands")]
    help: bool,
    #[arg(
        short = 'C',
        long = "dir",
        global = true,
        help = "working directory to operate on instead of the current one"
    )]
    dir: Option<PathBuf>,
    #[clap(subcommand)]
    cmd: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    #[clap(about = "get and set a username")]
    Config { username: Option<String> },
    #[clap(about = "list tracked files, or track a new one")]
    Add { file: Option<String> },
    #[clap(about = "show commit logs")]
    Log {
        #[arg(long, help = "print the history as JSON records")]
        json: bool,
    },
    #[clap(about = "save the tracked files as a new commit")]
    Commit {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        message: Vec<String>,
    },
    #[clap(about = "restore tracked files from a commit")]
    Checkout { commit_id: Option<String> },
    #[command(external_subcommand)]
    Other(Vec<String>),
}

fn print_help() {
    println!("These are SVCS commands:");
    for (name, about) in COMMANDS {
        println!("{:<11}{}", name, about);
    }
}

fn not_a_command(arg: &str) {
    println!("'{}' is not a SVCS command.", arg);
}

fn run(cmd: Command, vcs: &DotVcs) -> Result<(), Error> {
    use Command::*;
    match cmd {
        Config { username: None } => match vcs.username()? {
            Some(username) => println!("The username is {}.", username),
            None => println!("Please, tell me who you are."),
        },
        Config {
            username: Some(username),
        } => {
            vcs.set_username(&username)?;
            println!("The username is {}.", username);
        }
        Add { file: None } => {
            vcs.ensure()?;
            let index = vcs.index();
            if !index.exists()? {
                println!("Add a file to the index.");
                return Ok(());
            }
            let tracked = index.list()?;
            if tracked.is_empty() {
                println!("No tracked files.");
            } else {
                println!("Tracked files:");
                for path in tracked {
                    println!("{}", path);
                }
            }
        }
        Add { file: Some(file) } => {
            vcs.ensure()?;
            if !vcs.work_dir().join(&file).is_file() {
                return Err(Error::FileNotFound(file));
            }
            vcs.index().append(&file)?;
            println!("The file '{}' is tracked.", file);
        }
        Log { json: false } => match vcs.history().read_raw()? {
            Some(contents) if !contents.is_empty() => {
                for line in contents.lines() {
                    println!("{}", line);
                }
            }
            _ => println!("No commits yet."),
        },
        Log { json: true } => {
            let records = vcs.history().list()?;
            println!("{}", serde_json::to_string_pretty(&records)?);
        }
        Commit { message } => {
            let message = (!message.is_empty()).then(|| message.join(" "));
            let tracked = vcs.index().list()?;
            let author = vcs.username()?.unwrap_or_default();
            commit(
                message.as_deref(),
                &tracked,
                vcs.work_dir(),
                &author,
                &mut vcs.history(),
                &mut vcs.commits(),
            )?;
            println!("Changes are committed.");
        }
        Checkout { commit_id } => {
            let tracked = vcs.index().list()?;
            let result = checkout(
                commit_id.as_deref(),
                &tracked,
                vcs.work_dir(),
                &vcs.commits(),
            )?;
            println!("Switched to commit {}.", result.id);
        }
        Other(args) => not_a_command(args.first().map(String::as_str).unwrap_or_default()),
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = match Arguments::try_parse() {
        Ok(args) => args,
        Err(err) => {
            let first = std::env::args().nth(1).unwrap_or_default();
            if COMMANDS.iter().any(|(name, _)| *name == first) {
                log::debug!("could not parse arguments to {}: {}", first, err);
                println!("{}", err.render());
            } else {
                not_a_command(&first);
            }
            return;
        }
    };
    if args.help {
        print_help();
        return;
    }
    let cmd = match args.cmd {
        Some(cmd) => cmd,
        None => {
            print_help();
            return;
        }
    };
    let work_dir = match args.dir {
        Some(dir) => dir,
        None => match current_dir() {
            Ok(dir) => dir,
            Err(err) => {
                println!("{}", err);
                return;
            }
        },
    };
    let vcs = DotVcs::new(work_dir);
    if let Err(err) = run(cmd, &vcs) {
        log::debug!("{:?}", err);
        println!("{}", err);
    }
}
