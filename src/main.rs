use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

#[derive(Parser, Debug)]
#[command(name = "midden", about = "A minimal, Git-object-database-compatible content store")]
pub struct Args {
    /// Repeat for more verbose logging (info level by default).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create a new repository.
    Init {
        #[arg(default_value = ".")]
        path: PathBuf,
    },
    /// Print an object's payload to stdout.
    CatFile {
        #[arg(value_parser = ["blob", "commit", "tag", "tree"])]
        kind: String,
        object: String,
    },
    /// Compute an object's id, optionally storing it.
    HashObject {
        #[arg(short = 't', default_value = "blob")]
        kind: String,
        #[arg(short = 'w')]
        write: bool,
        path: PathBuf,
    },
    /// Print the commit DAG reachable from `commit` as a Graphviz digraph.
    Log {
        #[arg(default_value = "HEAD")]
        commit: String,
    },
    /// List a tree object's entries.
    LsTree {
        #[arg(long)]
        name_only: bool,
        object: String,
    },
    /// Materialize a commit or tree into the workspace.
    Checkout { commit: String },
    /// Build a tree from the workspace, write a commit, and move HEAD.
    Commit {
        #[arg(short = 'm')]
        message: String,
        #[arg(long, default_value = "Example <example@example.com>")]
        author: String,
    },
    /// Create a tag object and its ref.
    Tag {
        tagname: String,
        #[arg(default_value = "HEAD")]
        object: String,
        #[arg(short = 'm', default_value = "")]
        message: String,
        #[arg(long, default_value = "Example <example@example.com>")]
        author: String,
    },
    /// Resolve a revision name to a full object id.
    RevParse { rev: String },
    /// Write the workspace as a tree object (plumbing).
    WriteTree,
    /// Write a commit object from an existing tree (plumbing).
    CommitTree {
        #[arg(short = 'm')]
        message: String,
        #[arg(short = 'p')]
        parent: Option<String>,
        tree: String,
    },
}

fn main() {
    let args = Args::parse();

    const INFO: usize = 2;
    stderrlog::new()
        .module(module_path!())
        .verbosity(INFO + args.verbose as usize)
        .timestamp(stderrlog::Timestamp::Off)
        .init()
        .expect("logger already initialized");

    if let Err(err) = run(args.command) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Init { path } => cli::init::run(&path),
        Command::CatFile { kind, object } => cli::cat_file::run(&kind, &object),
        Command::HashObject { kind, write, path } => cli::hash_object::run(&kind, write, &path),
        Command::Log { commit } => cli::log::run(&commit),
        Command::LsTree { name_only, object } => cli::ls_tree::run(name_only, &object),
        Command::Checkout { commit } => cli::checkout::run(&commit),
        Command::Commit { message, author } => cli::commit::run(&message, &author),
        Command::Tag {
            tagname,
            object,
            message,
            author,
        } => cli::tag::run(&tagname, &object, &message, &author),
        Command::RevParse { rev } => cli::rev_parse::run(&rev),
        Command::WriteTree => cli::write_tree::run(),
        Command::CommitTree {
            message,
            parent,
            tree,
        } => cli::commit_tree::run(&message, parent.as_deref(), &tree),
    }
}
