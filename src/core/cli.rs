use clap::{arg, command, Parser, Subcommand};

#[derive(Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
    #[arg(short, long)]
    pub configuration_file: Option<String>,
    #[arg(short, long)]
    pub verbosity: Option<log::LevelFilter>,
}

#[derive(Subcommand)]
pub enum Command {
    /// creates a new account
    Register {
        username: String,
        password: String,
        /// optional contact email
        #[arg(short, long)]
        email: Option<String>,
    },
    /// logs in and stores the session
    Login { username: String, password: String },
    /// logs out the stored session
    Logout,
    /// shows the login state and re-validates the session
    Status,
    /// shows the profile of the logged user
    Me,
    /// lists the spend kinds of the logged user
    Kinds,
    /// manages spends of the logged user
    Spends {
        #[command(subcommand)]
        command: SpendsCommand,
    },
    /// dumps every user (debug)
    Users,
}

#[derive(Subcommand)]
pub enum SpendsCommand {
    /// lists spends
    List,
    /// adds a spending
    Add {
        amount: String,
        currency: String,
        /// kind id or name
        kind: String,
    },
    /// shows one spending
    Show { id: String },
    /// deletes one spending
    Delete { id: String },
}
