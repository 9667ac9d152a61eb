use clap::{Parser, Subcommand};
use quad_cli::commands;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scripted two-user walkthrough against the in-memory store
    Demo,
    /// Sign in as one identity and create a single event
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        date: String,
        #[arg(long)]
        time: String,
        #[arg(long)]
        location: String,
        #[arg(long, default_value = quad_config::DEMO_USER_ID)]
        user: String,
        #[arg(long, default_value = quad_config::DEMO_USER_EMAIL)]
        email: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).expect("default subscriber");

    match cli.command {
        Commands::Demo => commands::cmd_demo()?,
        Commands::Create {
            title,
            description,
            date,
            time,
            location,
            user,
            email,
        } => commands::cmd_create(title, description, date, time, location, user, email)?,
    }

    Ok(())
}
