use anyhow::Result;

use holoen_cms::cli::{Cli, Command};
use holoen_cms::{
    handle_completions, handle_media, handle_project, handle_projects, handle_submissions, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    execute_command(&cli)
}

fn execute_command(cli: &Cli) -> Result<()> {
    let out = cli.out.as_path();
    let pagination = cli.pagination.to_config();

    match &cli.command {
        Command::Projects { lang } => handle_projects(out, pagination, lang),
        Command::Project { slug, lang } => handle_project(out, pagination, slug, lang),
        Command::Submissions { project_id, slug } => {
            handle_submissions(out, pagination, project_id, slug.as_deref())
        }
        Command::Media { collection, ids } => handle_media(out, pagination, collection, ids),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
