//! fieldgrid - Entry Point

use clap::{Parser, Subcommand};
use fieldgrid::model::{AppError, Column, DocumentKey};
use fieldgrid::persistence::{FileStore, LayoutCollection};
use fieldgrid::state::LayoutSession;
use fieldgrid::view::FormView;
use std::path::PathBuf;
use tracing::info;

/// fieldgrid - inspect and manage saved form layouts
#[derive(Parser, Debug)]
#[command(name = "fieldgrid")]
#[command(version)]
#[command(about = "Inspect and manage adaptive form layouts saved per dataset")]
pub struct Args {
    /// Path to configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the saved layout collection
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Layout store operations
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// List saved layouts
    List,

    /// Print the rows of a saved layout
    Show {
        /// Document key, e.g. `people.csv-layout`
        key: String,

        /// Include hidden fields
        #[arg(long)]
        show_hidden: bool,
    },

    /// Open a dataset and print the layout it resolves to
    Open {
        /// Dataset file name
        file_name: String,

        /// Dataset columns, in order
        #[arg(long, value_delimiter = ',', required = true)]
        columns: Vec<String>,

        /// Include hidden fields
        #[arg(long)]
        show_hidden: bool,

        /// Save the resolved layout under this name
        #[arg(long, value_name = "NAME")]
        save_as: Option<String>,
    },

    /// Delete a saved layout
    Delete {
        /// Document key to remove
        key: String,
    },
}

impl Command {
    fn show_hidden_override(&self) -> Option<bool> {
        match self {
            Command::Show { show_hidden, .. } | Command::Open { show_hidden, .. } => {
                show_hidden.then_some(true)
            }
            _ => None,
        }
    }
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = fieldgrid::config::load_config_with_precedence(args.config.clone())?;
        let merged = fieldgrid::config::merge_config(config_file);
        let with_env = fieldgrid::config::apply_env_overrides(merged);
        fieldgrid::config::apply_cli_overrides(
            with_env,
            args.store.clone(),
            args.command.show_hidden_override(),
        )
    };

    fieldgrid::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let store = FileStore::new(&config.store_dir);

    match args.command {
        Command::List => {
            let mut session = LayoutSession::new(store);
            session.initialize(Vec::new(), DocumentKey::default());
            let saved = session.saved_layouts();
            if saved.is_empty() {
                println!("no saved layouts in {}", config.store_dir.display());
            }
            for (key, name) in saved {
                println!("{key}\t{name}");
            }
        }
        Command::Show { key, .. } => {
            let collection = LayoutCollection::load(&store);
            let saved = collection
                .get(&DocumentKey::new(key.clone()))
                .ok_or(AppError::UnknownLayout(key))?;
            println!("{}", saved.name);
            print!("{}", FormView::build(&saved.layout, config.show_hidden).render_text());
        }
        Command::Open {
            file_name,
            columns,
            save_as,
            ..
        } => {
            let columns: Vec<Column> = columns
                .iter()
                .map(|c| c.trim())
                .filter(|c| !c.is_empty())
                .map(Column::named)
                .collect();

            let mut session = LayoutSession::new(store);
            session.initialize(columns, DocumentKey::for_file(&file_name));
            if let Some(name) = save_as {
                session.save_as(&name)?;
            }

            println!("{} ({})", session.document_key(), session.layout_name());
            print!(
                "{}",
                FormView::build(session.layout(), config.show_hidden).render_text()
            );
        }
        Command::Delete { key } => {
            let mut session = LayoutSession::new(store);
            session.initialize(Vec::new(), DocumentKey::default());
            let key = DocumentKey::new(key);
            if !session.delete_saved(&key)? {
                return Err(AppError::UnknownLayout(key.to_string()));
            }
            println!("deleted {key}");
        }
    }

    Ok(())
}
