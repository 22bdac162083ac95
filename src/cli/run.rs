use std::cell::Cell;
use std::io;
use std::process::ExitCode;
use std::rc::Rc;

use clap::Parser;
use dotenv::dotenv;
use env_logger::{Builder, Env};
use log::info;

use super::command::{Cli, Commands};
use super::shell::run_shell;
use super::{display_contact, listing_line};
use crate::prelude::{
    AppError, ContactStore, NotificationEvent, NotificationKind, PersistenceAdapter,
    StorageConfig, parse_storage_backend,
};

pub fn run_app() -> Result<ExitCode, AppError> {
    dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let config = cli.storage_config()?;
    let mut store = open_store(&config);
    info!(
        "Current storage choice is: {} ({})",
        store.storage_medium(),
        config.data_dir.display()
    );

    // Every event is rendered as it happens; a warning fails a one-shot run
    let warned = Rc::new(Cell::new(false));
    let flag = Rc::clone(&warned);
    store.subscribe(move |event| {
        render(event);
        if event.is_warning() {
            flag.set(true);
        }
    });

    match cli.command {
        Commands::Shell => {
            run_shell(&mut store, io::stdin().lock())?;
            return Ok(ExitCode::SUCCESS);
        }
        command => execute(&mut store, command)?,
    }

    if warned.get() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

pub fn open_store(config: &StorageConfig) -> ContactStore {
    let backend = parse_storage_backend(config);
    ContactStore::new(PersistenceAdapter::new(backend))
}

/// Runs one command against `store`. Outcomes reach the user through the
/// store's notifications; this only prints the data a command asks for.
pub fn execute(store: &mut ContactStore, command: Commands) -> Result<(), AppError> {
    match command {
        Commands::Add { fields } => {
            if let Ok(contact) = store.create(fields.into()) {
                println!("{}", display_contact(&contact));
            }
        }

        Commands::List { query } => {
            let contacts = match &query {
                Some(query) => store.search(query),
                None => store.contacts().to_vec(),
            };

            if contacts.is_empty() {
                println!("No Contacts Found");
                match query {
                    Some(query) if store.count() > 0 => {
                        println!("No contacts match \"{}\"", query)
                    }
                    _ => println!("Start by adding your first contact"),
                }
                return Ok(());
            }

            for (i, contact) in contacts.iter().enumerate() {
                println!("{}", listing_line(i + 1, contact));
            }
        }

        Commands::Edit { id, fields } => {
            if let Ok(contact) = store.edit(&id, fields.into()) {
                println!("{}", display_contact(&contact));
            }
        }

        Commands::Delete { id } => {
            let _ = store.delete(&id);
        }

        Commands::DeleteAll { yes } => {
            if !yes {
                return Err(AppError::Aborted(format!(
                    "Refusing to delete {} contacts without --yes",
                    store.count()
                )));
            }
            store.delete_all();
        }

        Commands::Block { id } => {
            let _ = store.toggle_block(&id);
        }

        Commands::Count => println!("{}", store.count()),

        Commands::Shell => {
            return Err(AppError::ParseCommand("shell".to_string()));
        }

        Commands::Notifications => {
            return Err(AppError::Aborted(
                "Notifications are only kept inside the shell".to_string(),
            ));
        }
    }

    Ok(())
}

pub fn render_line(event: &NotificationEvent) -> String {
    match event.kind {
        NotificationKind::Success => event.message.clone(),
        NotificationKind::Warning => format!("Warning: {}", event.message),
    }
}

fn render(event: &NotificationEvent) {
    match event.kind {
        NotificationKind::Success => println!("{}", render_line(event)),
        NotificationKind::Warning => eprintln!("{}", render_line(event)),
    }
}

fn init_logging(verbose: bool) -> Result<(), AppError> {
    let level = if verbose { "debug" } else { "warn" };

    Builder::from_env(Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .try_init()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::command::FieldArgs;
    use crate::prelude::{MemoryBackend, messages};

    fn memory_store() -> ContactStore {
        ContactStore::new(PersistenceAdapter::new(Box::new(MemoryBackend::unbounded())))
    }

    fn ann() -> FieldArgs {
        FieldArgs {
            name: "Ann".to_string(),
            phone: "123-4567890".to_string(),
            email: "a@b.com".to_string(),
            address: "1 Rd".to_string(),
            image_url: "https://x.com/i.png".to_string(),
        }
    }

    #[test]
    fn delete_all_needs_confirmation() -> Result<(), AppError> {
        let mut store = memory_store();
        execute(&mut store, Commands::Add { fields: ann() })?;

        let err = execute(&mut store, Commands::DeleteAll { yes: false }).unwrap_err();
        assert!(err.to_string().contains("without --yes"));
        assert_eq!(store.count(), 1);

        execute(&mut store, Commands::DeleteAll { yes: true })?;
        assert_eq!(store.count(), 0);
        Ok(())
    }

    #[test]
    fn rejected_commands_are_not_errors() -> Result<(), AppError> {
        let mut store = memory_store();

        execute(&mut store, Commands::Add { fields: FieldArgs::default() })?;
        execute(&mut store, Commands::Block { id: "nope".to_string() })?;
        assert_eq!(store.count(), 0);
        Ok(())
    }

    #[test]
    fn warnings_are_prefixed() {
        let event = NotificationEvent::warning(messages::NOT_FOUND);
        assert_eq!(render_line(&event), "Warning: Contact not found");
        assert_eq!(
            render_line(&NotificationEvent::success(messages::ALL_DELETED)),
            "All contacts deleted!"
        );
    }
}
