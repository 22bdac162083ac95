use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::prelude::{AppError, ContactFields, StorageConfig, StorageMediums};
use crate::storage::DEFAULT_QUOTA_BYTES;

#[derive(Parser, Debug)]
#[command(name = "contact-book", version, about = "Personal contact directory")]
pub struct Cli {
    /// Storage choice (memory, file)
    #[arg(long, env = "CONTACTS_STORAGE", default_value_t = String::from("file"))]
    pub storage: String,

    /// Directory holding the stored contacts
    #[arg(long, env = "CONTACTS_DATA_DIR", default_value = "./.instance")]
    pub data_dir: PathBuf,

    /// Storage capacity in bytes, 0 for no limit
    #[arg(long, env = "CONTACTS_QUOTA_BYTES", default_value_t = DEFAULT_QUOTA_BYTES)]
    pub quota_bytes: u64,

    /// Log debug output to stderr
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn storage_config(&self) -> Result<StorageConfig, AppError> {
        Ok(StorageConfig {
            medium: StorageMediums::from(&self.storage)?,
            data_dir: self.data_dir.clone(),
            quota_bytes: (self.quota_bytes > 0).then_some(self.quota_bytes),
        })
    }
}

/// A line typed inside `shell`.
#[derive(Parser, Debug)]
#[command(no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommand and their flags
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Add a new contact
    Add {
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// List contacts, optionally only those whose name contains QUERY
    List {
        /// Case-insensitive part of the name
        #[arg(short, long)]
        query: Option<String>,
    },
    /// Replace every field of an existing contact
    Edit {
        /// Id of the contact to edit
        #[arg(long)]
        id: String,

        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Delete a contact by id
    Delete {
        #[arg(long)]
        id: String,
    },
    /// Delete every contact
    DeleteAll {
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Block or unblock a contact
    Block {
        #[arg(long)]
        id: String,
    },
    /// Print the number of contacts
    Count,
    /// Run commands interactively, one per line
    Shell,
    /// Show the notifications still on screen (shell only)
    Notifications,
}

/// Contact fields. Missing flags are empty and rejected by validation.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldArgs {
    /// Contact name
    #[arg(long, default_value = "")]
    pub name: String,

    /// Contact phone number
    #[arg(long, default_value = "")]
    pub phone: String,

    /// Contact email address
    #[arg(long, default_value = "")]
    pub email: String,

    /// Contact address
    #[arg(long, default_value = "")]
    pub address: String,

    /// Absolute URL of the contact picture
    #[arg(long, default_value = "")]
    pub image_url: String,
}

impl From<FieldArgs> for ContactFields {
    fn from(args: FieldArgs) -> Self {
        ContactFields::new(
            args.name,
            args.phone,
            args.email,
            args.address,
            args.image_url,
        )
    }
}
