use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    ContactStore, FormFields, InteractionController, KeyDisposition, Renderer, UiAction,
};
use shared::domain::{ContactId, Tag, TAG_VOCABULARY};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;
mod terminal;

use config::load_settings;
use terminal::TerminalRenderer;

type Controller<W> = InteractionController<TerminalRenderer<W>>;

#[derive(Parser, Debug)]
#[command(
    name = "contacts",
    about = "Browse, search and edit contacts on a remote contacts service"
)]
struct Args {
    /// Base URL of the contacts service; overrides contacts.toml and the environment.
    #[arg(long, global = true)]
    server_url: Option<String>,
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show every contact.
    List,
    /// Incremental name search, typed one key at a time.
    Search { text: String },
    /// Open the edit form for one contact.
    Show { id: ContactId },
    /// Create a contact.
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: String,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Change fields or tags of an existing contact.
    Edit {
        id: ContactId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long = "remove-tag")]
        remove_tags: Vec<String>,
    },
    /// Delete a contact.
    Delete { id: ContactId },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(server_url) = args.server_url {
        settings.server_url = server_url;
    }
    if let Some(timeout_secs) = args.timeout_secs {
        settings.request_timeout_secs = timeout_secs;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let store = ContactStore::new(&settings.server_url, settings.request_timeout())
        .with_context(|| {
            format!(
                "failed to set up contacts client for '{}'",
                settings.server_url
            )
        })?;
    info!(server_url = %store.base_url(), "contacts client ready");

    let mut controller = InteractionController::new(Arc::new(store), TerminalRenderer::stdout());
    if args.command.warms_cache() {
        // A failed warm-up is retried by the first keystroke, so its errors don't count.
        controller.start().await;
        controller.renderer_mut().reset_error_count();
    }
    run(&mut controller, args.command).await?;

    let renderer = controller.renderer();
    command_outcome(renderer.error_count(), renderer.write_failures())
}

impl Command {
    /// Only the incremental search reads the cache; every other command fetches what it shows.
    fn warms_cache(&self) -> bool {
        matches!(self, Command::Search { .. })
    }
}

fn command_outcome(errors: usize, write_failures: usize) -> Result<()> {
    if errors > 0 {
        bail!("command failed with {errors} error(s)");
    }
    if write_failures > 0 {
        bail!("{write_failures} line(s) of output could not be written");
    }
    Ok(())
}

async fn run<W: std::io::Write>(controller: &mut Controller<W>, command: Command) -> Result<()> {
    match command {
        Command::List => controller.handle_action(UiAction::ShowAll).await,
        Command::Search { text } => type_search(controller, &text).await,
        Command::Show { id } => controller.handle_action(UiAction::EditContact(id)).await,
        Command::Add {
            name,
            email,
            phone,
            tags,
        } => {
            let tags = parse_tags(&tags)?;
            controller.handle_action(UiAction::OpenCreateForm).await;
            controller
                .renderer_mut()
                .set_form_fields(FormFields { name, email, phone });
            select_tags(controller, tags).await;
            controller.handle_action(UiAction::SubmitForm).await;
        }
        Command::Edit {
            id,
            name,
            email,
            phone,
            tags,
            remove_tags,
        } => {
            let tags = parse_tags(&tags)?;
            let remove_tags = parse_tags(&remove_tags)?;
            controller.handle_action(UiAction::EditContact(id)).await;
            if controller.form_binding().is_none() {
                return Ok(());
            }

            let mut fields = controller.renderer().read_form_fields();
            fields.name = name.unwrap_or(fields.name);
            fields.email = email.unwrap_or(fields.email);
            fields.phone = phone.unwrap_or(fields.phone);
            controller.renderer_mut().set_form_fields(fields);

            for tag in remove_tags {
                controller.handle_action(UiAction::RemoveTag(tag)).await;
            }
            select_tags(controller, tags).await;
            controller.handle_action(UiAction::SubmitForm).await;
        }
        Command::Delete { id } => controller.handle_action(UiAction::DeleteContact(id)).await,
    }
    Ok(())
}

/// Feeds `text` through the search field key by key; rejected keys never reach the field.
async fn type_search<W: std::io::Write>(controller: &mut Controller<W>, text: &str) {
    controller.handle_action(UiAction::ClearSearch).await;
    for c in text.chars() {
        controller.renderer_mut().push_search_char(c);
        if controller.handle_keystroke(&c.to_string()).await == KeyDisposition::Rejected {
            controller.renderer_mut().pop_search_char();
            warn!(key = %c, "search ignores keys other than letters");
        }
    }
}

async fn select_tags<W: std::io::Write>(controller: &mut Controller<W>, tags: Vec<Tag>) {
    for tag in tags {
        controller.renderer_mut().choose_tag(tag);
        controller.handle_action(UiAction::SelectTag).await;
    }
}

fn parse_tags(raw: &[String]) -> Result<Vec<Tag>> {
    raw.iter()
        .map(|label| {
            Tag::parse(label)
                .filter(|tag| TAG_VOCABULARY.contains(&tag.as_str()))
                .ok_or_else(|| {
                    anyhow!(
                        "unknown tag '{label}'; choose from {}",
                        TAG_VOCABULARY.join(", ")
                    )
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tags_must_come_from_vocabulary() {
        let tags = parse_tags(&["Work".to_string(), "family".to_string()]).expect("tags");
        assert_eq!(
            tags.iter().map(Tag::as_str).collect::<Vec<_>>(),
            vec!["work", "family"]
        );

        let err = parse_tags(&["gym".to_string()]).expect_err("not offered");
        assert!(err.to_string().contains("work, friend, family"), "{err}");
        assert!(parse_tags(&["w0rk".to_string()]).is_err());
    }

    #[test]
    fn only_search_warms_the_cache() {
        fn parse(argv: &[&str]) -> Command {
            Args::try_parse_from(argv.iter().copied())
                .expect("parse")
                .command
        }
        assert!(parse(&["contacts", "search", "al"]).warms_cache());
        assert!(!parse(&["contacts", "list"]).warms_cache());
        assert!(!parse(&["contacts", "delete", "3"]).warms_cache());
    }

    #[test]
    fn outcome_reports_command_errors_then_output_failures() {
        assert!(command_outcome(0, 0).is_ok());
        let err = command_outcome(2, 1).expect_err("errors");
        assert_eq!(err.to_string(), "command failed with 2 error(s)");
        let err = command_outcome(0, 1).expect_err("broken output");
        assert!(err.to_string().contains("could not be written"), "{err}");
    }

    #[test]
    fn cli_parses_edit_arguments() {
        let args = Args::try_parse_from([
            "contacts",
            "--server-url",
            "http://localhost:4567",
            "edit",
            "12",
            "--email",
            "new@example.com",
            "--tag",
            "friend",
            "--remove-tag",
            "work",
        ])
        .expect("parse");
        assert_eq!(args.server_url.as_deref(), Some("http://localhost:4567"));
        match args.command {
            Command::Edit {
                id,
                email,
                name,
                tags,
                remove_tags,
                ..
            } => {
                assert_eq!(id, ContactId(12));
                assert_eq!(email.as_deref(), Some("new@example.com"));
                assert_eq!(name, None);
                assert_eq!(tags, vec!["friend"]);
                assert_eq!(remove_tags, vec!["work"]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }
}
