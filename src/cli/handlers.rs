use std::env;
use std::io;
use std::path::PathBuf;

use crate::config::BoardConfig;
use crate::entity::{Item, ItemStatus, ItemType, ItemUpdate};
use crate::error::{Result, SparkError};
use crate::lifecycle::Board;
use crate::storage::JsonStore;
use crate::warnings::{check_decay, format_warning};

/// Longest title accepted from the command line, in characters.
pub const TITLE_MAX_LEN: usize = 80;
const TITLE_DISPLAY_LEN: usize = 50;

/// Settings resolved from the global flags.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: BoardConfig,
}

impl Context {
    pub fn from_args(config: Option<PathBuf>, data: Option<PathBuf>) -> Result<Self> {
        let cwd = env::current_dir()?;
        let mut config = BoardConfig::discover(config.as_deref(), &cwd)?;
        if let Some(data) = data {
            config.data_file = data;
        }
        config.validate()?;
        Ok(Self { config })
    }

    /// Load the board; the decay sweep runs as part of loading.
    fn open_board(&self) -> Result<Board<JsonStore>> {
        let store = JsonStore::new(&self.config.data_file);
        let board = Board::open(store, self.config.decay_days)?;
        for id in board.decayed_on_load() {
            if let Some(item) = board.get(id) {
                eprintln!(
                    "Decayed '{}' to Discarded after {} days without access",
                    item.title,
                    board.decay_days()
                );
            }
        }
        Ok(board)
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

fn display_title(title: &str) -> String {
    if title.chars().count() > TITLE_DISPLAY_LEN {
        format!("{}…", truncate_chars(title, TITLE_DISPLAY_LEN))
    } else {
        title.to_string()
    }
}

fn parse_type(raw: &str) -> ItemType {
    match raw.parse::<ItemType>() {
        Ok(t) => t,
        Err(_) => {
            eprintln!("Warning: unknown type '{}', using 'other'", raw);
            ItemType::Other
        }
    }
}

/// Resolve an id or unique prefix to the full id.
fn resolve_id(board: &Board<JsonStore>, id: &str) -> Result<String> {
    Ok(board.collection().resolve(id)?.id.clone())
}

fn print_item(item: &Item, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
        return Ok(());
    }

    println!("{} ({})", item.title, item.id);
    println!("Type: {} {}", item.item_type.emoji(), item.item_type);
    println!("Status: {} {}", item.status.emoji(), item.status);
    println!("Added: {}", item.date_added.date());
    let dated = [
        ("In progress since", &item.moved_to_in_progress_at),
        ("Last accessed", &item.last_accessed_at),
        ("Discarded", &item.discarded_at),
        ("Completed", &item.completed_at),
    ];
    for (label, stamp) in dated {
        if let Some(stamp) = stamp {
            println!("{}: {}", label, stamp.date());
        }
    }
    if let Some(ref takeaways) = item.takeaways {
        println!("\nTakeaways:\n{}", takeaways);
    }
    if let Some(ref notes) = item.learning_notes {
        println!("\nLearning notes:\n{}", notes);
    }
    Ok(())
}

fn print_card(item: &Item) {
    println!(
        "  {:<8}  {} {:<8}  {:<10}  {}",
        item.short_id(),
        item.item_type.emoji(),
        item.item_type.to_string(),
        item.column_date().map(|t| t.date()).unwrap_or("—"),
        display_title(&item.title)
    );
}

pub fn handle_add(ctx: &Context, title: String, item_type: String, json: bool) -> Result<()> {
    let mut board = ctx.open_board()?;

    let item_type = parse_type(&item_type);
    let title = truncate_chars(&title, TITLE_MAX_LEN);
    let item = board.create(&title, &item_type.to_string())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&item)?);
    } else {
        println!(
            "Created spark ({}) - {} {}",
            item.short_id(),
            item.item_type.emoji(),
            item.title
        );
    }

    Ok(())
}

pub fn handle_list(ctx: &Context, status: Option<String>, json: bool) -> Result<()> {
    let board = ctx.open_board()?;
    let collection = board.collection();

    let columns: Vec<ItemStatus> = match status {
        Some(s) => vec![s.parse().map_err(SparkError::InvalidInput)?],
        None => ItemStatus::ALL.to_vec(),
    };

    if json {
        if columns.len() == 1 {
            let items: Vec<&Item> = collection.in_column(columns[0]).collect();
            println!("{}", serde_json::to_string_pretty(&items)?);
        } else {
            println!("{}", serde_json::to_string_pretty(collection)?);
        }
        return Ok(());
    }

    if collection.is_empty() {
        println!("The board is empty. Add a spark with 'sparkfire add <title>'.");
        return Ok(());
    }

    for (i, status) in columns.iter().enumerate() {
        if i > 0 {
            println!();
        }
        let items: Vec<&Item> = collection.in_column(*status).collect();
        println!(
            "{} {} ({}) - {}",
            status.emoji(),
            status.column_title(),
            items.len(),
            status.date_label()
        );
        if items.is_empty() {
            println!("  —");
        }
        for item in items {
            print_card(item);
        }
    }

    let fires = collection.fire_count();
    println!();
    if fires == 0 {
        println!("Collected fires: —");
    } else {
        println!("Collected fires: {} ({})", "🔥".repeat(fires), fires);
    }

    let warnings = check_decay(
        collection,
        board.now(),
        ctx.config.decay_days,
        ctx.config.warn_days,
    );
    for warning in &warnings {
        eprintln!("{}", format_warning(warning));
    }

    Ok(())
}

pub fn handle_get(ctx: &Context, id: String, json: bool) -> Result<()> {
    let mut board = ctx.open_board()?;
    let id = resolve_id(&board, &id)?;

    board.access(&id)?;

    let item = board
        .get(&id)
        .ok_or_else(|| SparkError::ItemNotFound(id.clone()))?;
    print_item(item, json)
}

fn handle_move(ctx: &Context, id: String, to: ItemStatus, json: bool) -> Result<()> {
    let mut board = ctx.open_board()?;
    let id = resolve_id(&board, &id)?;

    let moved = match to {
        ItemStatus::InProgress => board.move_to_in_progress(&id)?,
        ItemStatus::Discarded => board.move_to_discarded(&id)?,
        ItemStatus::Completed => board.move_to_completed(&id)?,
        ItemStatus::Envisioned => {
            return Err(SparkError::InvalidInput(
                "items cannot be moved back to Spark".to_string(),
            ))
        }
    };
    let item = board
        .get(&id)
        .ok_or_else(|| SparkError::ItemNotFound(id.clone()))?;
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else if !moved {
        println!(
            "({}) - {} is already in {} {}",
            item.short_id(),
            item.title,
            to.emoji(),
            to.column_title()
        );
    } else {
        println!(
            "Moved ({}) - {} to {} {}",
            item.short_id(),
            item.title,
            to.emoji(),
            to.column_title()
        );
    }

    Ok(())
}

pub fn handle_start(ctx: &Context, id: String, json: bool) -> Result<()> {
    handle_move(ctx, id, ItemStatus::InProgress, json)
}

pub fn handle_discard(ctx: &Context, id: String, json: bool) -> Result<()> {
    handle_move(ctx, id, ItemStatus::Discarded, json)
}

pub fn handle_complete(ctx: &Context, id: String, json: bool) -> Result<()> {
    handle_move(ctx, id, ItemStatus::Completed, json)
}

#[allow(clippy::too_many_arguments)]
pub fn handle_update(
    ctx: &Context,
    id: String,
    title: Option<String>,
    item_type: Option<String>,
    takeaways: Option<String>,
    notes: Option<String>,
    clear_takeaways: bool,
    clear_notes: bool,
    json: bool,
) -> Result<()> {
    let update = ItemUpdate {
        title: title.map(|t| truncate_chars(&t, TITLE_MAX_LEN)),
        item_type: item_type.as_deref().map(parse_type),
        takeaways: if clear_takeaways {
            Some(None)
        } else {
            takeaways.map(Some)
        },
        learning_notes: if clear_notes {
            Some(None)
        } else {
            notes.map(Some)
        },
    };
    if update.is_empty() {
        return Err(SparkError::InvalidInput(
            "nothing to update; pass --title, --type, --takeaways or --notes".to_string(),
        ));
    }

    let mut board = ctx.open_board()?;
    let id = resolve_id(&board, &id)?;
    if !board.update(&id, update)? {
        return Err(SparkError::ItemNotFound(id));
    }

    let updated = board
        .get(&id)
        .ok_or_else(|| SparkError::ItemNotFound(id.clone()))?;
    if json {
        println!("{}", serde_json::to_string_pretty(updated)?);
    } else {
        println!("Updated ({}) - {}", updated.short_id(), updated.title);
    }

    Ok(())
}

pub fn handle_delete(ctx: &Context, id: String, force: bool) -> Result<()> {
    let mut board = ctx.open_board()?;
    let item = board.collection().resolve(&id)?.clone();

    // Confirm deletion unless --force is used
    if !force {
        eprintln!("Delete ({}) - {}? [y/N] ", item.short_id(), item.title);

        if atty::is(atty::Stream::Stdin) {
            let mut input = String::new();
            io::stdin().read_line(&mut input)?;
            if !input.trim().eq_ignore_ascii_case("y") {
                println!("Cancelled.");
                return Ok(());
            }
        } else {
            return Err(SparkError::InvalidInput(
                "Use --force to delete in non-interactive mode".to_string(),
            ));
        }
    }

    if !board.delete(&item.id)? {
        return Err(SparkError::ItemNotFound(item.id));
    }
    println!("Deleted ({}) - {}", item.short_id(), item.title);

    Ok(())
}
