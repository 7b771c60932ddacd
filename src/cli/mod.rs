mod commands;
mod handlers;

pub use commands::{Cli, Commands};
pub use handlers::{
    handle_add, handle_complete, handle_delete, handle_discard, handle_get, handle_list,
    handle_start, handle_update, Context, TITLE_MAX_LEN,
};
