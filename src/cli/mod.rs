mod commands;
mod handlers;
mod session;

pub use commands::{Cli, Commands};
pub use handlers::{
    handle_add, handle_clear, handle_delete, handle_edit, handle_init, handle_list,
    handle_session, handle_show,
};
pub use session::{run_session, SessionCommand};
