//! Application module: the root state the runtime drives and the view reads.
//!
//! The `App` model lives in `app::model`; the commands it accepts and the
//! input modes it exposes live in `app::command`.

mod command;
mod model;

pub use command::{Command, InputMode};
pub use model::*;
