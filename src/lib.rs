//! chatstack
//!
//! Chat client UI whose two message sections scroll as receding
//! depth stacks.
//!
//! The library follows a Pure Core / Impure Shell split: `model`,
//! `view_state` and `state` are plain data and functions, `source`,
//! `logging` and `view` touch files and the terminal.

pub mod config;
pub mod logging;
pub mod model;
pub mod source;
pub mod state;
pub mod view;
pub mod view_state;
