//! Command implementations for the redarc CLI.

pub mod list;
pub mod pack;
pub mod unpack;

pub use list::cmd_list;
pub use pack::cmd_pack;
pub use test::cmd_test;
pub use unpack::{UnpackOptions, cmd_unpack};
