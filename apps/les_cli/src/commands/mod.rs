// apps/les_cli/src/commands/mod.rs

//! 子命令实现

pub mod run;
pub mod validate;
