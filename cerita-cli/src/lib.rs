use std::sync::atomic::AtomicBool;

pub mod helper;
pub mod utils;
pub mod view;

pub static DONE: AtomicBool = AtomicBool::new(false);

pub mod stdio;
