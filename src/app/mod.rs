// Author: Dustin Pilgrim
// License: MIT

pub mod command;
pub mod counter_mode;
pub mod platform;
