// Author: Dustin Pilgrim
// License: MIT

pub mod clock;
pub mod controller;
pub mod counter_msg;
pub mod duration;
pub mod error;
pub mod state;
pub mod tier;
pub mod view;
