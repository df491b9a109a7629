// Author: Dustin Pilgrim
// License: MIT

pub mod terminal;

use std::io;

use crate::core::view::View;

pub use terminal::{FrameOptions, TerminalPresenter};

/// Consumer of computed frames. Knows nothing about how they were computed.
pub trait Presenter {
    fn present(&mut self, view: &View) -> io::Result<()>;

    /// Restore whatever the presenter changed on the output.
    fn teardown(&mut self) -> io::Result<()> {
        Ok(())
    }
}
