use std::io;

use crate::*;

/// What a front end provides to drive a [`Session`]: a way to show it and a source of input.
///
/// Renderers only read the session, all mutation goes through [`Session::handle`].
pub trait Frontend {
    fn render(&mut self, session: &Session) -> io::Result<()>;

    /// Next input, [`Event::None`] when nothing happened this tick
    fn poll_input(&mut self) -> io::Result<Event>;
}

/// Render, poll, handle, until the front end asks to quit.
///
/// Finished games keep the loop running so the player can still reset.
pub fn run(session: &mut Session, frontend: &mut impl Frontend) -> io::Result<()> {
    loop {
        frontend.render(session)?;
        let event = frontend.poll_input()?;
        if session.handle(event) == Control::Quit {
            log::debug!("Quit after {}s", session.elapsed_secs());
            return Ok(());
        }
    }
}
