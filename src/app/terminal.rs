use std::{
    io::{Stdout, Write},
    sync::Once,
};

use crossterm::{
    cursor, queue,
    terminal::{self, ClearType},
};

static RESTORE_ON_PANIC: Once = Once::new();

/// Raw mode plus alternate screen, held until [`TerminalSession::close`] or drop.
///
/// Dropping an open session restores the terminal too, so an early `?` return in the caller
/// cannot leave the shell in raw mode.
pub struct TerminalSession {
    open: bool,
}

impl TerminalSession {
    pub fn open(stdout: &mut Stdout) -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        // A panic message printed on the alternate screen would vanish with it
        RESTORE_ON_PANIC.call_once(|| {
            let previous = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                let _ = leave(&mut std::io::stdout());
                previous(info);
            }));
        });
        queue!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;
        tracing::debug!("[terminal] raw mode on, alternate screen entered");
        Ok(Self { open: true })
    }

    /// Give the terminal back to the shell, reporting any failure.
    pub fn close(mut self, stdout: &mut Stdout) -> std::io::Result<()> {
        self.open = false;
        leave(stdout)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if self.open {
            let _ = leave(&mut std::io::stdout());
        }
    }
}

fn leave<W: Write>(out: &mut W) -> std::io::Result<()> {
    queue!(out, terminal::LeaveAlternateScreen, cursor::Show)?;
    out.flush()?;
    terminal::disable_raw_mode()
}
