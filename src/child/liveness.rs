use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use signal_hook::SigId;

/// SIGCHLD watcher.
///
/// The signal handler only stores `true` into an atomic flag. The
/// registration also clears `SA_RESTART` for SIGCHLD so that a blocking
/// `read` on the input is interrupted (`ErrorKind::Interrupted`) when the
/// child changes state, instead of sleeping until the next keystroke.
pub struct Liveness {
    pending: Arc<AtomicBool>,
    id: SigId,
}

impl Liveness {
    /// Must be called before the child is spawned, otherwise an early exit
    /// can be missed.
    pub fn register() -> io::Result<Self> {
        let pending = Arc::new(AtomicBool::new(false));
        let id = signal_hook::flag::register(libc::SIGCHLD, Arc::clone(&pending))?;
        if let Err(err) = allow_interrupt(libc::SIGCHLD) {
            signal_hook::low_level::unregister(id);
            return Err(err);
        }
        Ok(Self { pending, id })
    }

    /// Consume a pending notification. Returns true if SIGCHLD arrived
    /// since the last call.
    pub fn take(&self) -> bool {
        self.pending.swap(false, Ordering::SeqCst)
    }
}

impl Drop for Liveness {
    fn drop(&mut self) {
        signal_hook::low_level::unregister(self.id);
    }
}

fn allow_interrupt(signal: libc::c_int) -> io::Result<()> {
    // SAFETY: sigaction is called with a zeroed, fully owned struct; the
    // handler itself is left exactly as signal-hook installed it.
    unsafe {
        let mut action: libc::sigaction = std::mem::zeroed();
        if libc::sigaction(signal, std::ptr::null(), &mut action) != 0 {
            return Err(io::Error::last_os_error());
        }
        action.sa_flags &= !libc::SA_RESTART;
        if libc::sigaction(signal, &action, std::ptr::null_mut()) != 0 {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}
