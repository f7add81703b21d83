use std::sync::{Mutex, MutexGuard};

static BUFFER: Mutex<Option<Vec<String>>> = Mutex::new(None);

fn buffer() -> MutexGuard<'static, Option<Vec<String>>> {
    BUFFER.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Start holding diagnostics back. Used while the live view owns the terminal.
pub fn activate() {
    *buffer() = Some(Vec::new());
}

/// Stop buffering and return everything collected since `activate`.
pub fn drain() -> Vec<String> {
    buffer().take().unwrap_or_default()
}

/// Emit a diagnostic line: buffered while active, straight to stderr otherwise.
pub fn emit(msg: String) {
    let mut guard = buffer();
    if let Some(buf) = guard.as_mut() {
        buf.push(msg);
    } else {
        drop(guard);
        eprintln!("{}", msg);
    }
}

/// `eprintln!` that holds its output back while the live view is drawing.
#[macro_export]
macro_rules! buffered_eprintln {
    ($($arg:tt)*) => {
        $crate::stderr_buffer::emit(format!($($arg)*))
    };
}
