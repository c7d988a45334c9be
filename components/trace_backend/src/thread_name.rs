//! Thread display names
//!
//! Display names set through MarkScope are applied to the OS thread where
//! the platform supports it, so debuggers and `top -H` show them. The OS
//! name is length-limited; the full name is kept in a thread-local registry
//! for `current_thread_name()`.

use std::cell::RefCell;
use std::thread;

thread_local! {
    static DISPLAY_NAME: RefCell<Option<String>> = const { RefCell::new(None) };
}

/// Longest OS thread name in bytes, excluding the NUL terminator
#[cfg(target_os = "linux")]
const OS_NAME_MAX: usize = 15;
#[cfg(target_os = "macos")]
const OS_NAME_MAX: usize = 63;

/// Set the display name of the calling thread
///
/// Names longer than the OS limit are truncated for the OS only.
pub fn set_current_thread_name(name: &str) {
    DISPLAY_NAME.with(|slot| *slot.borrow_mut() = Some(name.to_string()));
    set_os_thread_name(name);
}

/// Display name of the calling thread
///
/// Falls back to the name the thread was spawned with.
pub fn current_thread_name() -> Option<String> {
    DISPLAY_NAME
        .with(|slot| slot.borrow().clone())
        .or_else(|| thread::current().name().map(str::to_string))
}

#[cfg(target_os = "linux")]
fn set_os_thread_name(name: &str) {
    let Some(name) = os_thread_name(name, OS_NAME_MAX) else {
        return;
    };
    // SAFETY: `name` is NUL-terminated and within the 16-byte limit, and
    // `pthread_self()` is always a valid handle for the calling thread.
    unsafe {
        libc::pthread_setname_np(libc::pthread_self(), name.as_ptr());
    }
}

#[cfg(target_os = "macos")]
fn set_os_thread_name(name: &str) {
    let Some(name) = os_thread_name(name, OS_NAME_MAX) else {
        return;
    };
    // SAFETY: `name` is NUL-terminated and within MAXTHREADNAMESIZE. macOS
    // only renames the calling thread.
    unsafe {
        libc::pthread_setname_np(name.as_ptr());
    }
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
fn set_os_thread_name(_name: &str) {}

/// OS form of a display name: cut at the first NUL, then truncated to
/// `max` bytes on a char boundary
#[cfg_attr(not(any(target_os = "linux", target_os = "macos")), allow(dead_code))]
fn os_thread_name(name: &str, max: usize) -> Option<std::ffi::CString> {
    let name = name.split('\0').next().unwrap_or_default();
    let mut end = name.len().min(max);
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    if end == 0 {
        return None;
    }
    std::ffi::CString::new(&name[..end]).ok()
}
