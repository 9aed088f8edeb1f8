//! Polling file watcher
//!
//! The watcher compiles the source once, then checks the file's modification
//! signature (mtime and length) every poll interval. A changed signature
//! triggers a recompile and raises the shared [`ChangeFlag`], which the live
//! server clears when a page asks whether it should reload.
//!
//! Compile errors while watching are logged and the loop keeps going, so a
//! file that is briefly missing during an editor's save does not end the
//! session.

use crate::compile::Compiler;
use crate::error::{Error, Result};
use log::{debug, error};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, SystemTime};

/// Set by the watcher after each recompile, cleared by the reader.
#[derive(Debug, Clone, Default)]
pub struct ChangeFlag(Arc<AtomicBool>);

impl ChangeFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Read and clear the flag
    pub fn take(&self) -> bool {
        self.0.swap(false, Ordering::SeqCst)
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

type Signature = (Option<SystemTime>, u64);

fn signature(path: &Path) -> Result<Signature> {
    let meta = fs::metadata(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok((meta.modified().ok(), meta.len()))
}

pub struct Watcher {
    compiler: Compiler,
    input: PathBuf,
    output: PathBuf,
    interval: Duration,
    flag: ChangeFlag,
    last: Option<Signature>,
}

impl Watcher {
    pub fn new(
        compiler: Compiler,
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        interval: Duration,
    ) -> Self {
        Self {
            compiler,
            input: input.into(),
            output: output.into(),
            interval,
            flag: ChangeFlag::new(),
            last: None,
        }
    }

    /// Share an existing flag, typically the live server's
    pub fn with_change_flag(mut self, flag: ChangeFlag) -> Self {
        self.flag = flag;
        self
    }

    pub fn change_flag(&self) -> ChangeFlag {
        self.flag.clone()
    }

    /// Check the source once, recompiling if its signature changed since the
    /// last successful compile. Returns whether a recompile happened.
    pub fn poll_once(&mut self) -> Result<bool> {
        let current = signature(&self.input)?;
        if self.last == Some(current) {
            return Ok(false);
        }

        self.compiler.compile_file(&self.input, &self.output)?;
        self.last = Some(current);
        self.flag.mark();
        Ok(true)
    }

    /// Run the poll loop on its own thread until the handle is stopped
    pub fn spawn(mut self) -> WatchHandle {
        let keep_running = Arc::new(AtomicBool::new(true));
        let keep_running_clone = keep_running.clone();

        let thread = thread::spawn(move || {
            while keep_running_clone.load(Ordering::SeqCst) {
                match self.poll_once() {
                    Ok(true) => debug!("recompiled {}", self.input.display()),
                    Ok(false) => {}
                    Err(err) => error!("{err}"),
                }
                thread::sleep(self.interval);
            }
        });

        WatchHandle {
            keep_running,
            thread: Some(thread),
        }
    }
}

/// Handle returned by [`Watcher::spawn`]
pub struct WatchHandle {
    keep_running: Arc<AtomicBool>,
    thread: Option<thread::JoinHandle<()>>,
}

impl WatchHandle {
    /// Signal the watcher to stop and wait for its thread to finish.
    pub fn stop(mut self) {
        self.keep_running.store(false, Ordering::SeqCst);
        self.join_thread();
    }

    /// Block until the watcher thread ends (it only ends when stopped).
    pub fn join(mut self) {
        self.join_thread();
    }

    fn join_thread(&mut self) {
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}
