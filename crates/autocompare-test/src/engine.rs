//! Stub compilation engines.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};

use autocompare::{ComparerEngine, TypeConfiguration};
use thiserror::Error;

/// Deterministic failure reported by [`FailingEngine`].
#[derive(Debug, Error)]
#[error("engine refused {0}")]
pub struct EngineFailure(pub &'static str);

/// Records each compiled configuration and hands the snapshot back.
#[derive(Default)]
pub struct RecordingEngine {
    compiled: Mutex<Vec<Arc<TypeConfiguration>>>,
    notify: Mutex<Option<Sender<&'static str>>>,
}

impl RecordingEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine that also sends each compiled type name on a channel.
    pub fn with_channel() -> (Self, Receiver<&'static str>) {
        let (tx, rx) = mpsc::channel();
        let engine = RecordingEngine {
            compiled: Mutex::new(Vec::new()),
            notify: Mutex::new(Some(tx)),
        };
        (engine, rx)
    }

    /// Names of compiled types, in compile order.
    pub fn compiled_types(&self) -> Vec<&'static str> {
        self.compiled
            .lock()
            .unwrap()
            .iter()
            .map(|config| config.type_name())
            .collect()
    }

    /// The most recent snapshot compiled for `type_name`.
    pub fn last_compiled(&self, type_name: &str) -> Option<Arc<TypeConfiguration>> {
        self.compiled
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|config| config.type_name() == type_name)
            .cloned()
    }
}

impl ComparerEngine for RecordingEngine {
    type Compiled = Arc<TypeConfiguration>;
    type Error = EngineFailure;

    fn compile(&self, config: Arc<TypeConfiguration>) -> Result<Self::Compiled, Self::Error> {
        self.compiled.lock().unwrap().push(Arc::clone(&config));
        if let Some(tx) = self.notify.lock().unwrap().as_ref() {
            let _ = tx.send(config.type_name());
        }
        Ok(config)
    }
}

/// Fails every compilation, reporting each attempt on a channel.
pub struct FailingEngine {
    attempts: AtomicUsize,
    notify: Mutex<Sender<&'static str>>,
}

impl FailingEngine {
    pub fn new() -> (Self, Receiver<&'static str>) {
        let (tx, rx) = mpsc::channel();
        let engine = FailingEngine {
            attempts: AtomicUsize::new(0),
            notify: Mutex::new(tx),
        };
        (engine, rx)
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

impl ComparerEngine for FailingEngine {
    type Compiled = ();
    type Error = EngineFailure;

    fn compile(&self, config: Arc<TypeConfiguration>) -> Result<(), EngineFailure> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let _ = self.notify.lock().unwrap().send(config.type_name());
        Err(EngineFailure(config.type_name()))
    }
}

/// Panics while compiling one type and compiles every other type.
///
/// Each attempt is reported on a channel before the engine panics.
pub struct PanickingEngine {
    panic_on: &'static str,
    notify: Mutex<Sender<&'static str>>,
}

impl PanickingEngine {
    pub fn new(panic_on: &'static str) -> (Self, Receiver<&'static str>) {
        let (tx, rx) = mpsc::channel();
        let engine = PanickingEngine {
            panic_on,
            notify: Mutex::new(tx),
        };
        (engine, rx)
    }
}

impl ComparerEngine for PanickingEngine {
    type Compiled = &'static str;
    type Error = EngineFailure;

    fn compile(&self, config: Arc<TypeConfiguration>) -> Result<&'static str, EngineFailure> {
        let type_name = config.type_name();
        let _ = self.notify.lock().unwrap().send(type_name);
        if type_name == self.panic_on {
            panic!("engine bug in {type_name}");
        }
        Ok(type_name)
    }
}
