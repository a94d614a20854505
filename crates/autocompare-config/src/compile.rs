//! Compile trigger: synchronous and fire-and-forget compilation.
//!
//! Logging levels:
//! - **INFO**: synchronous compilation finished
//! - **DEBUG**: background compilation finished
//! - **WARN**: background compilation failed or panicked

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, warn};

use crate::engine::ComparerEngine;
use crate::error::{CompileError, ConfigError};
use crate::settings::CompileSettings;
use crate::type_config::TypeConfiguration;

/// Compiles `config` on the calling thread and propagates engine failures.
pub(crate) fn compile_now<E: ComparerEngine>(
    engine: &E,
    config: Arc<TypeConfiguration>,
) -> Result<E::Compiled, ConfigError> {
    let type_name = config.type_name();
    let rule_count = config.rule_count();
    let compiled = engine
        .compile(config)
        .map_err(|e| CompileError::new(type_name, e))?;
    info!(type_name, rule_count, "Compiled comparer");
    Ok(compiled)
}

/// Worker pool running background compilations.
///
/// Uses the rayon global pool unless the settings ask for a dedicated pool.
pub(crate) struct CompileWorkers {
    pool: Option<ThreadPool>,
}

impl CompileWorkers {
    pub(crate) fn global() -> Self {
        CompileWorkers { pool: None }
    }

    pub(crate) fn from_settings(settings: &CompileSettings) -> Result<Self, ConfigError> {
        settings.validate()?;
        let Some(threads) = settings.dedicated_threads() else {
            return Ok(Self::global());
        };

        let prefix = settings.thread_name_prefix.clone();
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(move |index| format!("{}-{}", prefix, index))
            .panic_handler(|payload| {
                warn!(panic = panic_message(&*payload), "Compile worker panicked");
            })
            .build()
            .map_err(|e| ConfigError::Invalid(format!("cannot start compile workers: {}", e)))?;

        Ok(CompileWorkers { pool: Some(pool) })
    }

    pub(crate) fn is_dedicated(&self) -> bool {
        self.pool.is_some()
    }

    /// Submits a compilation and returns immediately.
    ///
    /// No handle is returned. The outcome is only visible in the log. An
    /// engine panic is caught on the worker and logged like a failure.
    pub(crate) fn spawn_compile<E: ComparerEngine>(
        &self,
        engine: Arc<E>,
        config: Arc<TypeConfiguration>,
    ) {
        let job = move || {
            let type_name = config.type_name();
            match panic::catch_unwind(AssertUnwindSafe(|| engine.compile(config))) {
                Ok(Ok(_)) => debug!(type_name, "Background compilation finished"),
                Ok(Err(e)) => warn!(type_name, error = %e, "Background compilation failed"),
                Err(payload) => warn!(
                    type_name,
                    panic = panic_message(&*payload),
                    "Background compilation panicked"
                ),
            }
        };

        match &self.pool {
            Some(pool) => pool.spawn(job),
            None => rayon::spawn(job),
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "non-string panic payload"
    }
}

impl fmt::Debug for CompileWorkers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompileWorkers")
            .field("dedicated", &self.is_dedicated())
            .finish()
    }
}
