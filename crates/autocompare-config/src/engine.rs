//! Contract between the configuration layer and the compilation engine.

use std::error::Error;
use std::sync::Arc;

use crate::type_config::TypeConfiguration;

/// Engine that turns a frozen [`TypeConfiguration`] into an executable comparer.
///
/// The engine owns its compiled artifacts and their compiled/not-compiled
/// state. It is shared between the registry and background compile jobs, so
/// it must be `Send + Sync`.
pub trait ComparerEngine: Send + Sync + 'static {
    /// The compiled comparer handed back by synchronous compilation.
    type Compiled: Send + 'static;

    /// Failure reported by the engine.
    type Error: Error + Send + Sync + 'static;

    /// Compiles a comparer for the configured type.
    ///
    /// May run on a compile worker thread. The configuration never changes
    /// after it is handed over.
    fn compile(&self, config: Arc<TypeConfiguration>) -> Result<Self::Compiled, Self::Error>;
}
