//! Process-scoped registry of type configurations.

use std::any::TypeId;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use autocompare_core::{Comparable, MemberType};
use tracing::debug;

use crate::builder::ConfigurationBuilder;
use crate::compile::{compile_now, CompileWorkers};
use crate::engine::ComparerEngine;
use crate::error::ConfigError;
use crate::rule::MemberRule;
use crate::settings::CompileSettings;
use crate::type_config::TypeConfiguration;

/// Registry state for one type.
struct TypeSlot {
    config: TypeConfiguration,
    frozen: Option<Arc<TypeConfiguration>>,
}

/// Owns one [`TypeConfiguration`] per type and the engine they compile against.
///
/// Create it once at startup, register every type, then compile. Registration
/// borrows the registry mutably, so it cannot overlap with other registration
/// or with freezing. Once a type has been compiled (or registered) its
/// configuration is frozen: further registration for that type fails with
/// [`ConfigError::AlreadyCompiled`], and compiling it again hands the same
/// snapshot to the engine.
pub struct ConfigurationRegistry<E: ComparerEngine> {
    engine: Arc<E>,
    settings: CompileSettings,
    workers: CompileWorkers,
    ignored_types: BTreeSet<MemberType>,
    slots: HashMap<TypeId, TypeSlot>,
}

impl<E: ComparerEngine> ConfigurationRegistry<E> {
    /// Creates a registry that compiles in the background on the rayon global pool.
    pub fn new(engine: Arc<E>) -> Self {
        ConfigurationRegistry {
            engine,
            settings: CompileSettings::default(),
            workers: CompileWorkers::global(),
            ignored_types: BTreeSet::new(),
            slots: HashMap::new(),
        }
    }

    /// Creates a registry from explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if the settings are unusable or the
    /// dedicated compile pool cannot be started.
    pub fn with_settings(engine: Arc<E>, settings: CompileSettings) -> Result<Self, ConfigError> {
        let workers = CompileWorkers::from_settings(&settings)?;
        Ok(ConfigurationRegistry {
            engine,
            settings,
            workers,
            ignored_types: BTreeSet::new(),
            slots: HashMap::new(),
        })
    }

    /// Returns the shared engine handle.
    pub fn engine(&self) -> &Arc<E> {
        &self.engine
    }

    pub fn settings(&self) -> &CompileSettings {
        &self.settings
    }

    /// Returns true if background compilation runs on a dedicated pool.
    pub fn has_dedicated_workers(&self) -> bool {
        self.workers.is_dedicated()
    }

    /// Starts (or resumes) registration for `T`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::AlreadyCompiled`] if `T` is frozen.
    pub fn configure<T: Comparable>(&mut self) -> Result<ConfigurationBuilder<'_, T, E>, ConfigError> {
        let slot = self.slot_mut::<T>();
        if slot.frozen.is_some() {
            return Err(ConfigError::AlreadyCompiled {
                type_name: slot.config.type_name(),
            });
        }
        Ok(ConfigurationBuilder::new(self))
    }

    /// Compiles `T` on the calling thread.
    ///
    /// Types never configured are compiled with the default configuration.
    pub fn compile<T: Comparable>(&mut self) -> Result<E::Compiled, ConfigError> {
        let config = self.freeze::<T>();
        compile_now(self.engine.as_ref(), config)
    }

    /// Schedules compilation of `T` and returns immediately.
    ///
    /// Failures are logged by the worker and never reported back; use
    /// [`compile`](Self::compile) when the outcome matters.
    pub fn compile_async<T: Comparable>(&mut self) {
        let config = self.freeze::<T>();
        self.workers.spawn_compile(Arc::clone(&self.engine), config);
    }

    /// Returns the frozen configuration of `T`, if it has been compiled or registered.
    pub fn configuration<T: Comparable>(&self) -> Option<Arc<TypeConfiguration>> {
        self.slots
            .get(&TypeId::of::<T>())
            .and_then(|slot| slot.frozen.clone())
    }

    /// Returns the rule registered for a member of `T`.
    ///
    /// Returns [`MemberRule::Default`] for unknown members and unconfigured types.
    pub fn member_rule<T: Comparable>(&self, member: &str) -> &MemberRule {
        match self.slots.get(&TypeId::of::<T>()) {
            Some(slot) => slot.config.get_member_rule(member),
            None => MemberRule::default_ref(),
        }
    }

    /// Member types ignored for every type configured through this registry.
    pub fn ignored_types(&self) -> &BTreeSet<MemberType> {
        &self.ignored_types
    }

    pub fn is_frozen<T: Comparable>(&self) -> bool {
        self.configuration::<T>().is_some()
    }

    /// Number of types with a configuration, frozen or not.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Drops every type configuration and ignored type.
    ///
    /// Snapshots already handed to the engine are unaffected.
    pub fn reset(&mut self) {
        debug!(types = self.slots.len(), "Resetting configuration registry");
        self.slots.clear();
        self.ignored_types.clear();
    }

    pub(crate) fn slot_config_mut<T: Comparable>(&mut self) -> &mut TypeConfiguration {
        &mut self.slot_mut::<T>().config
    }

    pub(crate) fn slot_config<T: Comparable>(&self) -> Option<&TypeConfiguration> {
        self.slots.get(&TypeId::of::<T>()).map(|slot| &slot.config)
    }

    /// Adds a globally ignored type; returns true if it was not present.
    pub(crate) fn insert_ignored_type(&mut self, member_type: MemberType) -> bool {
        self.ignored_types.insert(member_type)
    }

    pub(crate) fn frozen_count(&self) -> usize {
        self.slots.values().filter(|slot| slot.frozen.is_some()).count()
    }

    /// Freezes `T`, snapshotting the current ignored types.
    pub(crate) fn freeze<T: Comparable>(&mut self) -> Arc<TypeConfiguration> {
        let ignored_types = self.ignored_types.clone();
        let slot = self.slot_mut::<T>();
        if let Some(frozen) = &slot.frozen {
            return Arc::clone(frozen);
        }

        let frozen = Arc::new(slot.config.clone().with_ignored_types(ignored_types));
        slot.frozen = Some(Arc::clone(&frozen));
        debug!(
            type_name = frozen.type_name(),
            rules = frozen.rule_count(),
            "Froze type configuration"
        );
        frozen
    }

    fn slot_mut<T: Comparable>(&mut self) -> &mut TypeSlot {
        let compare_fields = self.settings.compare_fields_by_default;
        self.slots.entry(TypeId::of::<T>()).or_insert_with(|| TypeSlot {
            config: TypeConfiguration::new(T::type_descriptor(), compare_fields),
            frozen: None,
        })
    }
}
