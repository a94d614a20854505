//! Fluent registration of rules for one type.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use autocompare_core::{
    Comparable, DescriptorResolver, Member, MemberId, MemberResolver, MemberType, Sequence,
};
use tracing::{debug, warn};

use crate::engine::ComparerEngine;
use crate::error::ConfigError;
use crate::registry::ConfigurationRegistry;
use crate::rule::{CollectionConfiguration, MemberConfiguration, MemberRule};
use crate::type_config::TypeConfiguration;

/// Populates the [`TypeConfiguration`] of `T`.
///
/// Obtained from [`ConfigurationRegistry::configure`]. Rules registered
/// through a builder stay in the registry when it is dropped; finish with
/// [`compile_sync`](Self::compile_sync), [`compile_async`](Self::compile_async)
/// or [`register`](Self::register) to freeze them.
///
/// # Example
///
/// ```
/// use std::convert::Infallible;
/// use std::sync::Arc;
///
/// use autocompare_config::{ComparerEngine, ConfigurationRegistry, TypeConfiguration};
/// use autocompare_core::{member, Comparable, MemberDescriptor, MemberType, TypeDescriptor};
///
/// struct Person {
///     pub name: String,
///     pub tags: Vec<String>,
/// }
///
/// impl Comparable for Person {
///     fn type_descriptor() -> TypeDescriptor {
///         TypeDescriptor::new("Person", std::any::TypeId::of::<Person>())
///             .with_member(MemberDescriptor::new("name", MemberType::of::<String>()).public())
///             .with_member(MemberDescriptor::new("tags", MemberType::of::<Vec<String>>()).public())
///     }
/// }
///
/// struct CountingEngine;
///
/// impl ComparerEngine for CountingEngine {
///     type Compiled = usize;
///     type Error = Infallible;
///
///     fn compile(&self, config: Arc<TypeConfiguration>) -> Result<usize, Infallible> {
///         Ok(config.compared_members().count())
///     }
/// }
///
/// let mut registry = ConfigurationRegistry::new(Arc::new(CountingEngine));
/// let mut builder = registry.configure::<Person>().unwrap();
/// builder
///     .ignore_member(member!(Person, name))
///     .unwrap()
///     .configure_collection(member!(Person, tags), |tags| {
///         tags.ignore_order();
///     })
///     .unwrap();
///
/// assert_eq!(builder.compile_sync().unwrap(), 1);
/// ```
pub struct ConfigurationBuilder<'r, T: Comparable, E: ComparerEngine> {
    registry: &'r mut ConfigurationRegistry<E>,
    resolver: DescriptorResolver<T>,
}

impl<'r, T: Comparable, E: ComparerEngine> ConfigurationBuilder<'r, T, E> {
    pub(crate) fn new(registry: &'r mut ConfigurationRegistry<E>) -> Self {
        ConfigurationBuilder {
            registry,
            resolver: DescriptorResolver::new(),
        }
    }

    /// Compares public fields in addition to properties.
    pub fn compare_public_fields(&mut self) -> &mut Self {
        let config = self.config_mut();
        if !config.compare_fields() {
            config.set_compare_fields();
            debug!(type_name = config.type_name(), "Enabled public field comparison");
        }
        self
    }

    /// Ignores members of type `M` on every type configured through the registry.
    ///
    /// Types frozen before this call keep the ignored types of their snapshot
    /// and do not pick up `M`; register ignored types before compiling
    /// anything. A warning is logged when this happens.
    pub fn ignore_member_type<M: ?Sized + 'static>(&mut self) -> &mut Self {
        let member_type = MemberType::of::<M>();
        if self.registry.insert_ignored_type(member_type) {
            let frozen = self.registry.frozen_count();
            if frozen > 0 {
                warn!(
                    member_type = member_type.name(),
                    frozen,
                    "Ignored type added after configurations were frozen; they keep their snapshot"
                );
            } else {
                debug!(member_type = member_type.name(), "Ignoring member type");
            }
        }
        self
    }

    /// Registers a rule for a scalar member.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Resolution`] if the selector does not name a member of `T`.
    /// - [`ConfigError::DuplicateMember`] if the member already has a rule.
    ///   The callback is not run and the existing rule is kept.
    pub fn configure_member<M, F>(
        &mut self,
        member: Member<T, M>,
        configure: F,
    ) -> Result<&mut Self, ConfigError>
    where
        M: 'static,
        F: FnOnce(&mut MemberConfiguration<M>),
    {
        let id = self.unconfigured(self.resolver.resolve(&member)?)?;
        let mut config = MemberConfiguration::new();
        configure(&mut config);
        self.insert(id, config.into_rule())
    }

    /// Registers a rule for a sequence-valued member.
    ///
    /// Shares the member slot and duplicate check with
    /// [`configure_member`](Self::configure_member).
    pub fn configure_collection<C, F>(
        &mut self,
        member: Member<T, C>,
        configure: F,
    ) -> Result<&mut Self, ConfigError>
    where
        C: Sequence + 'static,
        C::Element: 'static,
        F: FnOnce(&mut CollectionConfiguration<C::Element>),
    {
        let id = self.unconfigured(self.resolver.resolve(&member)?)?;
        let mut config = CollectionConfiguration::new();
        configure(&mut config);
        self.insert(id, config.into_rule())
    }

    /// Excludes a member from comparison.
    pub fn ignore_member<M: 'static>(&mut self, member: Member<T, M>) -> Result<&mut Self, ConfigError> {
        self.configure_member(member, |rule| {
            rule.ignore();
        })
    }

    /// Excludes a member named by string, validated against the declared members of `T`.
    pub fn ignore_member_named(&mut self, name: &str) -> Result<&mut Self, ConfigError> {
        let id = self.unconfigured(self.resolver.resolve_name(name)?)?;
        let mut config = MemberConfiguration::<()>::new();
        config.ignore();
        self.insert(id, config.into_rule())
    }

    /// Returns the rule registered so far for a member.
    pub fn member_rule(&self, member: &str) -> &MemberRule {
        self.registry.member_rule::<T>(member)
    }

    pub fn compares_fields(&self) -> bool {
        self.registry
            .slot_config::<T>()
            .is_some_and(|config| config.compare_fields())
    }

    /// Member types ignored across the registry.
    pub fn ignored_types(&self) -> &BTreeSet<MemberType> {
        self.registry.ignored_types()
    }

    /// Freezes the configuration without compiling it.
    pub fn register(self) -> Arc<TypeConfiguration> {
        self.registry.freeze::<T>()
    }

    /// Freezes the configuration and compiles it on the calling thread.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Compile`] if the engine fails.
    pub fn compile_sync(self) -> Result<E::Compiled, ConfigError> {
        self.registry.compile::<T>()
    }

    /// Freezes the configuration and schedules compilation in the background.
    ///
    /// Returns immediately. The outcome is not reported to the caller;
    /// failures are logged by the compile worker.
    pub fn compile_async(self) {
        self.registry.compile_async::<T>();
    }

    fn config_mut(&mut self) -> &mut TypeConfiguration {
        self.registry.slot_config_mut::<T>()
    }

    /// Fails if the member already has a rule.
    fn unconfigured(&self, id: MemberId) -> Result<MemberId, ConfigError> {
        let configured = self
            .registry
            .slot_config::<T>()
            .is_some_and(|config| config.has_rule(id.as_str()));
        if configured {
            return Err(ConfigError::DuplicateMember {
                type_name: self.resolver.descriptor().type_name,
                member: id,
            });
        }
        Ok(id)
    }

    fn insert(&mut self, id: MemberId, rule: MemberRule) -> Result<&mut Self, ConfigError> {
        let config = self.config_mut();
        config.insert_rule(id, rule)?;
        debug!(type_name = config.type_name(), member = %id, "Registered member rule");
        Ok(self)
    }
}

impl<T: Comparable, E: ComparerEngine> fmt::Debug for ConfigurationBuilder<'_, T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.registry.slot_config::<T>();
        f.debug_struct("ConfigurationBuilder")
            .field("type_name", &self.resolver.descriptor().type_name)
            .field("rules", &config.map_or(0, TypeConfiguration::rule_count))
            .field("compare_fields", &self.compares_fields())
            .finish()
    }
}
