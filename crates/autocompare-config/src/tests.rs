//! Tests for the configuration registry, builder and compile trigger.

use super::*;
use autocompare_core::{
    member, Comparable, MemberDescriptor, MemberKind, MemberType, ResolveError, TypeDescriptor,
};
use std::any::TypeId;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Timestamp(u64);

#[derive(Debug, Clone)]
struct Person {
    pub name: String,
    pub age: u32,
    pub updated: Timestamp,
    pub tags: Vec<String>,
    pub nickname: String,
    secret: String,
}

impl Comparable for Person {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::new("Person", TypeId::of::<Person>())
            .with_member(MemberDescriptor::new("name", MemberType::of::<String>()).public())
            .with_member(MemberDescriptor::new("age", MemberType::of::<u32>()).public())
            .with_member(MemberDescriptor::new("updated", MemberType::of::<Timestamp>()).public())
            .with_member(MemberDescriptor::new("tags", MemberType::of::<Vec<String>>()).public())
            .with_member(
                MemberDescriptor::new("nickname", MemberType::of::<String>())
                    .public()
                    .with_kind(MemberKind::Field),
            )
            .with_member(MemberDescriptor::new("secret", MemberType::of::<String>()))
    }
}

#[derive(Debug, Clone)]
struct Order {
    pub id: u64,
    pub placed: Timestamp,
}

impl Comparable for Order {
    fn type_descriptor() -> TypeDescriptor {
        TypeDescriptor::new("Order", TypeId::of::<Order>())
            .with_member(MemberDescriptor::new("id", MemberType::of::<u64>()).public())
            .with_member(MemberDescriptor::new("placed", MemberType::of::<Timestamp>()).public())
    }
}

#[derive(Debug, Error)]
#[error("engine refused {0}")]
struct EngineFailure(&'static str);

/// Records compiled type names; optionally reports each compile on a channel.
#[derive(Default)]
struct RecordingEngine {
    compiled: Mutex<Vec<&'static str>>,
    done: Mutex<Option<Sender<&'static str>>>,
}

impl RecordingEngine {
    fn with_channel() -> (Self, Receiver<&'static str>) {
        let (tx, rx) = mpsc::channel();
        let engine = RecordingEngine {
            compiled: Mutex::new(Vec::new()),
            done: Mutex::new(Some(tx)),
        };
        (engine, rx)
    }

    fn compiled(&self) -> Vec<&'static str> {
        self.compiled.lock().unwrap().clone()
    }
}

impl ComparerEngine for RecordingEngine {
    type Compiled = Arc<TypeConfiguration>;
    type Error = EngineFailure;

    fn compile(&self, config: Arc<TypeConfiguration>) -> Result<Self::Compiled, Self::Error> {
        self.compiled.lock().unwrap().push(config.type_name());
        if let Some(tx) = self.done.lock().unwrap().as_ref() {
            let _ = tx.send(config.type_name());
        }
        Ok(config)
    }
}

/// Fails every compilation.
struct FailingEngine {
    attempts: AtomicUsize,
    done: Mutex<Sender<&'static str>>,
}

impl FailingEngine {
    fn new() -> (Self, Receiver<&'static str>) {
        let (tx, rx) = mpsc::channel();
        let engine = FailingEngine {
            attempts: AtomicUsize::new(0),
            done: Mutex::new(tx),
        };
        (engine, rx)
    }
}

impl ComparerEngine for FailingEngine {
    type Compiled = ();
    type Error = EngineFailure;

    fn compile(&self, config: Arc<TypeConfiguration>) -> Result<(), EngineFailure> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let _ = self.done.lock().unwrap().send(config.type_name());
        Err(EngineFailure(config.type_name()))
    }
}

/// Panics while compiling `panic_on`; compiles every other type.
struct PanickingEngine {
    panic_on: &'static str,
    started: Mutex<Sender<&'static str>>,
}

impl PanickingEngine {
    fn new(panic_on: &'static str) -> (Self, Receiver<&'static str>) {
        let (tx, rx) = mpsc::channel();
        let engine = PanickingEngine {
            panic_on,
            started: Mutex::new(tx),
        };
        (engine, rx)
    }
}

impl ComparerEngine for PanickingEngine {
    type Compiled = &'static str;
    type Error = EngineFailure;

    fn compile(&self, config: Arc<TypeConfiguration>) -> Result<&'static str, EngineFailure> {
        let type_name = config.type_name();
        let _ = self.started.lock().unwrap().send(type_name);
        if type_name == self.panic_on {
            panic!("engine bug in {type_name}");
        }
        Ok(type_name)
    }
}

fn create_registry() -> ConfigurationRegistry<RecordingEngine> {
    init_logging();
    ConfigurationRegistry::new(Arc::new(RecordingEngine::default()))
}

#[test]
fn test_duplicate_ignore_is_rejected() {
    let mut registry = create_registry();
    let mut builder = registry.configure::<Person>().unwrap();

    builder.ignore_member(member!(Person, name)).unwrap();
    let err = builder.ignore_member(member!(Person, name)).unwrap_err();

    match err {
        ConfigError::DuplicateMember { type_name, member } => {
            assert_eq!(type_name, "Person");
            assert_eq!(member.as_str(), "name");
        }
        other => panic!("expected DuplicateMember, got {other:?}"),
    }
    assert!(builder.member_rule("name").is_ignored());
}

#[test]
fn test_duplicate_across_scalar_and_collection() {
    let mut registry = create_registry();
    let mut builder = registry.configure::<Person>().unwrap();

    builder
        .configure_collection(member!(Person, tags), |tags| {
            tags.ignore_order();
        })
        .unwrap();
    let err = builder
        .configure_member(member!(Person, tags), |rule| {
            rule.ignore();
        })
        .unwrap_err();
    assert!(matches!(err, ConfigError::DuplicateMember { .. }));

    let rule = builder.member_rule("tags");
    assert!(!rule.is_ignored());
    assert!(!rule.as_collection().unwrap().ordered);
}

#[test]
fn test_duplicate_scalar_then_collection() {
    let mut registry = create_registry();
    let mut builder = registry.configure::<Person>().unwrap();

    builder.ignore_member(member!(Person, tags)).unwrap();
    let mut callback_ran = false;
    let err = builder
        .configure_collection(member!(Person, tags), |_| callback_ran = true)
        .unwrap_err();

    assert!(matches!(err, ConfigError::DuplicateMember { .. }));
    assert!(!callback_ran);
    assert!(!builder.member_rule("tags").is_collection());
    assert!(builder.member_rule("tags").is_ignored());
}

#[test]
fn test_duplicate_detected_across_builders() {
    let mut registry = create_registry();
    registry
        .configure::<Person>()
        .unwrap()
        .ignore_member(member!(Person, age))
        .unwrap();

    let mut builder = registry.configure::<Person>().unwrap();
    assert!(builder.ignore_member_named("age").is_err());
}

#[test]
fn test_unregistered_member_has_default_rule() {
    let mut registry = create_registry();
    {
        let mut builder = registry.configure::<Person>().unwrap();
        builder.ignore_member(member!(Person, name)).unwrap();
        assert!(builder.member_rule("age").is_default());
    }

    assert!(registry.member_rule::<Person>("age").is_default());
    assert!(registry.member_rule::<Person>("no_such_member").is_default());
    assert!(registry.member_rule::<Order>("id").is_default());
}

#[test]
fn test_compare_fields_defaults_to_false() {
    let mut registry = create_registry();
    let builder = registry.configure::<Person>().unwrap();
    assert!(!builder.compares_fields());

    let config = builder.register();
    assert!(!config.compare_fields());
}

#[test]
fn test_compare_public_fields_is_idempotent() {
    let mut registry = create_registry();
    let mut builder = registry.configure::<Person>().unwrap();
    builder
        .compare_public_fields()
        .compare_public_fields()
        .compare_public_fields();
    assert!(builder.compares_fields());

    let config = builder.register();
    assert!(config.compare_fields());
    let names: Vec<_> = config.compared_members().map(|m| m.name).collect();
    assert_eq!(names, vec!["name", "age", "updated", "tags", "nickname"]);
}

#[test]
fn test_ignore_member_type_has_set_semantics() {
    let mut registry = create_registry();
    let mut builder = registry.configure::<Person>().unwrap();
    builder
        .ignore_member_type::<Timestamp>()
        .ignore_member_type::<Timestamp>();

    assert_eq!(builder.ignored_types().len(), 1);
    assert!(builder
        .ignored_types()
        .contains(&MemberType::of::<Timestamp>()));
}

#[test]
fn test_ignored_types_apply_to_every_type() {
    let mut registry = create_registry();
    registry
        .configure::<Person>()
        .unwrap()
        .ignore_member_type::<Timestamp>();

    let order = registry.configure::<Order>().unwrap().register();
    let names: Vec<_> = order.compared_members().map(|m| m.name).collect();
    assert_eq!(names, vec!["id"]);

    let person = registry.configure::<Person>().unwrap().register();
    assert!(person.is_type_ignored(MemberType::of::<Timestamp>()));
    assert!(person.compared_members().all(|m| m.name != "updated"));
}

#[test]
fn test_ordering_insensitive_collection_reads_back() {
    let mut registry = create_registry();
    registry
        .configure::<Person>()
        .unwrap()
        .configure_collection(member!(Person, tags), |tags| {
            tags.ignore_order();
        })
        .unwrap();

    let rule = registry.member_rule::<Person>("tags");
    let collection = rule.as_collection().expect("collection rule");
    assert!(!collection.ordered);
    assert!(matches!(collection.element, ElementComparison::Structural));
    assert_eq!(collection.element_type, MemberType::of::<String>());
}

#[test]
fn test_custom_comparer_is_stored() {
    let mut registry = create_registry();
    registry
        .configure::<Person>()
        .unwrap()
        .configure_member(member!(Person, name), |rule| {
            rule.compare_with(|a: &String, b: &String| a.eq_ignore_ascii_case(b));
        })
        .unwrap();

    let comparer = registry
        .member_rule::<Person>("name")
        .comparer()
        .expect("custom comparer");
    assert_eq!(
        comparer.test(&"alice".to_string(), &"ALICE".to_string()),
        Some(true)
    );
}

#[test]
fn test_named_member_must_exist() {
    let mut registry = create_registry();
    let mut builder = registry.configure::<Person>().unwrap();

    let err = builder.ignore_member_named("email").unwrap_err();
    match err {
        ConfigError::Resolution(ResolveError::NotAMember { expression, .. }) => {
            assert_eq!(expression, "email");
        }
        other => panic!("expected resolution error, got {other:?}"),
    }

    let err = builder.ignore_member_named("tags.len").unwrap_err();
    assert!(matches!(
        err,
        ConfigError::Resolution(ResolveError::NotDirect { .. })
    ));

    builder.ignore_member_named("secret").unwrap();
    assert!(builder.member_rule("secret").is_ignored());
}

#[test]
fn test_compile_sync_hands_frozen_snapshot_to_engine() {
    let mut registry = create_registry();
    let mut builder = registry.configure::<Person>().unwrap();
    builder.ignore_member(member!(Person, age)).unwrap();
    let compiled = builder.compile_sync().unwrap();

    assert_eq!(compiled.type_name(), "Person");
    assert!(compiled.get_member_rule("age").is_ignored());
    assert_eq!(registry.engine().compiled(), vec!["Person"]);
    assert!(registry.is_frozen::<Person>());
    assert!(Arc::ptr_eq(
        &compiled,
        &registry.configuration::<Person>().unwrap()
    ));
}

#[test]
fn test_compile_sync_propagates_engine_failure() {
    init_logging();
    let (engine, _rx) = FailingEngine::new();
    let mut registry = ConfigurationRegistry::new(Arc::new(engine));

    let err = registry
        .configure::<Person>()
        .unwrap()
        .compile_sync()
        .unwrap_err();

    match err {
        ConfigError::Compile(e) => {
            assert_eq!(e.type_name(), "Person");
            assert!(e.to_string().contains("engine refused Person"));
        }
        other => panic!("expected compile error, got {other:?}"),
    }
    assert_eq!(registry.engine().attempts.load(Ordering::SeqCst), 1);
}

#[test]
fn test_compile_async_swallows_engine_failure() {
    init_logging();
    let (engine, rx) = FailingEngine::new();
    let mut registry = ConfigurationRegistry::new(Arc::new(engine));

    registry.configure::<Person>().unwrap().compile_async();

    let compiled = rx.recv_timeout(Duration::from_secs(10)).unwrap();
    assert_eq!(compiled, "Person");
    assert!(registry.is_frozen::<Person>());
}

#[test]
fn test_compile_async_runs_on_dedicated_pool() {
    init_logging();
    let (engine, rx) = RecordingEngine::with_channel();
    let settings = CompileSettings::new()
        .with_worker_threads(1)
        .with_thread_name_prefix("cmp-test");
    let mut registry = ConfigurationRegistry::with_settings(Arc::new(engine), settings).unwrap();
    assert!(registry.has_dedicated_workers());

    registry.configure::<Order>().unwrap().compile_async();

    assert_eq!(rx.recv_timeout(Duration::from_secs(10)).unwrap(), "Order");
    assert_eq!(registry.engine().compiled(), vec!["Order"]);
}

#[test]
fn test_compile_async_survives_engine_panic() {
    init_logging();
    let (engine, started) = PanickingEngine::new("Person");
    let mut registry = ConfigurationRegistry::new(Arc::new(engine));

    registry.configure::<Person>().unwrap().compile_async();
    assert_eq!(started.recv_timeout(Duration::from_secs(10)).unwrap(), "Person");

    // Give the worker time to unwind before touching the engine again.
    std::thread::sleep(Duration::from_millis(200));

    registry.compile_async::<Order>();
    assert_eq!(started.recv_timeout(Duration::from_secs(10)).unwrap(), "Order");
    assert_eq!(registry.compile::<Order>().unwrap(), "Order");
}

#[test]
fn test_compile_async_survives_engine_panic_on_dedicated_pool() {
    init_logging();
    let (engine, started) = PanickingEngine::new("Person");
    let settings = CompileSettings::new().with_worker_threads(1);
    let mut registry = ConfigurationRegistry::with_settings(Arc::new(engine), settings).unwrap();

    registry.configure::<Person>().unwrap().compile_async();
    assert_eq!(started.recv_timeout(Duration::from_secs(10)).unwrap(), "Person");

    // The single worker only picks this up after the panicking job has unwound.
    registry.compile_async::<Order>();
    assert_eq!(started.recv_timeout(Duration::from_secs(10)).unwrap(), "Order");
    assert_eq!(registry.compile::<Order>().unwrap(), "Order");
}

#[test]
fn test_configure_after_compile_is_rejected() {
    let mut registry = create_registry();
    registry.configure::<Person>().unwrap().compile_sync().unwrap();

    let err = registry.configure::<Person>().err().unwrap();
    assert!(matches!(
        err,
        ConfigError::AlreadyCompiled {
            type_name: "Person"
        }
    ));
}

#[test]
fn test_recompile_reuses_snapshot() {
    let mut registry = create_registry();
    let first = registry.configure::<Order>().unwrap().compile_sync().unwrap();
    let second = registry.compile::<Order>().unwrap();

    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(registry.engine().compiled(), vec!["Order", "Order"]);
}

#[test]
fn test_compile_unconfigured_type_uses_defaults() {
    let mut registry = create_registry();
    let config = registry.compile::<Order>().unwrap();

    assert_eq!(config.rule_count(), 0);
    assert!(!config.compare_fields());
    assert_eq!(registry.len(), 1);
}

#[test]
fn test_snapshot_keeps_ignored_types_from_freeze_time() {
    let mut registry = create_registry();
    let order = registry.compile::<Order>().unwrap();

    registry
        .configure::<Person>()
        .unwrap()
        .ignore_member_type::<Timestamp>();

    assert!(order.ignored_types().is_empty());
    assert_eq!(registry.ignored_types().len(), 1);
}

#[test]
fn test_settings_seed_compare_fields() {
    init_logging();
    let settings = CompileSettings::new().with_compare_fields_by_default(true);
    let mut registry =
        ConfigurationRegistry::with_settings(Arc::new(RecordingEngine::default()), settings)
            .unwrap();
    assert!(!registry.has_dedicated_workers());

    let builder = registry.configure::<Person>().unwrap();
    assert!(builder.compares_fields());
}

#[test]
fn test_reset_clears_registry() {
    let mut registry = create_registry();
    registry
        .configure::<Person>()
        .unwrap()
        .ignore_member_type::<Timestamp>()
        .ignore_member(member!(Person, name))
        .unwrap();
    registry.compile::<Order>().unwrap();

    registry.reset();

    assert!(registry.is_empty());
    assert!(registry.ignored_types().is_empty());
    assert!(registry.member_rule::<Person>("name").is_default());
    assert!(registry.configure::<Order>().is_ok());
}

#[test]
fn test_plan_engine_caches_and_replaces_plans() {
    init_logging();
    let engine = Arc::new(PlanEngine::new());
    let mut registry = ConfigurationRegistry::new(Arc::clone(&engine));

    let mut builder = registry.configure::<Person>().unwrap();
    builder
        .ignore_member(member!(Person, age))
        .unwrap()
        .configure_collection(member!(Person, tags), |tags| {
            tags.compare_elements_with(|a: &String, b: &String| a.trim() == b.trim());
        })
        .unwrap();
    let plan = builder.compile_sync().unwrap();

    assert_eq!(plan.member_names(), vec!["name", "updated", "tags"]);
    assert!(plan.find("tags").unwrap().rule.is_collection());
    assert!(Arc::ptr_eq(&plan, &engine.plan::<Person>().unwrap()));

    let replanned = registry.compile::<Person>().unwrap();
    assert!(!Arc::ptr_eq(&plan, &replanned));
    assert_eq!(replanned.member_names(), plan.member_names());
    assert_eq!(engine.compiled_count(), 1);
    assert!(engine.plan::<Order>().is_none());
}
