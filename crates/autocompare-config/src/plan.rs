//! Reference engine compiling configurations into comparison plans.

use std::any::TypeId;
use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex, PoisonError};

use autocompare_core::{Comparable, MemberDescriptor};

use crate::engine::ComparerEngine;
use crate::rule::MemberRule;
use crate::type_config::TypeConfiguration;

/// One member an engine must compare, with its rule.
#[derive(Debug, Clone)]
pub struct PlannedMember {
    pub descriptor: MemberDescriptor,
    pub rule: MemberRule,
}

/// Members of one type to compare, in declaration order.
#[derive(Debug, Clone)]
pub struct ComparisonPlan {
    pub type_name: &'static str,
    pub type_id: TypeId,
    pub members: Vec<PlannedMember>,
}

impl ComparisonPlan {
    /// Builds the plan for a frozen configuration.
    pub fn from_configuration(config: &TypeConfiguration) -> Self {
        let members = config
            .compared_members()
            .map(|descriptor| PlannedMember {
                descriptor: *descriptor,
                rule: config.get_member_rule(descriptor.name).clone(),
            })
            .collect();

        ComparisonPlan {
            type_name: config.type_name(),
            type_id: config.type_id(),
            members,
        }
    }

    pub fn member_names(&self) -> Vec<&'static str> {
        self.members.iter().map(|m| m.descriptor.name).collect()
    }

    pub fn find(&self, name: &str) -> Option<&PlannedMember> {
        self.members.iter().find(|m| m.descriptor.name == name)
    }
}

/// Engine that caches a [`ComparisonPlan`] per type.
///
/// Compiling a type again replaces its cached plan.
#[derive(Debug, Default)]
pub struct PlanEngine {
    plans: Mutex<HashMap<TypeId, Arc<ComparisonPlan>>>,
}

impl PlanEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached plan for `T`, if compiled.
    pub fn plan<T: Comparable>(&self) -> Option<Arc<ComparisonPlan>> {
        self.plan_for(TypeId::of::<T>())
    }

    pub fn plan_for(&self, type_id: TypeId) -> Option<Arc<ComparisonPlan>> {
        let plans = self.plans.lock().unwrap_or_else(PoisonError::into_inner);
        plans.get(&type_id).cloned()
    }

    pub fn compiled_count(&self) -> usize {
        self.plans.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl ComparerEngine for PlanEngine {
    type Compiled = Arc<ComparisonPlan>;
    type Error = Infallible;

    fn compile(&self, config: Arc<TypeConfiguration>) -> Result<Self::Compiled, Self::Error> {
        let plan = Arc::new(ComparisonPlan::from_configuration(&config));
        let mut plans = self.plans.lock().unwrap_or_else(PoisonError::into_inner);
        plans.insert(plan.type_id, Arc::clone(&plan));
        Ok(plan)
    }
}
