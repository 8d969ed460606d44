//! 组件工厂
//!
//! 通过构造函数注入递归地创建组件及其依赖

use crate::registry::BeanRegistryImpl;
use di_abstractions::{BeanLookup, ResolveContext};
use infrastructure_common::{
    carries_capability, Bean, ConstructorDescriptor, DependencyError, NamingConventions,
    RejectedConstructor, TypeDescriptor, TypeInfo, TypeIntrospector,
};
use std::any::TypeId;
use tracing::debug;

/// 组件工厂
///
/// 同一类型最多创建一次；正在创建的类型记录在解析上下文中，
/// 再次进入时报告循环依赖。
pub struct BeanFactory<'a> {
    introspector: &'a dyn TypeIntrospector,
    registry: &'a mut BeanRegistryImpl,
    marker: TypeId,
    context: ResolveContext,
}

/// 构造函数的检查结果
enum Selection {
    /// 所有参数均已就绪
    Satisfied,
    /// 存在不具备组件能力的参数
    Rejected(RejectedConstructor),
}

impl<'a> BeanFactory<'a> {
    pub fn new(
        introspector: &'a dyn TypeIntrospector,
        registry: &'a mut BeanRegistryImpl,
        marker: TypeId,
    ) -> Self {
        Self {
            introspector,
            registry,
            marker,
            context: ResolveContext::new(),
        }
    }

    /// 确保组件已创建并注册
    pub fn ensure_built(&mut self, descriptor: &TypeDescriptor) -> Result<(), DependencyError> {
        let type_info = descriptor.type_info();
        let name = NamingConventions::canonical_name(type_info);
        if let Some(existing) = self.registry.lookup_by_name(&name) {
            if existing.type_info().id == type_info.id {
                return Ok(());
            }
            return Err(DependencyError::BeanNameConflict {
                name,
                existing: existing.type_info().path.clone(),
                incoming: type_info.path.clone(),
            });
        }

        self.context.push_type(type_info)?;
        let result = self.build(descriptor);
        self.context.pop_type();
        result
    }

    fn build(&mut self, descriptor: &TypeDescriptor) -> Result<(), DependencyError> {
        let type_info = descriptor.type_info();
        let mut rejected = Vec::new();

        for constructor in descriptor.constructors() {
            match self.select(constructor)? {
                Selection::Satisfied => {
                    debug!(
                        "使用构造函数 {}::{}",
                        type_info.name,
                        constructor.name()
                    );
                    let instance = self.instantiate(type_info, constructor)?;
                    return self.registry.register(type_info, instance);
                }
                Selection::Rejected(reason) => {
                    debug!("放弃构造函数 {}::{}", type_info.name, reason);
                    rejected.push(reason);
                }
            }
        }

        Err(DependencyError::NoUsableConstructor {
            type_name: type_info.path.clone(),
            rejected,
        })
    }

    /// 按从左到右的顺序准备参数，遇到非组件参数即放弃该构造函数
    ///
    /// 按值传入的参数即使类型是组件也无法注入
    fn select(&mut self, constructor: &ConstructorDescriptor) -> Result<Selection, DependencyError> {
        for (index, parameter) in constructor.parameters().iter().enumerate() {
            if !self.is_injectable(constructor, index) {
                let non_component_parameters = constructor
                    .parameters()
                    .iter()
                    .enumerate()
                    .filter(|(index, _)| !self.is_injectable(constructor, *index))
                    .map(|(_, parameter)| parameter.path.clone())
                    .collect();
                return Ok(Selection::Rejected(RejectedConstructor {
                    constructor: constructor.name().to_string(),
                    non_component_parameters,
                }));
            }

            let dependency = self.introspector.describe(parameter.id).ok_or_else(|| {
                DependencyError::NoUsableConstructor {
                    type_name: parameter.path.clone(),
                    rejected: Vec::new(),
                }
            })?;
            self.ensure_built(&dependency)?;
        }
        Ok(Selection::Satisfied)
    }

    fn instantiate(
        &self,
        type_info: &TypeInfo,
        constructor: &ConstructorDescriptor,
    ) -> Result<Bean, DependencyError> {
        let args = constructor
            .parameters()
            .iter()
            .map(|parameter| {
                self.registry
                    .lookup_by_type(parameter)
                    .map(|bean| bean.instance().clone())
                    .ok_or_else(|| DependencyError::BeanNotFound {
                        name: NamingConventions::canonical_name(parameter),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        constructor
            .invoke(&args)
            .map_err(|source| DependencyError::InstantiationError {
                type_name: type_info.path.clone(),
                constructor: constructor.name().to_string(),
                source,
            })
    }

    fn is_injectable(&self, constructor: &ConstructorDescriptor, index: usize) -> bool {
        constructor.is_injectable(index)
            && constructor.parameters().get(index).is_some_and(|parameter| {
                carries_capability(self.introspector, parameter.id, self.marker)
            })
    }
}
