//! 类型目录
//!
//! 编译期生成的类型元数据表，组件发现与依赖解析都从这里读取类型信息

use crate::capability::AnnotationSource;
use crate::component::{ConstructorDescriptor, TypeDescriptor};
use crate::errors::ComponentError;
use crate::metadata::{TypeInfo, TypeKind};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use std::any::TypeId;
use std::collections::HashMap;
use std::sync::Arc;

/// 类型内省接口
pub trait TypeIntrospector: AnnotationSource + Send + Sync {
    /// 获取类型描述符
    fn describe(&self, type_id: TypeId) -> Option<Arc<TypeDescriptor>>;
}

/// 类型目录
#[derive(Debug, Clone, Default)]
pub struct TypeCatalog {
    types: HashMap<TypeId, Arc<TypeDescriptor>>,
    order: Vec<TypeId>,
}

impl TypeCatalog {
    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// 按登记顺序遍历
    pub fn iter(&self) -> impl Iterator<Item = &Arc<TypeDescriptor>> {
        self.order.iter().filter_map(|id| self.types.get(id))
    }
}

impl AnnotationSource for TypeCatalog {
    fn annotations_of(&self, type_id: TypeId) -> &[TypeInfo] {
        self.types
            .get(&type_id)
            .map(|descriptor| descriptor.annotations())
            .unwrap_or(&[])
    }
}

impl TypeIntrospector for TypeCatalog {
    fn describe(&self, type_id: TypeId) -> Option<Arc<TypeDescriptor>> {
        self.types.get(&type_id).cloned()
    }
}

#[derive(Debug, Clone)]
struct PendingType {
    type_info: TypeInfo,
    declared: Option<(TypeKind, Vec<TypeInfo>)>,
    constructors: Vec<ConstructorDescriptor>,
}

/// 类型目录构建器
///
/// 同一类型的声明与构造函数可以分开提交，提交顺序不影响结果
#[derive(Debug, Clone, Default)]
pub struct CatalogBuilder {
    pending: Vec<PendingType>,
    index: HashMap<TypeId, usize>,
    errors: Vec<String>,
}

impl CatalogBuilder {
    fn entry(&mut self, type_info: TypeInfo) -> &mut PendingType {
        let next = self.pending.len();
        let position = *self.index.entry(type_info.id).or_insert(next);
        if position == next {
            self.pending.push(PendingType {
                type_info,
                declared: None,
                constructors: Vec::new(),
            });
        }
        &mut self.pending[position]
    }

    /// 声明类型及其直接注解
    pub fn declare(&mut self, type_info: TypeInfo, kind: TypeKind, annotations: Vec<TypeInfo>) -> &mut Self {
        let entry = self.entry(type_info);
        if entry.declared.is_some() {
            let duplicate = entry.type_info.path.clone();
            self.errors.push(duplicate);
        } else {
            entry.declared = Some((kind, annotations));
        }
        self
    }

    /// 追加构造函数
    pub fn add_constructors(
        &mut self,
        type_info: TypeInfo,
        constructors: Vec<ConstructorDescriptor>,
    ) -> &mut Self {
        self.entry(type_info).constructors.extend(constructors);
        self
    }

    /// 登记完整的类型描述符
    pub fn register(&mut self, descriptor: TypeDescriptor) -> &mut Self {
        let type_info = descriptor.type_info().clone();
        self.declare(
            type_info.clone(),
            descriptor.kind(),
            descriptor.annotations().to_vec(),
        );
        self.add_constructors(type_info, descriptor.constructors().to_vec())
    }

    /// 构建类型目录
    pub fn build(&self) -> Result<TypeCatalog, ComponentError> {
        if let Some(type_name) = self.errors.first() {
            return Err(ComponentError::DuplicateDescriptor {
                type_name: type_name.clone(),
            });
        }

        let mut catalog = TypeCatalog::default();
        for pending in &self.pending {
            let (kind, annotations) = pending
                .declared
                .clone()
                .unwrap_or((TypeKind::Class, Vec::new()));
            let descriptor = TypeDescriptor::new(
                pending.type_info.clone(),
                kind,
                annotations,
                pending.constructors.clone(),
            );
            catalog.order.push(pending.type_info.id);
            catalog.types.insert(pending.type_info.id, Arc::new(descriptor));
        }
        Ok(catalog)
    }
}

/// 全局类型目录（由组件宏在程序启动时填充）
static GLOBAL_CATALOG: Lazy<Mutex<CatalogBuilder>> = Lazy::new(|| Mutex::new(CatalogBuilder::default()));

/// 提交类型声明
pub fn submit_type(type_info: TypeInfo, kind: TypeKind, annotations: Vec<TypeInfo>) {
    tracing::trace!("登记类型: {} ({:?})", type_info.path, kind);
    GLOBAL_CATALOG.lock().declare(type_info, kind, annotations);
}

/// 提交构造函数
pub fn submit_constructors(type_info: TypeInfo, constructors: Vec<ConstructorDescriptor>) {
    tracing::trace!("登记构造函数: {} x{}", type_info.path, constructors.len());
    GLOBAL_CATALOG.lock().add_constructors(type_info, constructors);
}

/// 获取全局类型目录快照
pub fn global_catalog() -> Result<TypeCatalog, ComponentError> {
    GLOBAL_CATALOG.lock().build()
}
