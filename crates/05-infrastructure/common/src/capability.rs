//! 能力解析
//!
//! 判断类型是否直接或经由元注解链携带某个标记

use crate::metadata::TypeInfo;
use std::any::TypeId;
use std::collections::HashSet;

/// 注解来源
pub trait AnnotationSource {
    /// 类型上直接标注的注解，未知类型返回空
    fn annotations_of(&self, type_id: TypeId) -> &[TypeInfo];
}

/// 检查类型是否携带标记
///
/// 每个注解类型在一次查询中只展开一次，自引用和注解之间的环路
/// 按不匹配处理后继续检查兄弟注解。
pub fn carries_capability<S>(source: &S, type_id: TypeId, marker: TypeId) -> bool
where
    S: AnnotationSource + ?Sized,
{
    let mut visited = HashSet::new();
    visited.insert(type_id);
    search(source, type_id, marker, &mut visited)
}

fn search<S>(source: &S, type_id: TypeId, marker: TypeId, visited: &mut HashSet<TypeId>) -> bool
where
    S: AnnotationSource + ?Sized,
{
    let annotations = source.annotations_of(type_id);
    if annotations.iter().any(|annotation| annotation.id == marker) {
        return true;
    }
    for annotation in annotations {
        if !visited.insert(annotation.id) {
            continue;
        }
        if search(source, annotation.id, marker, visited) {
            return true;
        }
    }
    false
}

/// 绑定了注解来源和标记的能力解析器
pub struct CapabilityResolver<'a> {
    source: &'a dyn AnnotationSource,
    marker: TypeId,
}

impl<'a> CapabilityResolver<'a> {
    pub fn new(source: &'a dyn AnnotationSource, marker: TypeId) -> Self {
        Self { source, marker }
    }

    /// 以指定类型为标记
    pub fn for_marker<M: ?Sized + 'static>(source: &'a dyn AnnotationSource) -> Self {
        Self::new(source, TypeId::of::<M>())
    }

    pub fn carries(&self, type_id: TypeId) -> bool {
        carries_capability(self.source, type_id, self.marker)
    }

    pub fn carries_type(&self, type_info: &TypeInfo) -> bool {
        self.carries(type_info.id)
    }
}
