//! 组件基础定义
//!
//! 组件标记、类型描述符以及组件实例

use crate::constructor::Constructor;
use crate::errors::{BoxError, DependencyError};
use crate::metadata::{TypeInfo, TypeKind};
use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

/// 组件能力标记
///
/// 直接标注或经由元注解间接标注此标记的类型会被容器管理
#[derive(Debug, Clone, Copy, Default)]
pub struct Component;

/// 组件实例
pub type Bean = Arc<dyn Any + Send + Sync>;

/// 类型擦除的构造函数
pub type ConstructorFn = Arc<dyn Fn(&[Bean]) -> Result<Bean, BoxError> + Send + Sync>;

/// 构造函数描述符
#[derive(Clone)]
pub struct ConstructorDescriptor {
    name: String,
    parameters: Vec<TypeInfo>,
    injectable: Vec<bool>,
    factory: ConstructorFn,
}

impl ConstructorDescriptor {
    /// 创建新的构造函数描述符
    ///
    /// `parameters` 按声明顺序给出，`factory` 收到的实例与之一一对应
    pub fn new(name: impl Into<String>, parameters: Vec<TypeInfo>, factory: ConstructorFn) -> Self {
        Self {
            name: name.into(),
            injectable: vec![true; parameters.len()],
            parameters,
            factory,
        }
    }

    /// 标记按值传入的参数，容器不会为其注入实例
    pub fn plain_parameter(mut self, index: usize) -> Self {
        if let Some(injectable) = self.injectable.get_mut(index) {
            *injectable = false;
        }
        self
    }

    /// 参数是否可由容器注入
    pub fn is_injectable(&self, index: usize) -> bool {
        self.injectable.get(index).copied().unwrap_or(false)
    }

    /// 从类型化构造函数创建
    pub fn typed<T, Args, F>(name: String, constructor: F) -> Self
    where
        T: Send + Sync + 'static,
        F: Constructor<T, Args>,
    {
        let factory: ConstructorFn = Arc::new(move |args: &[Bean]| {
            let instance = constructor.construct(args)?;
            Ok(Arc::new(instance) as Bean)
        });
        Self::new(name, F::parameters(), factory)
    }

    /// 构造函数名称
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 参数类型
    pub fn parameters(&self) -> &[TypeInfo] {
        &self.parameters
    }

    /// 调用构造函数
    pub fn invoke(&self, args: &[Bean]) -> Result<Bean, BoxError> {
        (self.factory)(args)
    }
}

impl fmt::Debug for ConstructorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConstructorDescriptor")
            .field("name", &self.name)
            .field("parameters", &self.parameters)
            .field("injectable", &self.injectable)
            .field("factory", &"<function>")
            .finish()
    }
}

/// 类型描述符
#[derive(Debug, Clone)]
pub struct TypeDescriptor {
    type_info: TypeInfo,
    kind: TypeKind,
    annotations: Vec<TypeInfo>,
    constructors: Vec<ConstructorDescriptor>,
}

impl TypeDescriptor {
    /// 创建新的类型描述符
    pub fn new(
        type_info: TypeInfo,
        kind: TypeKind,
        annotations: Vec<TypeInfo>,
        constructors: Vec<ConstructorDescriptor>,
    ) -> Self {
        Self {
            type_info,
            kind,
            annotations,
            constructors,
        }
    }

    /// 类型化构建器
    pub fn builder<T: Send + Sync + 'static>() -> TypeDescriptorBuilder<T> {
        TypeDescriptorBuilder::new()
    }

    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    /// 直接标注的注解
    pub fn annotations(&self) -> &[TypeInfo] {
        &self.annotations
    }

    /// 按声明顺序排列的构造函数
    pub fn constructors(&self) -> &[ConstructorDescriptor] {
        &self.constructors
    }
}

/// 类型描述符构建器
pub struct TypeDescriptorBuilder<T> {
    kind: TypeKind,
    annotations: Vec<TypeInfo>,
    constructors: Vec<ConstructorDescriptor>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Send + Sync + 'static> TypeDescriptorBuilder<T> {
    fn new() -> Self {
        Self {
            kind: TypeKind::Class,
            annotations: Vec::new(),
            constructors: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// 设置类型种类
    pub fn kind(mut self, kind: TypeKind) -> Self {
        self.kind = kind;
        self
    }

    /// 添加注解
    pub fn annotated_with<A: ?Sized + 'static>(mut self) -> Self {
        self.annotations.push(TypeInfo::of::<A>());
        self
    }

    /// 标注组件能力
    pub fn component(self) -> Self {
        self.annotated_with::<Component>()
    }

    /// 添加构造函数
    ///
    /// 闭包参数必须都是 `Arc<D>`，返回 `T` 或 `Result<T, E>`
    pub fn constructor<Args, F>(mut self, constructor: F) -> Self
    where
        F: Constructor<T, Args>,
    {
        let name = format!("constructor#{}", self.constructors.len());
        self.constructors
            .push(ConstructorDescriptor::typed::<T, Args, F>(name, constructor));
        self
    }

    /// 添加具名构造函数
    pub fn named_constructor<Args, F>(mut self, name: &str, constructor: F) -> Self
    where
        F: Constructor<T, Args>,
    {
        self.constructors.push(ConstructorDescriptor::typed::<T, Args, F>(
            name.to_string(),
            constructor,
        ));
        self
    }

    /// 添加类型擦除的构造函数
    pub fn raw_constructor(mut self, constructor: ConstructorDescriptor) -> Self {
        self.constructors.push(constructor);
        self
    }

    /// 构建类型描述符
    pub fn build(self) -> TypeDescriptor {
        TypeDescriptor::new(
            TypeInfo::of::<T>(),
            self.kind,
            self.annotations,
            self.constructors,
        )
    }
}

/// 已注册的组件实例
#[derive(Clone)]
pub struct RegisteredBean {
    type_info: TypeInfo,
    instance: Bean,
}

impl RegisteredBean {
    pub fn new(type_info: TypeInfo, instance: Bean) -> Self {
        Self {
            type_info,
            instance,
        }
    }

    pub fn type_info(&self) -> &TypeInfo {
        &self.type_info
    }

    /// 类型擦除的实例
    pub fn instance(&self) -> &Bean {
        &self.instance
    }

    /// 转换为具体类型
    pub fn downcast<T: Any + Send + Sync>(&self, name: &str) -> Result<Arc<T>, DependencyError> {
        self.instance
            .clone()
            .downcast::<T>()
            .map_err(|_| DependencyError::BeanTypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<T>().to_string(),
                actual: self.type_info.path.clone(),
            })
    }
}

impl fmt::Debug for RegisteredBean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredBean")
            .field("type_info", &self.type_info)
            .finish_non_exhaustive()
    }
}
