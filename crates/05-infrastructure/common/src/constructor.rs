//! 类型化构造函数
//!
//! 把 `Fn(Arc<D1>, .., Arc<Dn>) -> T` 形式的闭包适配为类型擦除的构造函数

use crate::component::Bean;
use crate::errors::BoxError;
use crate::metadata::TypeInfo;
use std::any::Any;
use std::sync::Arc;

/// 构造函数的返回值
pub trait IntoInstance<T> {
    fn into_instance(self) -> Result<T, BoxError>;
}

impl<T> IntoInstance<T> for T {
    fn into_instance(self) -> Result<T, BoxError> {
        Ok(self)
    }
}

impl<T, E> IntoInstance<T> for Result<T, E>
where
    E: Into<BoxError>,
{
    fn into_instance(self) -> Result<T, BoxError> {
        self.map_err(Into::into)
    }
}

/// 类型化构造函数
pub trait Constructor<T, Args>: Send + Sync + 'static {
    /// 参数对应的组件类型
    fn parameters() -> Vec<TypeInfo>;

    /// 使用已解析的依赖创建实例
    fn construct(&self, args: &[Bean]) -> Result<T, BoxError>;
}

/// 取出第 `index` 个依赖并转换为具体类型
pub fn inject<D: Any + Send + Sync>(args: &[Bean], index: usize) -> Result<Arc<D>, BoxError> {
    let bean = args.get(index).ok_or_else(|| -> BoxError {
        format!(
            "缺少第 {} 个参数 ({}), 只提供了 {} 个",
            index,
            std::any::type_name::<D>(),
            args.len()
        )
        .into()
    })?;
    bean.clone().downcast::<D>().map_err(|_| -> BoxError {
        format!("第 {} 个参数不是 {}", index, std::any::type_name::<D>()).into()
    })
}

macro_rules! impl_constructor {
    ($($dep:ident $var:ident),*) => {
        impl<T, R, F, $($dep,)*> Constructor<T, ($(Arc<$dep>,)*)> for F
        where
            F: Fn($(Arc<$dep>),*) -> R + Send + Sync + 'static,
            R: IntoInstance<T>,
            $($dep: Any + Send + Sync,)*
        {
            fn parameters() -> Vec<TypeInfo> {
                vec![$(TypeInfo::of::<$dep>()),*]
            }

            #[allow(unused_mut, unused_variables, unused_assignments)]
            fn construct(&self, args: &[Bean]) -> Result<T, BoxError> {
                let mut index = 0;
                $(
                    let $var = inject::<$dep>(args, index)?;
                    index += 1;
                )*
                (self)($($var),*).into_instance()
            }
        }
    };
}

impl_constructor!();
impl_constructor!(D1 d1);
impl_constructor!(D1 d1, D2 d2);
impl_constructor!(D1 d1, D2 d2, D3 d3);
impl_constructor!(D1 d1, D2 d2, D3 d3, D4 d4);
impl_constructor!(D1 d1, D2 d2, D3 d3, D4 d4, D5 d5);
impl_constructor!(D1 d1, D2 d2, D3 d3, D4 d4, D5 d5, D6 d6);
impl_constructor!(D1 d1, D2 d2, D3 d3, D4 d4, D5 d5, D6 d6, D7 d7);
impl_constructor!(D1 d1, D2 d2, D3 d3, D4 d4, D5 d5, D6 d6, D7 d7, D8 d8);
