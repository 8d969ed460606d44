//! Centralized integration tests for component-macros crate

use component_macros::{annotated, annotation, component, constructors};
use infrastructure_common::{
    global_catalog, Bean, CapabilityResolver, Component, TypeCatalog, TypeInfo, TypeIntrospector,
    TypeKind,
};
use std::any::TypeId;
use std::sync::Arc;

#[annotation(Component)]
pub struct Repository;

#[annotation(Repository)]
pub struct JdbcRepository;

#[annotation]
pub struct Audited;

#[component]
#[derive(Debug)]
pub struct ConnectionPool {
    size: usize,
}

#[constructors]
impl ConnectionPool {
    pub fn new() -> Self {
        Self { size: 4 }
    }
}

#[annotated(JdbcRepository, Audited)]
pub struct OrderRepository {
    pool: Arc<ConnectionPool>,
}

#[constructors]
impl OrderRepository {
    pub fn with_url(_url: String) -> Self {
        unreachable!("不会被容器调用")
    }

    pub fn new(pool: Arc<ConnectionPool>) -> Self {
        Self { pool }
    }

    pub fn pool_size(&self) -> usize {
        self.pool.size
    }
}

pub struct Unregistered;

#[component]
pub struct FlakyClient;

#[constructors]
impl FlakyClient {
    pub fn connect() -> Result<Self, std::io::Error> {
        Err(std::io::Error::new(std::io::ErrorKind::Other, "连接被拒绝"))
    }
}

fn catalog() -> TypeCatalog {
    global_catalog().unwrap()
}

#[test]
fn test_annotation_types_are_registered_with_meta_annotations() {
    let catalog = catalog();
    let repository = catalog.describe(TypeId::of::<Repository>()).unwrap();
    let audited = catalog.describe(TypeId::of::<Audited>()).unwrap();

    assert_eq!(repository.kind(), TypeKind::Annotation);
    assert!(repository.annotations()[0].is::<Component>());
    assert!(audited.annotations().is_empty());
}

#[test]
fn test_meta_annotated_type_carries_component() {
    let catalog = catalog();
    let resolver = CapabilityResolver::for_marker::<Component>(&catalog);

    assert!(resolver.carries_type(&TypeInfo::of::<OrderRepository>()));
    assert!(resolver.carries_type(&TypeInfo::of::<ConnectionPool>()));
    assert!(!resolver.carries_type(&TypeInfo::of::<Audited>()));
    assert!(!resolver.carries_type(&TypeInfo::of::<Unregistered>()));
}

#[test]
fn test_constructors_keep_declaration_order_and_parameter_types() {
    let catalog = catalog();
    let descriptor = catalog.describe(TypeId::of::<OrderRepository>()).unwrap();
    let constructors = descriptor.constructors();

    assert_eq!(descriptor.kind(), TypeKind::Class);
    assert_eq!(constructors.len(), 2);
    assert_eq!(constructors[0].name(), "with_url");
    assert!(constructors[0].parameters()[0].is::<String>());
    assert!(!constructors[0].is_injectable(0));
    assert_eq!(constructors[1].name(), "new");
    assert!(constructors[1].parameters()[0].is::<ConnectionPool>());
    assert!(constructors[1].is_injectable(0));
}

#[test]
fn test_generated_constructor_injects_arguments() {
    let catalog = catalog();
    let pool_descriptor = catalog.describe(TypeId::of::<ConnectionPool>()).unwrap();
    let pool = pool_descriptor.constructors()[0].invoke(&[]).unwrap();

    let descriptor = catalog.describe(TypeId::of::<OrderRepository>()).unwrap();
    let repository = descriptor.constructors()[1]
        .invoke(&[pool.clone()])
        .unwrap()
        .downcast::<OrderRepository>()
        .unwrap();

    assert_eq!(repository.pool_size(), 4);
    assert!(Arc::ptr_eq(
        &repository.pool,
        &pool.downcast::<ConnectionPool>().unwrap()
    ));
}

#[test]
fn test_plain_parameter_constructor_reports_error() {
    let catalog = catalog();
    let descriptor = catalog.describe(TypeId::of::<OrderRepository>()).unwrap();
    let pool: Bean = Arc::new(ConnectionPool::new());

    assert!(descriptor.constructors()[0].invoke(&[pool]).is_err());
}

#[test]
fn test_fallible_constructor_propagates_error() {
    let catalog = catalog();
    let descriptor = catalog.describe(TypeId::of::<FlakyClient>()).unwrap();

    let error = descriptor.constructors()[0].invoke(&[]).err().unwrap();
    assert_eq!(error.to_string(), "连接被拒绝");
}
