use component_macros::{component, constructors};
use std::sync::Arc;

#[component]
pub struct Repository;

#[constructors]
impl Repository {
    pub fn new() -> Self {
        Self
    }
}

#[component]
pub struct Service {
    repository: Arc<Repository>,
    name: String,
}

#[constructors]
impl Service {
    pub fn new(repository: Arc<Repository>) -> Self {
        Self::named(repository, "service")
    }

    pub fn with_name(repository: Arc<Repository>, name: &str) -> Service {
        Self::named(repository, name)
    }

    pub fn open(repository: Arc<Repository>) -> Result<Self, std::io::Error> {
        Ok(Self::new(repository))
    }

    fn named(repository: Arc<Repository>, name: &str) -> Self {
        Self {
            repository,
            name: name.to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

fn main() {
    let service = Service::new(Arc::new(Repository::new()));
    let _ = (service.name(), &service.repository);
}
