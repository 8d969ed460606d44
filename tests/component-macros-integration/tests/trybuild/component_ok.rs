use component_macros::{annotated, annotation, component};
use infrastructure_common::Component;

#[annotation(Component)]
pub struct Service;

#[annotation]
pub struct Documented;

#[component]
#[derive(Debug, Clone)]
pub struct Plain;

#[component(default)]
#[derive(Default)]
pub struct Settings {
    pub port: u16,
}

#[annotated(Service, Documented)]
pub enum Mode {
    Fast,
    Safe,
}

fn main() {
    let _ = (Plain, Mode::Fast, Mode::Safe, Settings::default().port);
}
