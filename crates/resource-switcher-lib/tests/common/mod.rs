//! Shared fixture helpers for integration tests.

use std::path::PathBuf;

use resource_switcher_lib::{
    InMemoryContainers, ResourceCatalog, Scene, SwitcherConfig, SwitcherController, WindowModel,
};

/// Path to the fixtures directory shared with the CLI tests.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn catalog() -> ResourceCatalog {
    ResourceCatalog::from_path(&fixtures_dir().join("resources.csv"))
        .expect("load fixture resources.csv")
}

#[allow(dead_code)]
pub fn config() -> SwitcherConfig {
    SwitcherConfig::from_path(&fixtures_dir().join("switchers.json"))
        .expect("load fixture switchers.json")
}

/// Controller with every fixture switcher added in declaration order.
#[allow(dead_code)]
pub fn controller(scene: Scene) -> SwitcherController<InMemoryContainers, WindowModel> {
    let library = catalog();
    let switchers = config().build(&library);
    let mut controller =
        SwitcherController::new(scene, library, InMemoryContainers::new(), WindowModel::new());
    for switcher in switchers {
        controller.add_switcher(switcher);
    }
    controller
}

#[allow(dead_code)]
pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
