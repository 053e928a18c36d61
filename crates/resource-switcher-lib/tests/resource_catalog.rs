mod common;

use resource_switcher_lib::error::{ConfigError, Error};
use resource_switcher_lib::{ResourceCatalog, ResourceLibrary};

use common::catalog;

#[test]
fn loads_fixture_catalog() {
    let catalog = catalog();
    assert_eq!(catalog.len(), 7);
    assert!(catalog.source_path().is_some());

    let fuel = catalog.resolve("liquidfuel").expect("case-insensitive lookup");
    assert_eq!(fuel.name, "LiquidFuel");
    assert_eq!(fuel.display_name, "Liquid Fuel");
    assert_eq!(fuel.volume_per_unit, 1.0);

    let names: Vec<&str> = catalog
        .resources_sorted()
        .into_iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(names.first(), Some(&"ElectricCharge"));
    assert!(catalog.resolve("Unobtainium").is_none());
}

#[test]
fn accepts_header_synonyms_without_display_name() {
    let csv = "resource,volume,cost\nOre,5,0.02\n";
    let catalog = ResourceCatalog::from_reader(csv.as_bytes()).expect("synonyms accepted");
    let ore = catalog.get("ore").expect("ore present");
    assert_eq!(ore.display_name, "Ore");
    assert_eq!(ore.unit_cost, 0.02);
}

#[test]
fn rejects_duplicate_names_case_insensitive() {
    let csv = "name,volume_per_unit,unit_cost\nOre,5,1\nore,5,1\n";
    let err = ResourceCatalog::from_reader(csv.as_bytes()).expect_err("duplicates rejected");
    match err {
        Error::DuplicateResource { name } => assert_eq!(name, "ore"),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn rejects_non_positive_volume() {
    let csv = "name,volume_per_unit,unit_cost\nOre,0,1\n";
    let err = ResourceCatalog::from_reader(csv.as_bytes()).expect_err("zero volume rejected");
    match err {
        Error::Config(ConfigError::InvalidResourceDefinition { message }) => {
            assert!(message.contains("volume_per_unit"))
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn reports_missing_columns() {
    let csv = "name,cost\nOre,1\n";
    let err = ResourceCatalog::from_reader(csv.as_bytes()).expect_err("missing volume column");
    assert!(err.to_string().contains("volume_per_unit"));
}
