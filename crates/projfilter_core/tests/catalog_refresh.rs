use projfilter_core::{
    CatalogError, CatalogStore, FilterConfig, FilterEngine, InMemoryCatalog, Project,
    ProjectValidationError, UNTITLED_PROJECT_NAME,
};
use std::collections::BTreeSet;

#[test]
fn new_project_tag_appears_in_universe_after_refresh() {
    let catalog = InMemoryCatalog::from_projects([Project::new("Project A", 1)]).unwrap();
    let mut engine = FilterEngine::new(catalog, FilterConfig::default());
    assert!(engine.tag_universe().is_empty());

    engine
        .update_catalog(|catalog| catalog.insert(Project::new("Project B", 2).with_tags(["TestTag"])))
        .unwrap();

    assert!(engine.tag_universe().contains("TestTag"));
    assert_eq!(engine.visibility().visible_count(), 2);
}

#[test]
fn removing_last_tag_holder_prunes_selection() {
    let catalog = InMemoryCatalog::from_projects([
        Project::new("Project A", 1).with_tags(["TestTagOne"]),
        Project::new("Project B", 2).with_tags(["TestTagTwo"]),
    ])
    .unwrap();
    let mut engine = FilterEngine::new(catalog, FilterConfig::default());
    engine.toggle_tag("TestTagOne");
    assert_eq!(engine.visibility().visible_names(), vec!["Project A"]);

    let a_id = engine.catalog().get_by_name("Project A").unwrap().id;
    engine
        .update_catalog(|catalog| catalog.set_tags(a_id, BTreeSet::new()))
        .unwrap();

    assert!(engine.state().selected_tags.is_empty());
    assert!(!engine.tag_universe().contains("TestTagOne"));
    assert_eq!(engine.visibility().visible_count(), 2);
}

#[test]
fn filtering_never_shrinks_the_catalog() {
    let catalog = InMemoryCatalog::from_projects([
        Project::new("Project A", 1).with_tags(["TestTagOne"]),
        Project::new("Project B", 2).with_tags(["TestTagTwo"]),
    ])
    .unwrap();
    let mut engine = FilterEngine::new(catalog, FilterConfig::default());
    engine.toggle_tag("TestTagOne");

    assert_eq!(engine.catalog().len(), 2);
    assert_eq!(engine.catalog().tag_universe().len(), 2);
    assert_eq!(engine.visibility().entries().len(), 2);
}

#[test]
fn empty_catalog_reports_empty_result() {
    let engine = FilterEngine::new(InMemoryCatalog::new(), FilterConfig::default());
    assert!(engine.is_empty_result());
    assert!(engine.visibility().entries().is_empty());
}

#[test]
fn catalog_rejects_invalid_records() {
    let mut project = Project::new("Project A", 1);
    project.name = String::new();
    let err = InMemoryCatalog::from_projects([project.clone()]).unwrap_err();
    assert_eq!(
        err,
        CatalogError::InvalidProject(ProjectValidationError::BlankName(project.id))
    );
}

#[test]
fn catalog_file_records_fill_defaults() {
    let raw = r#"[
        {"name": "Project A", "tags": ["TestTagOne"], "created_at": 1700000000000},
        {"name": "Project B", "creator": "alice"}
    ]"#;
    let projects: Vec<Project> = serde_json::from_str(raw).unwrap();
    assert_ne!(projects[0].id, projects[1].id);
    assert!(projects[0].has_tag("TestTagOne"));
    assert!(projects[1].tags.is_empty());
    assert_eq!(projects[1].creator, "alice");
    assert_eq!(projects[1].description, "");

    let catalog = InMemoryCatalog::from_projects(projects).unwrap();
    assert_eq!(catalog.len(), 2);
}

#[test]
fn catalog_file_record_without_name_is_untitled() {
    let projects: Vec<Project> = serde_json::from_str(r#"[{"tags": ["Imported"]}]"#).unwrap();
    assert_eq!(projects[0].name, UNTITLED_PROJECT_NAME);

    let blank: Vec<Project> = serde_json::from_str(r#"[{"name": "  "}]"#).unwrap();
    assert!(InMemoryCatalog::from_projects(blank).is_err());
}
