use pretty_assertions::assert_eq;
use safer_index_core::schema::{Index, ModelState, ProjectState};

fn int_field_idx() -> Index {
    Index::builder("int_field_idx")
        .fields(["int_field"])
        .build()
        .unwrap()
}

fn project_state() -> ProjectState {
    [ModelState::new("example_app", "IntModel").field("id").field("int_field")]
        .into_iter()
        .collect()
}

#[test]
fn models_are_looked_up_case_insensitively() {
    let state = project_state();

    let model = state.model("example_app", "intmodel").unwrap();
    assert_eq!(model.name, "IntModel");
    assert!(state.model("example_app", "INTMODEL").is_some());
    assert!(state.model("other_app", "IntModel").is_none());
}

#[test]
fn add_index_appends() {
    let mut state = project_state();
    state
        .add_index("example_app", "IntModel", int_field_idx())
        .unwrap();

    let model = state.get_model("example_app", "intmodel").unwrap();
    assert_eq!(model.indexes.len(), 1);
    assert_eq!(model.indexes[0].name(), "int_field_idx");
}

#[test]
fn add_duplicate_index_conflicts() {
    let mut state = project_state();
    state
        .add_index("example_app", "IntModel", int_field_idx())
        .unwrap();

    let err = state
        .add_index("example_app", "IntModel", int_field_idx())
        .unwrap_err();

    assert!(err.is_state_conflict());
    assert_eq!(
        err.to_string(),
        "logical state conflict: index `int_field_idx` already exists on model `example_app.intmodel`"
    );

    // The failed add leaves the state untouched
    let model = state.get_model("example_app", "IntModel").unwrap();
    assert_eq!(model.indexes.len(), 1);
}

#[test]
fn remove_index_returns_definition() {
    let mut state = project_state();
    state
        .add_index("example_app", "IntModel", int_field_idx())
        .unwrap();

    let removed = state
        .remove_index("example_app", "IntModel", "int_field_idx")
        .unwrap();

    assert_eq!(removed, int_field_idx());
    assert!(state
        .get_model("example_app", "IntModel")
        .unwrap()
        .indexes
        .is_empty());
}

#[test]
fn remove_missing_index_conflicts() {
    let mut state = project_state();
    let err = state
        .remove_index("example_app", "IntModel", "int_field_idx")
        .unwrap_err();
    assert!(err.is_state_conflict());
}

#[test]
fn unknown_model_conflicts() {
    let mut state = project_state();
    let err = state
        .add_index("example_app", "CharModel", int_field_idx())
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "logical state conflict: model `example_app.charmodel` does not exist"
    );
}

#[test]
fn clones_are_independent() {
    let before = project_state();
    let mut after = before.clone();
    after
        .add_index("example_app", "IntModel", int_field_idx())
        .unwrap();

    assert_ne!(before, after);
    assert!(before
        .get_model("example_app", "IntModel")
        .unwrap()
        .indexes
        .is_empty());
}

#[test]
fn add_index_on_undeclared_field_conflicts() {
    let mut state = project_state();
    let ghost = Index::builder("ghost_idx").fields(["ghost"]).build().unwrap();

    let err = state
        .add_index("example_app", "IntModel", ghost)
        .unwrap_err();

    assert!(err.is_state_conflict());
    assert_eq!(
        err.to_string(),
        "logical state conflict: field `ghost` does not exist on model `example_app.intmodel`"
    );
    assert!(state.model("example_app", "IntModel").unwrap().indexes.is_empty());
}
