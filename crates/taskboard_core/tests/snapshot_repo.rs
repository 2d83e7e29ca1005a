use serde_json::{json, Value};
use taskboard_core::store::open_store_in_memory;
use taskboard_core::{
    BoardState, KeyValueStore, KvSnapshotRepository, MemoryStore, NewTodo, Priority, Project,
    RepoError, SnapshotRepository, TodoPatch, DEFAULT_PROJECT_NAME, DEFAULT_STORAGE_KEY,
};

fn sample_state() -> BoardState {
    let mut work = Project::create("Work").unwrap();
    work.add_todo(
        NewTodo::new("Ship spec", Priority::High)
            .with_description("final pass")
            .with_due_date("2025-01-01"),
    )
    .unwrap();
    let done = work
        .add_todo(NewTodo::new("Book travel", Priority::Low))
        .unwrap()
        .id()
        .clone();
    work.get_todo_by_id_mut(&done).unwrap().toggle_complete();

    let mut home = Project::create("Home").unwrap();
    home.add_todo(NewTodo::new("Water plants", Priority::Medium).with_due_date("not a date"))
        .unwrap();

    let home_id = home.id().clone();
    BoardState::new(vec![work, home], Some(home_id))
}

#[test]
fn fresh_storage_loads_selected_default_project() {
    let store = MemoryStore::new();
    let repo = KvSnapshotRepository::with_default_key(store.clone());

    let state = repo.load().unwrap();

    assert_eq!(state.projects().len(), 1);
    let project = state.current_project().unwrap();
    assert_eq!(project.name(), DEFAULT_PROJECT_NAME);
    assert!(project.todos().is_empty());
    assert!(store.is_empty(), "load must not write");
}

#[test]
fn save_then_load_preserves_everything() {
    let repo = KvSnapshotRepository::with_default_key(MemoryStore::new());
    let state = sample_state();

    repo.save(&state).unwrap();
    let restored = repo.load().unwrap();

    assert_eq!(restored, state);
}

#[test]
fn round_trip_holds_for_states_without_selection_or_projects() {
    let repo = KvSnapshotRepository::with_default_key(MemoryStore::new());

    let unselected = BoardState::new(sample_state().projects().to_vec(), None);
    repo.save(&unselected).unwrap();
    assert_eq!(repo.load().unwrap(), unselected);

    let empty = BoardState::default();
    repo.save(&empty).unwrap();
    let restored = repo.load().unwrap();
    assert!(restored.projects().is_empty());
    assert_eq!(restored.current_project_id(), None);
}

#[test]
fn restored_entities_keep_their_behavior() {
    let repo = KvSnapshotRepository::with_default_key(MemoryStore::new());
    repo.save(&sample_state()).unwrap();

    let restored = repo.load().unwrap();
    let mut work = restored.projects()[0].clone();
    let todo_id = work.todos()[0].id().clone();

    work.get_todo_by_id_mut(&todo_id).unwrap().toggle_complete();
    work.get_todo_by_id_mut(&todo_id)
        .unwrap()
        .update_details(TodoPatch {
            priority: Some(Priority::Low),
            ..TodoPatch::default()
        })
        .unwrap();
    let owner = work
        .add_todo(NewTodo::new("new", Priority::Medium))
        .unwrap()
        .project_id()
        .clone();

    assert_eq!(&owner, work.id());
    assert!(work.get_todo_by_id(&todo_id).unwrap().is_completed());
}

#[test]
fn saved_blob_matches_documented_layout() {
    let store = MemoryStore::new();
    let repo = KvSnapshotRepository::with_default_key(store.clone());
    let state = sample_state();
    repo.save(&state).unwrap();

    let blob = store.get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
    let value: Value = serde_json::from_str(&blob).unwrap();

    let work = &state.projects()[0];
    let first = &work.todos()[0];
    assert_eq!(
        value["currentProjectId"],
        state.current_project_id().unwrap().to_string()
    );
    assert_eq!(value["projects"][0]["id"], work.id().to_string());
    assert_eq!(value["projects"][0]["name"], "Work");
    let todo = &value["projects"][0]["todos"][0];
    assert_eq!(todo["id"], first.id().to_string());
    assert_eq!(todo["title"], "Ship spec");
    assert_eq!(todo["description"], "final pass");
    assert_eq!(todo["dueDate"], "2025-01-01");
    assert_eq!(todo["priority"], "High");
    assert_eq!(todo["completed"], false);
    assert_eq!(todo["projectId"], work.id().to_string());
    assert_eq!(value["projects"][0]["todos"][1]["description"], Value::Null);
}

#[test]
fn malformed_blob_fails_loudly_and_is_left_untouched() {
    let store = MemoryStore::with_entry(DEFAULT_STORAGE_KEY, "{not json");
    let repo = KvSnapshotRepository::with_default_key(store.clone());

    let err = repo.load().unwrap_err();

    assert!(matches!(err, RepoError::Malformed(_)), "unexpected error: {err}");
    assert_eq!(
        store.get(DEFAULT_STORAGE_KEY).unwrap().as_deref(),
        Some("{not json")
    );
}

#[test]
fn invalid_entities_in_blob_are_rejected() {
    let project_id = "11111111-2222-4333-8444-555555555555";
    let blob = json!({
        "projects": [{
            "id": project_id,
            "name": "Work",
            "todos": [{
                "id": "aaaaaaaa-2222-4333-8444-555555555555",
                "title": "   ",
                "description": null,
                "dueDate": null,
                "priority": "High",
                "completed": false,
                "projectId": project_id
            }]
        }],
        "currentProjectId": project_id
    })
    .to_string();
    let repo = KvSnapshotRepository::with_default_key(MemoryStore::with_entry(
        DEFAULT_STORAGE_KEY,
        blob,
    ));

    assert!(matches!(repo.load().unwrap_err(), RepoError::Validation(_)));
}

#[test]
fn duplicate_project_ids_are_rejected() {
    let project_id = "11111111-2222-4333-8444-555555555555";
    let blob = json!({
        "projects": [
            { "id": project_id, "name": "A", "todos": [] },
            { "id": project_id, "name": "B", "todos": [] }
        ],
        "currentProjectId": null
    })
    .to_string();
    let repo = KvSnapshotRepository::with_default_key(MemoryStore::with_entry(
        DEFAULT_STORAGE_KEY,
        blob,
    ));

    assert!(matches!(repo.load().unwrap_err(), RepoError::InvalidData(_)));
}

#[test]
fn dangling_selection_loads_as_no_selection() {
    let blob = json!({
        "projects": [{ "id": "11111111-2222-4333-8444-555555555555", "name": "Work", "todos": [] }],
        "currentProjectId": "22222222-2222-4333-8444-555555555555"
    })
    .to_string();
    let repo = KvSnapshotRepository::with_default_key(MemoryStore::with_entry(
        DEFAULT_STORAGE_KEY,
        blob,
    ));

    let state = repo.load().unwrap();
    assert_eq!(state.projects().len(), 1);
    assert_eq!(state.current_project_id(), None);
}

#[test]
fn timestamp_ids_load_and_survive_a_resave() {
    let blob = json!({
        "projects": [{
            "id": "1700000000000",
            "name": "Work",
            "todos": [{
                "id": "1700000000123",
                "title": "Ship spec",
                "description": "final pass",
                "dueDate": "2025-01-01",
                "priority": "High",
                "completed": false,
                "projectId": "1700000000000"
            }]
        }],
        "currentProjectId": "1700000000000"
    })
    .to_string();
    let store = MemoryStore::with_entry(DEFAULT_STORAGE_KEY, blob);
    let repo = KvSnapshotRepository::with_default_key(store.clone());

    let state = repo.load().unwrap();
    let work = state.current_project().unwrap();
    assert_eq!(work.id().as_str(), "1700000000000");
    assert_eq!(work.todos()[0].id().as_str(), "1700000000123");

    repo.save(&state).unwrap();
    let value: Value = serde_json::from_str(&store.get(DEFAULT_STORAGE_KEY).unwrap().unwrap())
        .unwrap();
    assert_eq!(value["projects"][0]["todos"][0]["id"], "1700000000123");
    assert_eq!(repo.load().unwrap(), state);
}

#[test]
fn bare_project_array_from_earlier_page_loads() {
    let blob = json!([{
        "id": "project-1700000000000",
        "name": "Default Project",
        "todos": [
            {
                "id": "todo-1700000000100",
                "title": "Buy milk",
                "description": "",
                "dueDate": "2024-01-05",
                "priority": "medium",
                "complete": true
            },
            {
                "id": "todo-1700000000200",
                "title": "Call mum",
                "description": "Sunday",
                "dueDate": "",
                "priority": "high",
                "complete": false
            }
        ]
    }])
    .to_string();
    let store = MemoryStore::with_entry(DEFAULT_STORAGE_KEY, blob.clone());
    let repo = KvSnapshotRepository::with_default_key(store.clone());

    let state = repo.load().unwrap();

    let project = state.current_project().unwrap();
    assert_eq!(project.id().as_str(), "project-1700000000000");
    let todos = project.todos();
    assert_eq!(todos.len(), 2);
    assert!(todos[0].is_completed());
    assert_eq!(todos[0].priority(), Priority::Medium);
    assert_eq!(todos[1].description(), Some("Sunday"));
    assert_eq!(todos[1].due_date(), None);
    assert!(todos.iter().all(|todo| todo.project_id() == project.id()));
    assert_eq!(store.get(DEFAULT_STORAGE_KEY).unwrap(), Some(blob), "load must not write");
}

#[test]
fn custom_key_isolates_boards() {
    let store = MemoryStore::new();
    let first = KvSnapshotRepository::new(store.clone(), "board-a");
    let second = KvSnapshotRepository::new(store.clone(), "board-b");

    first.save(&sample_state()).unwrap();

    assert_eq!(second.load().unwrap().projects()[0].name(), DEFAULT_PROJECT_NAME);
    assert_eq!(first.key(), "board-a");
    assert_eq!(store.len(), 1);
}

#[test]
fn sqlite_store_round_trips_snapshot() {
    let repo = KvSnapshotRepository::with_default_key(open_store_in_memory().unwrap());
    let state = sample_state();

    repo.save(&state).unwrap();

    assert_eq!(repo.load().unwrap(), state);
}
