//! A shared conformance suite run against both `SectionStore`
//! implementations: `replace_detected_sections` must never drop marker
//! rows, regardless of backend.

use chrono::Utc;
use scrollkeep_store::{
    InMemorySectionStore, JsonFileSectionStore, NewSession, Section, SectionStore, SectionType,
};
use uuid::Uuid;

fn new_session() -> NewSession {
    NewSession {
        filename: "conformance.cast".into(),
        filepath: "/tmp/conformance.cast".into(),
        size_bytes: 4096,
        marker_count: 1,
        uploaded_at: Utc::now(),
    }
}

fn marker_section(session_id: uuid::Uuid, start: usize, label: &str) -> Section {
    Section {
        id: Uuid::new_v4(),
        session_id,
        section_type: SectionType::Marker,
        start_event: start,
        end_event: None,
        label: label.into(),
        snapshot: None,
        created_at: Utc::now(),
    }
}

fn detected_section(session_id: uuid::Uuid, start: usize, end: usize) -> Section {
    Section {
        id: Uuid::new_v4(),
        session_id,
        section_type: SectionType::Detected,
        start_event: start,
        end_event: Some(end),
        label: "Section 1".into(),
        snapshot: None,
        created_at: Utc::now(),
    }
}

fn replace_detected_never_drops_markers(store: &dyn SectionStore) {
    let id = store.create_session(new_session()).unwrap();
    store.insert_marker_sections(id, vec![marker_section(id, 100, "checkpoint")]).unwrap();
    store.replace_detected_sections(id, vec![detected_section(id, 0, 100)]).unwrap();
    store
        .replace_detected_sections(id, vec![detected_section(id, 0, 50), detected_section(id, 50, 100)])
        .unwrap();

    let sections = store.list_sections(id).unwrap();
    let markers: Vec<&Section> = sections.iter().filter(|s| s.section_type == SectionType::Marker).collect();
    let detected: Vec<&Section> = sections.iter().filter(|s| s.section_type == SectionType::Detected).collect();
    assert_eq!(markers.len(), 1, "marker section must survive repeated replace-detected calls");
    assert_eq!(detected.len(), 2);
}

fn replace_all_sections_swaps_markers_and_detected_together(store: &dyn SectionStore) {
    let id = store.create_session(new_session()).unwrap();
    store.insert_marker_sections(id, vec![marker_section(id, 100, "stale")]).unwrap();
    store.replace_detected_sections(id, vec![detected_section(id, 0, 100)]).unwrap();

    store
        .replace_all_sections(
            id,
            vec![marker_section(id, 50, "checkpoint"), detected_section(id, 0, 50)],
        )
        .unwrap();

    let sections = store.list_sections(id).unwrap();
    assert_eq!(sections.len(), 2, "replace_all_sections must drop every prior section, marker included");
    let markers: Vec<&Section> = sections.iter().filter(|s| s.section_type == SectionType::Marker).collect();
    assert_eq!(markers.len(), 1);
    assert_eq!(markers[0].label, "checkpoint");
}

fn delete_cascades_to_sections(store: &dyn SectionStore) {
    let id = store.create_session(new_session()).unwrap();
    store.insert_marker_sections(id, vec![marker_section(id, 0, "a")]).unwrap();
    store.delete_session(id).unwrap();
    assert!(store.get_session(id).unwrap().is_none());
}

#[test]
fn in_memory_conformance() {
    let store = InMemorySectionStore::new();
    replace_detected_never_drops_markers(&store);
    let store = InMemorySectionStore::new();
    replace_all_sections_swaps_markers_and_detected_together(&store);
    let store = InMemorySectionStore::new();
    delete_cascades_to_sections(&store);
}

#[test]
fn json_file_conformance() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileSectionStore::new(dir.path());
    replace_detected_never_drops_markers(&store);

    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileSectionStore::new(dir.path());
    replace_all_sections_swaps_markers_and_detected_together(&store);

    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileSectionStore::new(dir.path());
    delete_cascades_to_sections(&store);
}
