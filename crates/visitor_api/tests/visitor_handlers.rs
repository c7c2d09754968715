use serde_json::Value;
use uuid::Uuid;
use visitor_api::{ApiResponse, VisitorApi};
use visitor_core::db::open_db_in_memory;
use visitor_core::{MemoryKvStore, SqliteKvStore, Visitor, VisitorStore};

fn json(response: &ApiResponse) -> Value {
    serde_json::from_str(&response.body).unwrap()
}

fn record(id: Uuid, first: &str, family: &str) -> String {
    serde_json::json!({ "id": id, "firstName": first, "familyName": family }).to_string()
}

#[test]
fn post_then_get_returns_records_sorted_by_family_name() {
    let conn = open_db_in_memory().unwrap();
    let api = VisitorApi::from_repo(VisitorStore::new(SqliteKvStore::try_new(&conn).unwrap()));

    for (first, family) in [("Diego", "Zorro"), ("Anna", "Abbot"), ("Rui", "Mendes")] {
        let response = api.dispatch("POST", &record(Uuid::new_v4(), first, family));
        assert_eq!(response.status, 200, "{}", response.body);
        assert_eq!(json(&response)["familyName"], family);
    }

    let listed = json(&api.dispatch("get", ""));
    let families: Vec<_> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["familyName"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(families, vec!["Abbot", "Mendes", "Zorro"]);
}

#[test]
fn put_upserts_and_echoes_record() {
    let kv = MemoryKvStore::new();
    let api = VisitorApi::from_repo(VisitorStore::new(&kv));
    let id = Uuid::new_v4();

    api.post(&record(id, "Ryan", "Dahl"));
    let updated = api.put(&record(id, "Ryan", "van Dahl"));
    assert_eq!(updated.status, 200);

    let decoded: Visitor = serde_json::from_str(&updated.body).unwrap();
    assert_eq!(decoded.id, id);
    assert_eq!(decoded.family_name, "van Dahl");

    let listed = json(&api.get());
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[test]
fn delete_takes_bare_id_and_echoes_it() {
    let kv = MemoryKvStore::new();
    let api = VisitorApi::from_repo(VisitorStore::new(&kv));
    let id = Uuid::new_v4();
    api.post(&record(id, "Ada", "Lovelace"));

    let deleted = api.delete(&format!("\"{id}\""));
    assert_eq!(deleted.status, 200);
    assert_eq!(json(&deleted), Value::String(id.to_string()));
    assert_eq!(api.get().body, "[]");
}

#[test]
fn invalid_payloads_are_client_errors() {
    let kv = MemoryKvStore::new();
    let api = VisitorApi::from_repo(VisitorStore::new(&kv));

    let malformed = api.post("{ not json");
    assert_eq!(malformed.status, 400);
    assert_eq!(json(&malformed)["error"], "malformed_body");

    let bad_chars = api.put(&record(Uuid::new_v4(), "R2", "D2"));
    assert_eq!(bad_chars.status, 400);
    assert_eq!(json(&bad_chars)["message"], "Invalid characters in name.");

    let empty_family = api.post(&record(Uuid::new_v4(), "Ryan", " "));
    assert_eq!(empty_family.status, 400);
    assert_eq!(json(&empty_family)["error"], "invalid_record");

    assert_eq!(api.get().body, "[]");
}

#[test]
fn submit_entry_reports_specific_correction_prompts() {
    let kv = MemoryKvStore::new();
    let api = VisitorApi::from_repo(VisitorStore::new(&kv));

    let single = api.submit_entry("Vincent");
    assert_eq!(single.status, 400);
    assert_eq!(json(&single)["error"], "need_two_names");

    let symbols = api.submit_entry("Vincent #1");
    assert_eq!(json(&symbols)["error"], "invalid_characters");

    let created = api.submit_entry("Ludwig van Beethoven");
    assert_eq!(created.status, 200);
    assert_eq!(json(&created)["familyName"], "van Beethoven");
}

#[test]
fn unknown_method_is_rejected() {
    let kv = MemoryKvStore::new();
    let api = VisitorApi::from_repo(VisitorStore::new(&kv));

    let response = api.dispatch("PATCH", "{}");
    assert_eq!(response.status, 405);
}
