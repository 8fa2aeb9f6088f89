use serde_json::Value;
use staypark_core::Fields;
use staypark_store::InMemoryDocumentStore;

pub fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {}", other),
    }
}

/// u1 (active) holds a hotel booking and a parking booking; u2 (inactive) holds none.
pub fn two_customer_store() -> InMemoryDocumentStore {
    InMemoryDocumentStore::new()
        .with_document("users/u1", fields(serde_json::json!({ "isActive": true })))
        .with_document("users/u2", fields(serde_json::json!({ "isActive": false })))
        .with_document(
            "users/u1/bookings/b1",
            fields(serde_json::json!({
                "type": "hotel",
                "status": "active",
                "totalPrice": 120,
                "createdAt": "2026-10-01T08:00:00Z",
                "roomNumber": "204"
            })),
        )
        .with_document(
            "users/u1/bookings/b2",
            fields(serde_json::json!({
                "type": "parking",
                "status": "completed",
                "totalPrice": 40,
                "createdAt": "2026-09-10T17:00:00Z",
                "parkingSpot": "P2-17"
            })),
        )
}
