//! Response fixtures

use serde_json::{json, Value};

pub const CREATED_AT: &str = "2024-05-01T10:00:00";

pub fn profile_json(id: i64, name: Option<&str>, photo: Option<&str>) -> Value {
    json!({
        "id": id,
        "email": format!("user{id}@example.com"),
        "name": name,
        "bio": null,
        "profile_photo_filename": photo,
        "created_at": CREATED_AT,
    })
}

pub fn post_json(id: i64, title: &str, owner_id: i64, image: Option<&str>, showcased: bool) -> Value {
    json!({
        "id": id,
        "title": title,
        "text_content": format!("About {title}"),
        "image_filename": image,
        "owner_id": owner_id,
        "owner": profile_json(owner_id, Some("Potter"), None),
        "created_at": CREATED_AT,
        "updated_at": null,
        "like_count": 0,
        "is_showcased": showcased,
    })
}

pub fn token_json(token: &str) -> Value {
    json!({ "access_token": token, "token_type": "bearer" })
}
