use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use todo_app::config::TodoConfig;
use todo_app::middleware::LoggingMiddleware;
use todo_app::migrations::Migrator;
use web::expect;
use web::testing::{TestClient, TestDatabase};
use web::{Server, ServerConfig};

const BASE: &str = "/api/v1/todos";

async fn client() -> TestClient {
    let db = TestDatabase::fresh::<Migrator>().await.unwrap();
    let router = todo_app::build_router(db.conn(), TodoConfig::default());
    let server = Server::new(router, ServerConfig::builder().build()).middleware(LoggingMiddleware);
    TestClient::new(server)
}

async fn create(client: &TestClient, body: Value) -> Value {
    let res = client.post(&format!("{BASE}/create"), &body).await;
    assert_eq!(res.status, 201, "create failed: {}", res.text);
    res.body
}

fn titles(list: &Value) -> Vec<&str> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect()
}

// --- create ---

#[tokio::test]
async fn create_returns_201_with_generated_id() {
    let client = client().await;

    let todo = create(
        &client,
        json!({"title": "Buy milk", "description": "2% fat", "completed": false}),
    )
    .await;

    expect!(todo["id"].as_i64().unwrap()).to_be_greater_than(0);
    assert_eq!(todo["title"], "Buy milk");
    assert_eq!(todo["description"], "2% fat");
    assert_eq!(todo["completed"], false);

    let all = client.get(&format!("{BASE}/all")).await;
    assert_eq!(all.status, 200);
    assert_eq!(all.body, json!([todo]));
}

#[tokio::test]
async fn create_ignores_client_id_and_defaults_completed() {
    let client = client().await;

    let todo = create(&client, json!({"id": 999, "title": "  Water plants  "})).await;

    expect!(todo["id"].as_i64().unwrap()).to_not_equal(999);
    assert_eq!(todo["title"], "Water plants");
    assert_eq!(todo["description"], Value::Null);
    assert_eq!(todo["completed"], false);
}

#[tokio::test]
async fn create_accepts_form_bodies() {
    let client = client().await;

    let res = client
        .raw(
            "POST",
            &format!("{BASE}/create"),
            "application/x-www-form-urlencoded",
            "title=Call+mom&completed=true",
        )
        .await;

    assert_eq!(res.status, 201);
    assert_eq!(res.body["title"], "Call mom");
    assert_eq!(res.body["completed"], true);
}

#[tokio::test]
async fn create_with_empty_title_returns_422() {
    let client = client().await;

    let res = client.post(&format!("{BASE}/create"), &json!({"title": ""})).await;
    assert_eq!(res.status, 422);
    assert_eq!(res.body["errors"]["title"][0], "The title field is required.");

    let res = client.post(&format!("{BASE}/create"), &json!({})).await;
    assert_eq!(res.status, 422);

    let all = client.get(&format!("{BASE}/all")).await;
    assert_eq!(all.body, json!([]));
}

#[tokio::test]
async fn create_with_short_description_returns_422() {
    let client = client().await;

    let res = client
        .post(
            &format!("{BASE}/create"),
            &json!({"title": "Buy milk", "description": "2%"}),
        )
        .await;

    assert_eq!(res.status, 422);
    expect!(res.body["errors"]["description"].is_array()).to_be_true();
}

#[tokio::test]
async fn malformed_json_returns_400() {
    let client = client().await;

    let res = client
        .raw("POST", &format!("{BASE}/create"), "application/json", "{\"title\":")
        .await;
    assert_eq!(res.status, 400);
    expect!(res.body["error"].as_str().unwrap()).to_contain("Invalid request body");
}

// --- read ---

#[tokio::test]
async fn list_is_empty_on_a_fresh_database() {
    let client = client().await;

    let res = client.get(&format!("{BASE}/all")).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body, json!([]));
}

#[tokio::test]
async fn show_returns_the_stored_todo() {
    let client = client().await;
    let todo = create(&client, json!({"title": "Read book"})).await;

    let res = client.get(&format!("{BASE}/{}", todo["id"])).await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body, todo);

    let res = client.get(&format!("{BASE}/424242")).await;
    assert_eq!(res.status, 404);
    assert_eq!(res.body, json!({"error": "Todo 424242 not found"}));

    let res = client.get(&format!("{BASE}/abc")).await;
    assert_eq!(res.status, 400);
}

// --- pagination ---

#[tokio::test]
async fn pagination_defaults_to_first_five_sorted_by_completed() {
    let client = client().await;
    for i in 0..7 {
        create(
            &client,
            json!({"title": format!("todo {i}"), "completed": i % 2 == 0}),
        )
        .await;
    }

    let res = client.get(&format!("{BASE}/all/pagination")).await;
    assert_eq!(res.status, 200);

    let page = &res.body;
    assert_eq!(page["number"], 0);
    assert_eq!(page["size"], 5);
    assert_eq!(page["totalElements"], 7);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["numberOfElements"], 5);
    assert_eq!(page["first"], true);
    assert_eq!(page["last"], false);
    assert_eq!(
        titles(&page["content"]),
        vec!["todo 1", "todo 3", "todo 5", "todo 0", "todo 2"]
    );
}

#[tokio::test]
async fn every_sort_field_reports_total_elements() {
    let client = client().await;
    for title in ["b", "a", "c"] {
        create(&client, json!({"title": title})).await;
    }

    for sort in ["id", "title", "description", "completed"] {
        let res = client
            .get(&format!("{BASE}/all/pagination?page=0&size=5&sortBy={sort}"))
            .await;
        assert_eq!(res.status, 200, "sortBy={sort}");
        assert_eq!(res.body["totalElements"], 3, "sortBy={sort}");
        expect!(res.body["content"].as_array().unwrap().len()).to_be_less_than_or_equal(5);
    }

    let res = client
        .get(&format!("{BASE}/all/pagination?sortBy=title"))
        .await;
    assert_eq!(titles(&res.body["content"]), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn page_past_the_end_is_empty() {
    let client = client().await;
    create(&client, json!({"title": "only"})).await;

    let res = client
        .get(&format!("{BASE}/all/pagination?page=3&size=5"))
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["content"], json!([]));
    assert_eq!(res.body["empty"], true);
    assert_eq!(res.body["totalElements"], 1);
}

#[tokio::test]
async fn bad_pagination_arguments_return_400() {
    let client = client().await;

    let res = client
        .get(&format!("{BASE}/all/pagination?sortBy=priority"))
        .await;
    assert_eq!(res.status, 400);
    assert_eq!(res.body["error"], "Invalid sort field 'priority'");

    let res = client.get(&format!("{BASE}/all/pagination?size=0")).await;
    assert_eq!(res.status, 400);

    let res = client.get(&format!("{BASE}/all/pagination?page=-1")).await;
    assert_eq!(res.status, 400);
}

#[tokio::test]
async fn huge_page_index_is_rejected_with_400() {
    let client = client().await;
    create(&client, json!({"title": "only"})).await;

    for page in [u64::MAX, i64::MAX as u64] {
        let res = client
            .get(&format!("{BASE}/all/pagination?page={page}&size=5"))
            .await;
        assert_eq!(res.status, 400, "page={page}");
        assert_eq!(
            res.body["error"],
            format!("Page index {page} is out of range")
        );
    }

    let res = client
        .get(&format!("{BASE}/all/pagination?page=1000000&size=5"))
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(res.body["empty"], true);
}

// --- update ---

#[tokio::test]
async fn put_overwrites_every_field() {
    let client = client().await;
    let todo = create(
        &client,
        json!({"title": "Buy milk", "description": "2% fat", "completed": true}),
    )
    .await;
    let id = todo["id"].as_i64().unwrap();

    let res = client
        .put(&format!("{BASE}/{id}"), &json!({"title": "Buy oat milk"}))
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(
        res.body,
        json!({"id": id, "title": "Buy oat milk", "description": null, "completed": false})
    );

    let stored = client.get(&format!("{BASE}/{id}")).await;
    assert_eq!(stored.body, res.body);
}

#[tokio::test]
async fn put_on_missing_id_returns_404_and_creates_nothing() {
    let client = client().await;

    let res = client
        .put(&format!("{BASE}/77"), &json!({"title": "Ghost"}))
        .await;
    assert_eq!(res.status, 404);

    let all = client.get(&format!("{BASE}/all")).await;
    assert_eq!(all.body, json!([]));
}

#[tokio::test]
async fn put_with_invalid_body_returns_422() {
    let client = client().await;
    let todo = create(&client, json!({"title": "Buy milk"})).await;

    let res = client
        .put(&format!("{BASE}/{}", todo["id"]), &json!({"title": "   "}))
        .await;
    assert_eq!(res.status, 422);
}

#[tokio::test]
async fn status_patch_changes_only_completed() {
    let client = client().await;
    let todo = create(
        &client,
        json!({"title": "Buy milk", "description": "2% fat"}),
    )
    .await;
    let id = todo["id"].as_i64().unwrap();

    let res = client
        .patch(&format!("{BASE}/{id}/status"), &json!({"completed": true}))
        .await;
    assert_eq!(res.status, 200);
    assert_eq!(
        res.body,
        json!({"id": id, "title": "Buy milk", "description": "2% fat", "completed": true})
    );

    let res = client
        .patch(&format!("{BASE}/{id}/status"), &json!({}))
        .await;
    assert_eq!(res.status, 422);

    let res = client
        .patch(&format!("{BASE}/9999/status"), &json!({"completed": true}))
        .await;
    assert_eq!(res.status, 404);
}

// --- delete ---

#[tokio::test]
async fn delete_removes_the_todo() {
    let client = client().await;
    let keep = create(&client, json!({"title": "keep"})).await;
    let gone = create(&client, json!({"title": "gone"})).await;

    let res = client.delete(&format!("{BASE}/{}", gone["id"])).await;
    assert_eq!(res.status, 200);

    let res = client.get(&format!("{BASE}/{}", gone["id"])).await;
    assert_eq!(res.status, 404);

    let all = client.get(&format!("{BASE}/all")).await;
    assert_eq!(all.body, json!([keep]));
}

#[tokio::test]
async fn delete_missing_returns_404() {
    let client = client().await;

    let res = client.delete(&format!("{BASE}/5")).await;
    assert_eq!(res.status, 404);
    assert_eq!(res.body["error"], "Todo 5 not found");
}

// --- routing ---

#[tokio::test]
async fn unknown_routes_and_methods_are_404() {
    let client = client().await;

    let res = client.get("/api/v1/users").await;
    assert_eq!(res.status, 404);
    assert_eq!(res.text, "404 Not Found");

    let res = client.delete(&format!("{BASE}/all/pagination")).await;
    assert_eq!(res.status, 404);
}
