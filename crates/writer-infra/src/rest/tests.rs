#[cfg(test)]
mod tests {
    use std::time::Duration;

    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use writer_core::domain::{NewPost, PostChanges};
    use writer_core::error::RepoError;
    use writer_core::ports::{BaseRepository, PostRepository};

    use crate::rest::{RestConfig, RestPostRepository};

    const KEY: &str = "test-anon-key";

    fn repo_for(server: &MockServer) -> RestPostRepository {
        let config = RestConfig {
            url: server.uri(),
            api_key: KEY.to_string(),
            table: "posts".to_string(),
            timeout: Duration::from_secs(2),
        };
        RestPostRepository::new(&config).unwrap()
    }

    fn row(id: serde_json::Value, title: &str, created_at: &str) -> serde_json::Value {
        json!({
            "id": id,
            "title": title,
            "content": "Body",
            "created_at": created_at,
            "user_id": "user-1"
        })
    }

    #[tokio::test]
    async fn test_list_orders_by_created_at_desc() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/posts"))
            .and(query_param("select", "*"))
            .and(query_param("order", "created_at.desc"))
            .and(header("apikey", KEY))
            .and(header("authorization", "Bearer test-anon-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                row(json!("b"), "Newer", "2024-05-02T10:00:00+00:00"),
                row(json!("a"), "Older", "2024-05-01T10:00:00.123456+00:00"),
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let posts = repo_for(&server).list_recent().await.unwrap();

        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].title, "Newer");
        assert_eq!(posts[1].id, "a");
    }

    #[tokio::test]
    async fn test_find_by_id_requests_single_object() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/posts"))
            .and(query_param("id", "eq.17"))
            .and(header("accept", "application/vnd.pgrst.object+json"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(row(json!(17), "Numeric key", "2024-05-01T10:00:00Z")),
            )
            .mount(&server)
            .await;

        let post = repo_for(&server)
            .find_by_id("17".to_string())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(post.id, "17");
        assert_eq!(post.title, "Numeric key");
    }

    #[tokio::test]
    async fn test_find_by_id_not_single_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/posts"))
            .respond_with(ResponseTemplate::new(406).set_body_json(json!({
                "code": "PGRST116",
                "message": "JSON object requested, multiple (or no) rows returned"
            })))
            .mount(&server)
            .await;

        let result = repo_for(&server).find_by_id("missing".to_string()).await;
        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn test_create_inserts_one_row_and_returns_it() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/posts"))
            .and(header("prefer", "return=representation"))
            .and(body_json(json!([
                { "title": "Hello", "content": "Body", "user_id": "user-1" }
            ])))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!([row(
                json!("c0ffee"),
                "Hello",
                "2024-05-03T09:30:00Z"
            )])))
            .expect(1)
            .mount(&server)
            .await;

        let created = repo_for(&server)
            .create(NewPost::new("Hello", "Body", "user-1"))
            .await
            .unwrap();

        assert_eq!(created.id, "c0ffee");
        assert_eq!(created.user_id, "user-1");
    }

    #[tokio::test]
    async fn test_update_sends_only_changed_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/posts"))
            .and(query_param("id", "eq.a"))
            .and(body_json(json!({ "title": "Renamed" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([row(
                json!("a"),
                "Renamed",
                "2024-05-01T10:00:00Z"
            )])))
            .mount(&server)
            .await;

        let changes = PostChanges {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };
        let updated = repo_for(&server)
            .update("a".to_string(), changes)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.title, "Renamed");
    }

    #[tokio::test]
    async fn test_update_without_matching_row_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/rest/v1/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .mount(&server)
            .await;

        let result = repo_for(&server)
            .update("zzz".to_string(), PostChanges::title_and_content("T", "C"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_removed_rows() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/rest/v1/posts"))
            .and(query_param("id", "eq.a"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([row(
                json!("a"),
                "Gone",
                "2024-05-01T10:00:00Z"
            )])))
            .mount(&server)
            .await;

        assert!(repo_for(&server).delete("a".to_string()).await.unwrap());
    }

    #[tokio::test]
    async fn test_server_error_maps_to_query_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/rest/v1/posts"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let result = repo_for(&server).list_recent().await;
        assert!(matches!(result, Err(RepoError::Query(_))));
    }

    #[tokio::test]
    async fn test_constraint_violation_code_maps_to_constraint_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/rest/v1/posts"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "code": "23502",
                "message": "null value in column \"user_id\" violates not-null constraint"
            })))
            .mount(&server)
            .await;

        let result = repo_for(&server)
            .create(NewPost::new("Hello", "Body", "user-1"))
            .await;

        match result {
            Err(RepoError::Constraint(message)) => assert!(message.contains("not-null")),
            other => panic!("expected constraint error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_backend_maps_to_connection_error() {
        let config = RestConfig {
            url: "http://127.0.0.1:9".to_string(),
            api_key: KEY.to_string(),
            table: "posts".to_string(),
            timeout: Duration::from_millis(500),
        };
        let repo = RestPostRepository::new(&config).unwrap();

        let result = repo.list_recent().await;
        assert!(matches!(result, Err(RepoError::Connection(_))));
    }
}
