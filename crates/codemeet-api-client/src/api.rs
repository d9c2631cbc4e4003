//! Event store backed by the REST API.

use async_trait::async_trait;
use codemeet_core::{BackendError, EventRecord, EventStore, NewEvent};

use crate::BackendClient;

#[async_trait]
impl EventStore for BackendClient {
    async fn insert_event(&self, event: &NewEvent) -> Result<EventRecord, BackendError> {
        // The backend takes a batch and returns every stored row
        let rows: Vec<EventRecord> = self.post_json(std::slice::from_ref(event)).await?;

        let record = rows
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::transport("Insert returned no rows"))?;

        tracing::debug!(event_id = %record.id, table = %self.table(), "Event row stored");
        Ok(record)
    }

    async fn list_events(&self) -> Result<Vec<EventRecord>, BackendError> {
        self.get(&[
            ("select", "*".to_string()),
            ("order", "date.asc".to_string()),
        ])
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use codemeet_core::BackendErrorKind;
    use mockito::Matcher;
    use uuid::Uuid;

    const ROW: &str = r#"{
        "id": "6f1c2d7e-3f0a-4f4b-9d55-0b8f3c1e2a10",
        "title": "Rust Meetup",
        "description": null,
        "date": "2030-07-01T19:00:00+00:00",
        "location": "São Paulo",
        "max_attendees": 50,
        "organizer_name": "Ana",
        "organizer_email": "ana@exemplo.com",
        "image_url": null,
        "tags": ["Rust"],
        "user_id": "0b6a1f0e-6a55-4f7e-9a3b-2f1d6c8e4a21",
        "created_at": "2030-06-15T12:00:00+00:00"
    }"#;

    fn client(url: String) -> BackendClient {
        BackendClient::new(url, "anon-key".to_string(), "events".to_string()).unwrap()
    }

    fn new_event() -> NewEvent {
        NewEvent {
            title: "Rust Meetup".to_string(),
            description: None,
            date: Utc.with_ymd_and_hms(2030, 7, 1, 19, 0, 0).unwrap(),
            location: "São Paulo".to_string(),
            max_attendees: Some(50),
            organizer_name: "Ana".to_string(),
            organizer_email: "ana@exemplo.com".to_string(),
            image_url: None,
            tags: Some(vec!["Rust".to_string()]),
            user_id: Uuid::parse_str("0b6a1f0e-6a55-4f7e-9a3b-2f1d6c8e4a21").unwrap(),
        }
    }

    #[tokio::test]
    async fn test_insert_event_sends_auth_and_returns_row() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/v1/events")
            .match_header("apikey", "anon-key")
            .match_header("authorization", "Bearer anon-key")
            .match_header("prefer", "return=representation")
            .match_body(Matcher::PartialJsonString(
                r#"[{"title": "Rust Meetup", "max_attendees": 50}]"#.to_string(),
            ))
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(format!("[{}]", ROW))
            .create_async()
            .await;

        let record = client(server.url()).insert_event(&new_event()).await.unwrap();
        assert_eq!(record.title, "Rust Meetup");
        assert_eq!(record.max_attendees, Some(50));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_insert_event_runs_as_signed_in_user() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/rest/v1/events")
            .match_header("apikey", "anon-key")
            .match_header("authorization", "Bearer user-jwt")
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body(format!("[{}]", ROW))
            .create_async()
            .await;

        let record = client(server.url())
            .with_access_token("user-jwt")
            .insert_event(&new_event())
            .await
            .unwrap();
        assert_eq!(record.user_id, Some(new_event().user_id));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_insert_event_maps_backend_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/rest/v1/events")
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{"code":"23502","details":null,"hint":null,"message":"null value in column \"location\""}"#,
            )
            .create_async()
            .await;

        let err = client(server.url())
            .insert_event(&new_event())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), BackendErrorKind::RequiredFieldMissing);
        assert_eq!(err.status, Some(400));
    }

    #[tokio::test]
    async fn test_insert_event_without_rows() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/rest/v1/events")
            .with_status(201)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let err = client(server.url())
            .insert_event(&new_event())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), BackendErrorKind::Other);
    }

    #[tokio::test]
    async fn test_list_events_orders_by_date() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/rest/v1/events")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("select".into(), "*".into()),
                Matcher::UrlEncoded("order".into(), "date.asc".into()),
            ]))
            .match_header("apikey", "anon-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!("[{}]", ROW))
            .create_async()
            .await;

        let events = client(server.url()).list_events().await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].tags.as_deref(), Some(&["Rust".to_string()][..]));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_transport_failure_has_no_code() {
        // Nothing listens on port 9 of the loopback interface
        let err = client("http://127.0.0.1:9".to_string())
            .list_events()
            .await
            .unwrap_err();
        assert_eq!(err.code, None);
        assert_eq!(err.status, None);
        assert_eq!(err.kind(), BackendErrorKind::Other);
    }
}
