use reqwest::{Method, StatusCode};

use crate::types::ManagerList;
use crate::{BlockingLibibClient, LibibClient, LibibError, Manager, ManagerRole};

const MANAGERS: &str = "managers";

/// Manager endpoints of the async client.
#[derive(Clone, Copy, Debug)]
pub struct Managers<'a> {
    client: &'a LibibClient,
}

impl<'a> Managers<'a> {
    pub(crate) fn new(client: &'a LibibClient) -> Self {
        Self { client }
    }

    /// Lists all managers, including the owner.
    pub async fn list(&self) -> Result<Vec<Manager>, LibibError> {
        let list: ManagerList = self
            .client
            .send(Method::GET, &[MANAGERS], &[])
            .await?
            .into_json()?;
        Ok(list.managers)
    }

    /// Fetches a single manager by email.
    pub async fn get_by_id(&self, email: &str) -> Result<Manager, LibibError> {
        self.client
            .send(Method::GET, &[MANAGERS, email], &[])
            .await?
            .into_json()
    }

    /// Creates a manager. The account must have an open manager seat.
    ///
    /// `role` must be `admin`, `manager` or `lender`; anything else fails with
    /// [`LibibError::InvalidRole`] before a request is sent.
    pub async fn create(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<(), LibibError> {
        let query = manager_query(first_name, last_name, email, password, role)?;
        self.client
            .send(Method::POST, &[MANAGERS], &query)
            .await?
            .expect_status(StatusCode::OK)?;
        Ok(())
    }

    /// Deletes a manager by email. Only `204 No Content` counts as success.
    ///
    /// The owner cannot be removed this way.
    pub async fn delete(&self, email: &str) -> Result<(), LibibError> {
        self.client
            .send(Method::DELETE, &[MANAGERS, email], &[])
            .await?
            .expect_status(StatusCode::NO_CONTENT)?;
        Ok(())
    }
}

/// Manager endpoints of the blocking client.
#[derive(Clone, Copy, Debug)]
pub struct BlockingManagers<'a> {
    client: &'a BlockingLibibClient,
}

impl<'a> BlockingManagers<'a> {
    pub(crate) fn new(client: &'a BlockingLibibClient) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<Vec<Manager>, LibibError> {
        let list: ManagerList = self
            .client
            .send(Method::GET, &[MANAGERS], &[])?
            .into_json()?;
        Ok(list.managers)
    }

    pub fn get_by_id(&self, email: &str) -> Result<Manager, LibibError> {
        self.client
            .send(Method::GET, &[MANAGERS, email], &[])?
            .into_json()
    }

    pub fn create(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<(), LibibError> {
        let query = manager_query(first_name, last_name, email, password, role)?;
        self.client
            .send(Method::POST, &[MANAGERS], &query)?
            .expect_status(StatusCode::OK)?;
        Ok(())
    }

    pub fn delete(&self, email: &str) -> Result<(), LibibError> {
        self.client
            .send(Method::DELETE, &[MANAGERS, email], &[])?
            .expect_status(StatusCode::NO_CONTENT)?;
        Ok(())
    }
}

fn manager_query(
    first_name: &str,
    last_name: &str,
    email: &str,
    password: &str,
    role: &str,
) -> Result<[(String, String); 5], LibibError> {
    let role: ManagerRole = role.parse()?;
    if !role.is_assignable() {
        return Err(LibibError::InvalidRole(role.to_string()));
    }

    Ok([
        ("first_name".to_owned(), first_name.to_owned()),
        ("last_name".to_owned(), last_name.to_owned()),
        ("email".to_owned(), email.to_owned()),
        ("password".to_owned(), password.to_owned()),
        ("role".to_owned(), role.to_string()),
    ])
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::{BlockingLibibClient, ClientConfig, LibibClient, LibibError, ManagerRole};

    fn config(server: &MockServer) -> ClientConfig {
        ClientConfig::new("test-key", "test-user").with_base_url(server.uri())
    }

    fn test_client(server: &MockServer) -> LibibClient {
        LibibClient::new(config(server)).expect("valid config")
    }

    #[tokio::test]
    async fn list_unwraps_managers_including_owner() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/managers"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "managers": [
                    {"first_name": "Larry", "last_name": "McMurtry", "email": "lonesome@example.com", "role": "owner"},
                    {"first_name": "Samwise", "last_name": "Gamgee", "email": "samthewise@example.com", "role": "lender"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let managers = test_client(&server).managers().list().await.expect("listing");

        assert_eq!(managers.len(), 2);
        assert_eq!(managers[0].role, ManagerRole::Owner);
        assert_eq!(managers[1].email, "samthewise@example.com");
    }

    #[tokio::test]
    async fn get_by_id_looks_up_by_email() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/managers/samthewise@example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "first_name": "Samwise",
                "last_name": "Gamgee",
                "email": "samthewise@example.com",
                "role": "admin"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let manager = test_client(&server)
            .managers()
            .get_by_id("samthewise@example.com")
            .await
            .expect("manager");
        assert_eq!(manager.role, ManagerRole::Admin);
    }

    #[tokio::test]
    async fn blank_email_is_rejected_without_request() {
        let server = MockServer::start().await;

        let error = test_client(&server)
            .managers()
            .get_by_id("")
            .await
            .expect_err("blank email");
        assert!(matches!(error, LibibError::InvalidPath(_)));

        let requests = server.received_requests().await.expect("recording enabled");
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn create_submits_manager_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/managers"))
            .and(query_param("first_name", "Anaïs"))
            .and(query_param("email", "angela@example.com"))
            .and(query_param("password", "s3cret"))
            .and(query_param("role", "manager"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        test_client(&server)
            .managers()
            .create("Anaïs", "Nin", "angela@example.com", "s3cret", "manager")
            .await
            .expect("created");
    }

    #[tokio::test]
    async fn create_rejects_owner_and_unknown_roles_locally() {
        let server = MockServer::start().await;
        let client = test_client(&server);

        for role in ["owner", "superuser", ""] {
            let error = client
                .managers()
                .create("Larry", "McMurtry", "lonesome@example.com", "pw", role)
                .await
                .expect_err("role is not assignable");
            assert!(matches!(&error, LibibError::InvalidRole(found) if found == role));
            assert_eq!(error.code(), Some(StatusCode::BAD_REQUEST));
        }

        let requests = server.received_requests().await.expect("recording enabled");
        assert!(requests.is_empty());
    }

    #[tokio::test]
    async fn create_surfaces_remote_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/managers"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({"error": "No manager seats"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let error = test_client(&server)
            .managers()
            .create("Sam", "Gamgee", "sam@example.com", "pw", "lender")
            .await
            .expect_err("no seats");
        let result = error.to_error_result().expect("has a code");
        assert_eq!(result.code, 403);
        assert_eq!(result.body, json!({"error": "No manager seats"}));
    }

    #[tokio::test]
    async fn delete_requires_no_content() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/managers/sam@example.com"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/managers/lonesome@example.com"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        client
            .managers()
            .delete("sam@example.com")
            .await
            .expect("deleted");
        let error = client
            .managers()
            .delete("lonesome@example.com")
            .await
            .expect_err("200 is not success for delete");
        assert!(matches!(error, LibibError::Api { .. }));
    }

    #[tokio::test]
    async fn blocking_create_rejects_owner() {
        let server = MockServer::start().await;
        let config = config(&server);

        let result = tokio::task::spawn_blocking(move || {
            let client = BlockingLibibClient::new(config).expect("valid config");
            client
                .managers()
                .create("Larry", "McMurtry", "lonesome@example.com", "pw", "owner")
        })
        .await
        .expect("task completes");

        assert!(matches!(result, Err(LibibError::InvalidRole(role)) if role == "owner"));
        let requests = server.received_requests().await.expect("recording enabled");
        assert!(requests.is_empty());
    }
}
