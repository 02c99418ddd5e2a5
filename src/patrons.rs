use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::debug;

use crate::fields::{collect_fields, patron_query};
use crate::types::PatronPage;
use crate::{BlockingLibibClient, LibibClient, LibibError, Patron};

const PATRONS: &str = "patrons";

/// Patron endpoints of the async client.
///
/// Identifiers are a patron's barcode or email address.
#[derive(Clone, Copy, Debug)]
pub struct Patrons<'a> {
    client: &'a LibibClient,
}

impl<'a> Patrons<'a> {
    pub(crate) fn new(client: &'a LibibClient) -> Self {
        Self { client }
    }

    /// Lists every patron, following pagination.
    ///
    /// Pages after the first are fetched one at a time, each after the
    /// configured page delay. The first failing page aborts the listing and
    /// its error is returned; patrons from earlier pages are discarded.
    pub async fn list(&self) -> Result<Vec<Patron>, LibibError> {
        let first = self.fetch_page(1).await?;
        let pages = first.pages;
        let mut patrons = first.patrons;
        let delay = self.client.config().page_delay();

        for page in 2..=pages {
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            debug!(page, pages, "fetching patron page");
            patrons.extend(self.fetch_page(page).await?.patrons);
        }

        Ok(patrons)
    }

    /// Fetches a single patron by barcode or email.
    pub async fn get_by_id(&self, identifier: &str) -> Result<Patron, LibibError> {
        self.client
            .send(Method::GET, &[PATRONS, identifier], &[])
            .await?
            .into_json()
    }

    /// Creates a patron from allow-listed fields.
    ///
    /// Unknown field names are dropped. No request is sent when no allowed
    /// field remains.
    pub async fn create<I, K, V>(&self, fields: I) -> Result<(), LibibError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let query = patron_query(collect_fields(fields))?;
        self.client
            .send(Method::POST, &[PATRONS], &query)
            .await?
            .expect_status(StatusCode::OK)?;
        Ok(())
    }

    /// Updates allow-listed fields of an existing patron.
    pub async fn update<I, K, V>(&self, identifier: &str, fields: I) -> Result<(), LibibError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let query = patron_query(collect_fields(fields))?;
        self.client
            .send(Method::POST, &[PATRONS, identifier], &query)
            .await?
            .expect_status(StatusCode::OK)?;
        Ok(())
    }

    /// Restores a patron deleted within the last 30 days.
    pub async fn restore(&self, identifier: &str) -> Result<(), LibibError> {
        self.client
            .send(Method::PATCH, &[PATRONS, identifier], &[])
            .await?
            .expect_status(StatusCode::OK)?;
        Ok(())
    }

    /// Deletes a patron. Only `204 No Content` counts as success.
    pub async fn delete(&self, identifier: &str) -> Result<(), LibibError> {
        self.client
            .send(Method::DELETE, &[PATRONS, identifier], &[])
            .await?
            .expect_status(StatusCode::NO_CONTENT)?;
        Ok(())
    }

    async fn fetch_page(&self, page: u32) -> Result<PatronPage, LibibError> {
        self.client
            .send(Method::GET, &[PATRONS], &page_query(page))
            .await?
            .into_json()
    }
}

/// Patron endpoints of the blocking client.
///
/// This is the synchronous counterpart of [`Patrons`].
#[derive(Clone, Copy, Debug)]
pub struct BlockingPatrons<'a> {
    client: &'a BlockingLibibClient,
}

impl<'a> BlockingPatrons<'a> {
    pub(crate) fn new(client: &'a BlockingLibibClient) -> Self {
        Self { client }
    }

    /// Lists every patron, following pagination.
    ///
    /// See [`Patrons::list`].
    pub fn list(&self) -> Result<Vec<Patron>, LibibError> {
        let first = self.fetch_page(1)?;
        let pages = first.pages;
        let mut patrons = first.patrons;
        let delay = self.client.config().page_delay();

        for page in 2..=pages {
            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
            debug!(page, pages, "fetching patron page");
            patrons.extend(self.fetch_page(page)?.patrons);
        }

        Ok(patrons)
    }

    pub fn get_by_id(&self, identifier: &str) -> Result<Patron, LibibError> {
        self.client
            .send(Method::GET, &[PATRONS, identifier], &[])?
            .into_json()
    }

    pub fn create<I, K, V>(&self, fields: I) -> Result<(), LibibError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let query = patron_query(collect_fields(fields))?;
        self.client
            .send(Method::POST, &[PATRONS], &query)?
            .expect_status(StatusCode::OK)?;
        Ok(())
    }

    pub fn update<I, K, V>(&self, identifier: &str, fields: I) -> Result<(), LibibError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let query = patron_query(collect_fields(fields))?;
        self.client
            .send(Method::POST, &[PATRONS, identifier], &query)?
            .expect_status(StatusCode::OK)?;
        Ok(())
    }

    pub fn restore(&self, identifier: &str) -> Result<(), LibibError> {
        self.client
            .send(Method::PATCH, &[PATRONS, identifier], &[])?
            .expect_status(StatusCode::OK)?;
        Ok(())
    }

    pub fn delete(&self, identifier: &str) -> Result<(), LibibError> {
        self.client
            .send(Method::DELETE, &[PATRONS, identifier], &[])?
            .expect_status(StatusCode::NO_CONTENT)?;
        Ok(())
    }

    fn fetch_page(&self, page: u32) -> Result<PatronPage, LibibError> {
        self.client
            .send(Method::GET, &[PATRONS], &page_query(page))?
            .into_json()
    }
}

fn page_query(page: u32) -> [(String, String); 1] {
    [("page".to_owned(), page.to_string())]
}
