use reqwest::Method;

use crate::types::AccountList;
use crate::{Account, BlockingLibibClient, LibibClient, LibibError};

const ACCOUNTS: &str = "accounts";

/// Account endpoints of the async client.
#[derive(Clone, Copy, Debug)]
pub struct Accounts<'a> {
    client: &'a LibibClient,
}

impl<'a> Accounts<'a> {
    pub(crate) fn new(client: &'a LibibClient) -> Self {
        Self { client }
    }

    /// Lists the accounts visible to the credential.
    ///
    /// Standard credentials see one account; Ultimate credentials see every
    /// account in their purview.
    pub async fn list(&self) -> Result<Vec<Account>, LibibError> {
        let list: AccountList = self
            .client
            .send(Method::GET, &[ACCOUNTS], &[])
            .await?
            .into_json()?;
        Ok(list.accounts)
    }
}

/// Account endpoints of the blocking client.
#[derive(Clone, Copy, Debug)]
pub struct BlockingAccounts<'a> {
    client: &'a BlockingLibibClient,
}

impl<'a> BlockingAccounts<'a> {
    pub(crate) fn new(client: &'a BlockingLibibClient) -> Self {
        Self { client }
    }

    pub fn list(&self) -> Result<Vec<Account>, LibibError> {
        let list: AccountList = self.client.send(Method::GET, &[ACCOUNTS], &[])?.into_json()?;
        Ok(list.accounts)
    }
}
