//! Records exchanged with the Libib API.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::{Fields, LibibError};

/// A library patron.
///
/// Identity is established by `barcode` or `email`; every other field may be
/// absent. Fields whose wire shape varies (`tags` may be a string or a list,
/// `zip` a string or a number) are kept as raw JSON. Response fields not
/// modelled here are kept in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Patron {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barcode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification_emails: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub patron_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub freeze: Option<Value>,
    /// Write-only; never returned by the API.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Patron {
    /// Converts the populated fields into a create/update field mapping.
    pub fn to_fields(&self) -> Result<Fields, LibibError> {
        match serde_json::to_value(self)? {
            Value::Object(map) => Ok(map.into_iter().collect()),
            _ => Ok(Fields::new()),
        }
    }
}

/// Permission level of a manager.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ManagerRole {
    Admin,
    Manager,
    Lender,
    /// Assigned by the platform; cannot be created or removed through the API.
    Owner,
}

impl ManagerRole {
    /// Roles accepted when creating a manager.
    pub const ASSIGNABLE: [Self; 3] = [Self::Admin, Self::Manager, Self::Lender];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Manager => "manager",
            Self::Lender => "lender",
            Self::Owner => "owner",
        }
    }

    pub fn is_assignable(self) -> bool {
        Self::ASSIGNABLE.contains(&self)
    }
}

impl fmt::Display for ManagerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ManagerRole {
    type Err = LibibError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "admin" => Ok(Self::Admin),
            "manager" => Ok(Self::Manager),
            "lender" => Ok(Self::Lender),
            "owner" => Ok(Self::Owner),
            other => Err(LibibError::InvalidRole(other.to_owned())),
        }
    }
}

/// A staff account.
///
/// Missing or `null` names decode as empty strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Manager {
    #[serde(default, deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub email: String,
    pub role: ManagerRole,
}

/// Account information visible to the credential.
///
/// Missing or `null` values decode as the type's default.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Account {
    #[serde(deserialize_with = "null_as_default")]
    pub organization: String,
    #[serde(deserialize_with = "null_as_default")]
    pub api_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub email: String,
    #[serde(deserialize_with = "null_as_default")]
    pub first_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub manager_seats: u32,
    #[serde(deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(deserialize_with = "null_as_default")]
    pub authorized: u8,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One page of the patron listing.
#[derive(Debug, Deserialize)]
pub(crate) struct PatronPage {
    #[serde(default)]
    pub patrons: Vec<Patron>,
    #[serde(default = "single_page")]
    pub pages: u32,
}

fn single_page() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub(crate) struct ManagerList {
    #[serde(default)]
    pub managers: Vec<Manager>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AccountList {
    #[serde(default)]
    pub accounts: Vec<Account>,
}
