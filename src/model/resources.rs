//! Categories, payees and tags: small, user-scoped, named lists that share one API shape.

use crate::model::{CategoryId, Entity, PayeeId, TagId};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// A named list resource served under `/api/{PATH}`. Lists are returned under the `PLURAL` key,
/// single deleted items under the `SINGULAR` key.
pub trait NamedResource: Entity + DeserializeOwned + Clone + Debug + Send + 'static {
    const PATH: &'static str;
    const PLURAL: &'static str;
    const SINGULAR: &'static str;

    fn name(&self) -> &str;
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CategoryType {
    #[default]
    Custom,
    Default,
}

serde_plain::derive_display_from_serialize!(CategoryType);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: CategoryType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payee {
    pub id: PayeeId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

impl Entity for Category {
    type Id = CategoryId;

    fn id(&self) -> &CategoryId {
        &self.id
    }
}

impl Entity for Payee {
    type Id = PayeeId;

    fn id(&self) -> &PayeeId {
        &self.id
    }
}

impl Entity for Tag {
    type Id = TagId;

    fn id(&self) -> &TagId {
        &self.id
    }
}

impl NamedResource for Category {
    const PATH: &'static str = "categories";
    const PLURAL: &'static str = "categories";
    const SINGULAR: &'static str = "category";

    fn name(&self) -> &str {
        &self.name
    }
}

impl NamedResource for Payee {
    const PATH: &'static str = "payees";
    const PLURAL: &'static str = "payees";
    const SINGULAR: &'static str = "payee";

    fn name(&self) -> &str {
        &self.name
    }
}

impl NamedResource for Tag {
    const PATH: &'static str = "tags";
    const PLURAL: &'static str = "tags";
    const SINGULAR: &'static str = "tag";

    fn name(&self) -> &str {
        &self.name
    }
}
