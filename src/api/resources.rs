//! Categories, payees and tags share one set of endpoints, parameterized by `NamedResource`.

use crate::api::{Api, ApiError, ApiResult, Request};
use crate::model::NamedResource;
use serde_json::{json, Value};
use std::fmt::Display;

impl Api {
    /// `GET /api/{categories,payees,tags}`
    pub async fn get_named<T>(&self) -> ApiResult<Vec<T>>
    where
        T: NamedResource,
    {
        let body: Value = self.call(Request::get(format!("/api/{}", T::PATH))).await?;
        field(body, T::PLURAL)
    }

    /// `POST /api/{categories,payees,tags}` with a list of names to create in bulk.
    pub async fn create_named<T>(&self, names: &[String]) -> ApiResult<Vec<T>>
    where
        T: NamedResource,
    {
        let request = Request::post(format!("/api/{}", T::PATH), json!({ "names": names }));
        let body: Value = self.call(request).await?;
        field(body, T::PLURAL)
    }

    /// `DELETE /api/{categories,payees,tags}/:id`, returning the deleted item.
    pub async fn delete_named<T>(&self, id: &T::Id) -> ApiResult<T>
    where
        T: NamedResource,
        T::Id: Display,
    {
        let body: Value = self
            .call(Request::delete(format!("/api/{}/{id}", T::PATH)))
            .await?;
        field(body, T::SINGULAR)
    }
}

/// Decodes the value under `key` of a response body.
fn field<T>(mut body: Value, key: &str) -> ApiResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let value = body.get_mut(key).map(Value::take).unwrap_or(Value::Null);
    serde_json::from_value(value).map_err(ApiError::from)
}
