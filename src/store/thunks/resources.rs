use crate::api::Api;
use crate::model::Entity;
use crate::store::{Action, Listed, RequestKind, Store, ThunkResult};
use std::fmt::Display;

impl Store {
    /// Fetches all categories, payees or tags, e.g. `store.fetch_list::<Tag>(&api)`.
    pub async fn fetch_list<T>(&self, api: &Api) -> ThunkResult<Vec<T>>
    where
        T: Listed,
    {
        self.run(
            RequestKind::FetchList(T::KIND),
            api.get_named::<T>(),
            |request, items| Action::ListFetched(request, T::payload(items)),
        )
        .await
    }

    /// Creates one item per name.
    pub async fn create_list_items<T>(&self, api: &Api, names: &[String]) -> ThunkResult<Vec<T>>
    where
        T: Listed,
    {
        self.run(
            RequestKind::CreateList(T::KIND),
            api.create_named::<T>(names),
            |request, items| Action::ListCreated(request, T::payload(items)),
        )
        .await
    }

    pub async fn delete_list_item<T>(&self, api: &Api, id: &T::Id) -> ThunkResult<T>
    where
        T: Listed,
        T::Id: Display,
    {
        self.run(
            RequestKind::DeleteList(T::KIND),
            api.delete_named::<T>(id),
            |request, item: T| Action::ListDeleted(request, T::removal(item.id().clone())),
        )
        .await
    }
}
