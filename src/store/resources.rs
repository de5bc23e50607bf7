//! The categories, payees and tags slices.

use crate::model::{Category, CategoryId, NamedResource, Payee, PayeeId, Tag, TagId};
use crate::store::{remove_by_id, upsert_by_id, ListKind, RootState, Slice};

pub type ListState<T> = Slice<Vec<T>>;

/// Items of one of the named lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPayload {
    Categories(Vec<Category>),
    Payees(Vec<Payee>),
    Tags(Vec<Tag>),
}

impl ListPayload {
    pub fn kind(&self) -> ListKind {
        match self {
            ListPayload::Categories(_) => ListKind::Categories,
            ListPayload::Payees(_) => ListKind::Payees,
            ListPayload::Tags(_) => ListKind::Tags,
        }
    }
}

/// The id of an item to remove from one of the named lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRemoval {
    Category(CategoryId),
    Payee(PayeeId),
    Tag(TagId),
}

/// Ties a `NamedResource` to the slice that holds it.
pub trait Listed: NamedResource + Sized {
    const KIND: ListKind;

    fn payload(items: Vec<Self>) -> ListPayload;

    fn removal(id: Self::Id) -> ListRemoval;

    fn list(state: &RootState) -> &ListState<Self>;
}

impl Listed for Category {
    const KIND: ListKind = ListKind::Categories;

    fn payload(items: Vec<Self>) -> ListPayload {
        ListPayload::Categories(items)
    }

    fn removal(id: CategoryId) -> ListRemoval {
        ListRemoval::Category(id)
    }

    fn list(state: &RootState) -> &ListState<Self> {
        &state.categories
    }
}

impl Listed for Payee {
    const KIND: ListKind = ListKind::Payees;

    fn payload(items: Vec<Self>) -> ListPayload {
        ListPayload::Payees(items)
    }

    fn removal(id: PayeeId) -> ListRemoval {
        ListRemoval::Payee(id)
    }

    fn list(state: &RootState) -> &ListState<Self> {
        &state.payees
    }
}

impl Listed for Tag {
    const KIND: ListKind = ListKind::Tags;

    fn payload(items: Vec<Self>) -> ListPayload {
        ListPayload::Tags(items)
    }

    fn removal(id: TagId) -> ListRemoval {
        ListRemoval::Tag(id)
    }

    fn list(state: &RootState) -> &ListState<Self> {
        &state.tags
    }
}

fn add_all<T>(items: &mut Vec<T>, added: Vec<T>)
where
    T: NamedResource,
{
    for item in added {
        upsert_by_id(items, item);
    }
}

impl RootState {
    pub(crate) fn set_list(&mut self, payload: ListPayload) {
        match payload {
            ListPayload::Categories(items) => self.categories.data = items,
            ListPayload::Payees(items) => self.payees.data = items,
            ListPayload::Tags(items) => self.tags.data = items,
        }
    }

    pub(crate) fn add_to_list(&mut self, payload: ListPayload) {
        match payload {
            ListPayload::Categories(items) => add_all(&mut self.categories.data, items),
            ListPayload::Payees(items) => add_all(&mut self.payees.data, items),
            ListPayload::Tags(items) => add_all(&mut self.tags.data, items),
        }
    }

    pub(crate) fn remove_from_list(&mut self, removal: &ListRemoval) {
        match removal {
            ListRemoval::Category(id) => {
                remove_by_id(&mut self.categories.data, id);
            }
            ListRemoval::Payee(id) => {
                remove_by_id(&mut self.payees.data, id);
            }
            ListRemoval::Tag(id) => {
                remove_by_id(&mut self.tags.data, id);
            }
        }
    }
}
