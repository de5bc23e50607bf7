use crate::args::ListCommand;
use crate::commands::{Context, Out};
use crate::model::Entity;
use crate::store::Listed;
use crate::Result;
use anyhow::bail;
use serde::Serialize;
use std::fmt::Display;

/// Runs a `categories`, `payees` or `tags` subcommand against the list of `T`.
pub async fn named_list<T>(ctx: &Context, command: &ListCommand) -> Result<Out<Vec<T>>>
where
    T: Listed + Serialize,
    T::Id: Display + for<'a> From<&'a str>,
{
    let (verb, items) = match command {
        ListCommand::List => ("", ctx.store().fetch_list::<T>(ctx.api()).await?),
        ListCommand::Create { names } => {
            if names.iter().all(|n| n.trim().is_empty()) {
                bail!("Give at least one name to create");
            }
            let names: Vec<String> = names
                .iter()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .collect();
            (
                "Created ",
                ctx.store().create_list_items::<T>(ctx.api(), &names).await?,
            )
        }
        ListCommand::Delete(args) => {
            let id: T::Id = args.id.as_str().into();
            let item = ctx.store().delete_list_item::<T>(ctx.api(), &id).await?;
            ("Deleted ", vec![item])
        }
    };
    let message = if items.is_empty() {
        format!("No {}", T::PLURAL)
    } else {
        items
            .iter()
            .map(|item| format!("{verb}{}  {}", item.id(), item.name()))
            .collect::<Vec<_>>()
            .join("\n")
    };
    ctx.finish(Out::new(message, items)).await
}
