//! Concurrent retrieval of the members of a collection resource.
//!
//! A collection document lists its members as links and may continue on a next
//! page:
//!
//! ```json
//! {
//!   "Members": [{"@odata.id": "/redfish/v1/Systems/1"}],
//!   "Members@odata.nextLink": "/redfish/v1/Systems?$skip=1"
//! }
//! ```
//!
//! [`list_referenced`] walks every page and spawns one fetch per member link.
//! Each fetch reports `(link, result)` over a single channel. The calling task
//! is the only reader of that channel and the only writer of the result set
//! and failure map. The walker holds its sender until every fetch it spawned
//! has finished, so the channel closes exactly when all work is done.
//!
//! Results arrive in completion order, not in member order.
//!
//! # Examples
//!
//! ```ignore
//! use redfish_entity::collection::list_referenced;
//! use redfish_entity::resources::DataStorageLineOfService;
//!
//! match list_referenced::<DataStorageLineOfService>(&client, link).await {
//!     Ok(all) => println!("{} lines of service", all.len()),
//!     Err(partial) => {
//!         println!("got {} of them", partial.items.len());
//!         for (link, err) in partial.error.failures() {
//!             eprintln!("{}: {}", link, err);
//!         }
//!     }
//! }
//! ```

use crate::client::SharedClient;
use crate::entity::{self, Resource};
use crate::error::{CollectionError, ModelError, PartialCollection, Result};
use crate::filter::Filter;
use serde::Deserialize;
use std::collections::HashSet;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

#[derive(Debug, Deserialize)]
struct Link {
    #[serde(rename = "@odata.id")]
    odata_id: String,
}

#[derive(Debug, Deserialize)]
struct CollectionPage {
    #[serde(rename = "Members", default)]
    members: Vec<Link>,
    #[serde(rename = "Members@odata.nextLink", default)]
    next_link: Option<String>,
}

/// Outcome of one member fetch, or of a failed page.
struct Report<T> {
    link: String,
    result: Result<T>,
}

/// Walk every page of the collection at `link`, calling `visit` once per
/// distinct member link.
///
/// Stops at the first page that cannot be fetched, returning that page's link
/// with the error.
async fn walk<F>(
    client: &SharedClient,
    link: &str,
    mut visit: F,
) -> std::result::Result<(), (String, ModelError)>
where
    F: FnMut(String),
{
    let mut seen_members = HashSet::new();
    let mut seen_pages = HashSet::new();
    let mut page_link = Some(link.to_string());

    while let Some(current) = page_link.take() {
        if !seen_pages.insert(current.clone()) {
            tracing::warn!(page = %current, "collection paging loops back, stopping");
            break;
        }

        let page: CollectionPage = match client.get(&current).await {
            Ok(response) => match response.json() {
                Ok(page) => page,
                Err(e) => return Err((current, e)),
            },
            Err(e) => return Err((current, e)),
        };

        for member in page.members {
            if seen_members.insert(member.odata_id.clone()) {
                visit(member.odata_id);
            }
        }
        page_link = page.next_link.filter(|next| !next.is_empty());
    }

    Ok(())
}

/// List the member links of the collection at `link`, following every page.
pub async fn members(client: &SharedClient, link: &str) -> Result<Vec<String>> {
    let mut links = Vec::new();
    walk(client, link, |member| links.push(member))
        .await
        .map_err(|(_, err)| err)?;
    Ok(links)
}

/// Fetch every member of the collection at `link` concurrently.
///
/// An empty `link` yields an empty list. When any member (or page) fails, the
/// error carries the members that were retrieved plus one failure per failing
/// link; every link ends up in exactly one of the two.
pub async fn list_referenced<T: Resource>(
    client: &SharedClient,
    link: &str,
) -> std::result::Result<Vec<T>, PartialCollection<T>> {
    let mut items = Vec::new();
    let mut error = CollectionError::new();
    if link.is_empty() {
        return Ok(items);
    }

    let (tx, mut rx) = mpsc::unbounded_channel::<Report<T>>();
    let walker = spawn_walker(client.clone(), link.to_string(), tx);

    while let Some(report) = rx.recv().await {
        match report.result {
            Ok(item) => items.push(item),
            Err(err) => {
                tracing::warn!(link = %report.link, error = %err, "collection member failed");
                error.insert(report.link, err);
            }
        }
    }

    if let Err(join_err) = walker.await {
        error.insert(link, ModelError::Internal(join_err.to_string()));
    }

    tracing::debug!(
        collection = link,
        retrieved = items.len(),
        failed = error.len(),
        "collection retrieved"
    );

    if error.is_empty() {
        Ok(items)
    } else {
        Err(PartialCollection { items, error })
    }
}

/// [`list_referenced`] on `link` with `filter` appended as its query string.
pub async fn list_referenced_filtered<T: Resource>(
    client: &SharedClient,
    link: &str,
    filter: &Filter,
) -> std::result::Result<Vec<T>, PartialCollection<T>> {
    if link.is_empty() {
        return Ok(Vec::new());
    }
    list_referenced(client, &format!("{}{}", link, filter)).await
}

fn spawn_walker<T: Resource>(
    client: SharedClient,
    link: String,
    tx: mpsc::UnboundedSender<Report<T>>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut workers: Vec<(String, JoinHandle<()>)> = Vec::new();

        let walked = walk(&client, &link, |member| {
            let client = client.clone();
            let tx = tx.clone();
            let target = member.clone();
            let handle = tokio::spawn(async move {
                let result = entity::get::<T>(&client, &target).await;
                let _ = tx.send(Report {
                    link: target,
                    result,
                });
            });
            workers.push((member, handle));
        })
        .await;

        if let Err((page, err)) = walked {
            let _ = tx.send(Report {
                link: page,
                result: Err(err),
            });
        }

        for (member, handle) in workers {
            if let Err(join_err) = handle.await {
                let _ = tx.send(Report {
                    link: member,
                    result: Err(ModelError::Internal(join_err.to_string())),
                });
            }
        }
        tracing::trace!(collection = %link, "walk finished");
    })
}
