//! Interactive storefront session.
//!
//! Reads one command per line and renders the current list view and cart
//! count through a [`QueryClient`], so repeated views come from the cache
//! and a purchase re-fetches only the cart.

use grocer_client::{GroceryApi, QueryClient, QueryKey};
use grocer_core::types::{Filter, ItemId};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::render;

const HELP: &str = "\
commands:
  all | fruits | vegetables   switch the list filter
  cart                        show the cart count
  buy <id>                    add an item to the cart
  retry                       retry after an error
  quit                        leave
";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShopCommand {
    Show(Option<Filter>),
    Cart,
    Buy(ItemId),
    Retry,
    Help,
    Quit,
}

impl ShopCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let mut words = line.split_whitespace();
        let command = match (words.next(), words.next()) {
            (Some("all"), None) => ShopCommand::Show(None),
            (Some("fruits"), None) => ShopCommand::Show(Some(Filter::Fruits)),
            (Some("vegetables"), None) => ShopCommand::Show(Some(Filter::Vegetables)),
            (Some("cart"), None) => ShopCommand::Cart,
            (Some("buy"), Some(id)) => match id.parse() {
                Ok(id) => ShopCommand::Buy(id),
                Err(_) => return Err(format!("not an item id: {id}")),
            },
            (Some("retry"), None) => ShopCommand::Retry,
            (Some("help"), None) | (None, None) => ShopCommand::Help,
            (Some("quit" | "exit"), None) => ShopCommand::Quit,
            _ => return Err(format!("unknown command: {}", line.trim())),
        };
        if words.next().is_some() {
            return Err(format!("unexpected arguments: {}", line.trim()));
        }
        Ok(command)
    }
}

/// Run the session until `quit` or end of input.
pub async fn run<A, R, W>(client: &QueryClient<A>, input: R, mut output: W) -> std::io::Result<()>
where
    A: GroceryApi,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut filter = None;
    output.write_all(HELP.as_bytes()).await?;
    show_list(client, filter, &mut output).await?;
    show_cart(client, &mut output).await?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let command = match ShopCommand::parse(&line) {
            Ok(command) => command,
            Err(message) => {
                output.write_all(format!("{message}\n").as_bytes()).await?;
                continue;
            }
        };
        tracing::debug!(?command, "Shop command");

        match command {
            ShopCommand::Show(next) => {
                filter = next;
                show_list(client, filter, &mut output).await?;
            }
            ShopCommand::Cart => show_cart(client, &mut output).await?,
            ShopCommand::Buy(id) => {
                output
                    .write_all(format!("Adding #{id} to the cart...\n").as_bytes())
                    .await?;
                match client.add_to_cart(id).await {
                    Ok(_) => show_cart(client, &mut output).await?,
                    Err(err) => output.write_all(render::error(&err).as_bytes()).await?,
                }
            }
            ShopCommand::Retry => {
                client.reset(QueryKey::grocery_list(filter)).await;
                client.reset(QueryKey::Cart).await;
                show_list(client, filter, &mut output).await?;
                show_cart(client, &mut output).await?;
            }
            ShopCommand::Help => output.write_all(HELP.as_bytes()).await?,
            ShopCommand::Quit => break,
        }
    }

    output.flush().await
}

async fn show_list<A, W>(
    client: &QueryClient<A>,
    filter: Option<Filter>,
    output: &mut W,
) -> std::io::Result<()>
where
    A: GroceryApi,
    W: AsyncWrite + Unpin,
{
    let header = format!("[{}]\n", render::filter_label(filter));
    output.write_all(header.as_bytes()).await?;

    let key = QueryKey::grocery_list(filter);
    if client.snapshot(key).await.needs_fetch() {
        output.write_all(render::LOADING_LIST.as_bytes()).await?;
    }
    let body = match client.grocery_list(filter).await {
        Ok(items) => render::items(&items),
        Err(err) => format!("{} ({})\n", err.user_message(), render::RETRY_HINT),
    };
    output.write_all(body.as_bytes()).await
}

async fn show_cart<A, W>(client: &QueryClient<A>, output: &mut W) -> std::io::Result<()>
where
    A: GroceryApi,
    W: AsyncWrite + Unpin,
{
    if client.snapshot(QueryKey::Cart).await.needs_fetch() {
        output.write_all(render::LOADING_CART.as_bytes()).await?;
    }
    let cart = client.cart().await;
    output.write_all(render::cart_count(&cart).as_bytes()).await
}
