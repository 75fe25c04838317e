// Basic usage: log in with a token, search for units, log out.
// Run with a real token: cargo run --example basic -- <token>

use anyhow::Result;
use serde_json::json;
use tracing::info;
use wialon_client::{remote_call, Client, Error, SessionConfig};

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    // Token generator: https://developers.layrz.com/tools/wialon-token-generator
    let token = std::env::args().nth(1).unwrap_or_default();

    let mut client = Client::new(SessionConfig::default())?;

    match run(&mut client, &token) {
        Ok(()) => {}
        Err(Error::Sdk(message)) => info!("sdk related error: {message}"),
        Err(err @ Error::Api { .. }) => info!("wialon related error: {err}"),
    }

    Ok(())
}

fn run(client: &mut Client, token: &str) -> wialon_client::Result<()> {
    let response = client.login(token)?;
    info!(user_id = %client.session().user_id(), "logged in");
    info!("login response: {response}");

    let units = remote_call!(client, core_search_items, {
        "spec": {
            "itemsType": "avl_unit",
            "propName": "sys_name",
            "propValueMask": "*",
            "sortType": "sys_name",
            "propType": "property",
            "or_logic": false,
        },
        "force": 1,
        "flags": 1,
        "from": 0,
        "to": 0,
    })?;
    info!("found units: {units}");

    // The generic form works for any method name, with explicit args.
    let _ = client.call("core_search_item", json!({"id": 1, "flags": 1}));

    client.logout()?;
    info!("logged out");

    Ok(())
}
