//! Serve command - run the HTTP API

use anyhow::{Context as _, Result};
use std::net::SocketAddr;

use super::Context;
use crate::server::{self, AppState};

pub fn run(ctx: &Context, bind: Option<String>, port: Option<u16>) -> Result<()> {
    let bind = bind.unwrap_or_else(|| ctx.config.server.bind.clone());
    let port = port.unwrap_or(ctx.config.server.port);
    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", bind, port))?;

    let store = ctx.open_store()?;
    let state = AppState::github(&ctx.config, store);

    eprintln!("   Listening on http://{}/api/github/metrics", addr);
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    runtime.block_on(server::serve(addr, state))
}
