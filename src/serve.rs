//! Development server for the site's generated routes.
//!
//! A lightweight HTTP server built on `tiny_http`. The content layer owns a
//! single route:
//!
//! - `GET /robots.txt` — plain-text crawler policy pointing at the sitemap
//!
//! Everything else is rendered by the external pipeline and returns 404
//! here. The server binds the configured interface/port (retrying on port
//! conflicts) and shuts down gracefully on Ctrl+C.

use crate::{config::SiteConfig, log};
use anyhow::{Context, Result};
use std::{net::SocketAddr, sync::Arc};
use tiny_http::{Header, Request, Response, Server, StatusCode};

/// Try binding to port, retry with incremented port if in use
const MAX_PORT_RETRIES: u16 = 10;

// ============================================================================
// Server Entry Point
// ============================================================================

/// Start the development server.
///
/// Blocks handling requests until Ctrl+C is received.
pub fn serve_site(config: &'static SiteConfig) -> Result<()> {
    let interface: std::net::IpAddr = config.serve.interface.parse()?;
    let base_port = config.serve.port;

    let (server, addr) = try_bind_port(interface, base_port, MAX_PORT_RETRIES)?;
    let server = Arc::new(server);

    // Set up Ctrl+C handler for graceful shutdown
    let server_for_signal = Arc::clone(&server);
    ctrlc::set_handler(move || {
        log!("serve"; "shutting down...");
        server_for_signal.unblock();
    })
    .context("Failed to set Ctrl+C handler")?;

    log!("serve"; "http://{}", addr);

    for request in server.incoming_requests() {
        if let Err(e) = handle_request(request, config) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

/// Try to bind to a port, retrying with incremented port numbers if in use.
fn try_bind_port(
    interface: std::net::IpAddr,
    base_port: u16,
    max_retries: u16,
) -> Result<(Server, SocketAddr)> {
    for offset in 0..max_retries {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(_) if offset + 1 < max_retries => {
                // Will retry silently
                continue;
            }
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Failed to bind after {} attempts (ports {}-{}): {}",
                    max_retries,
                    base_port,
                    port,
                    e
                ));
            }
        }
    }
    unreachable!()
}

// ============================================================================
// Request Handling
// ============================================================================

/// Handle a single HTTP request. Only `/robots.txt` exists here.
fn handle_request(request: Request, config: &SiteConfig) -> Result<()> {
    let url = request.url();
    let path = url.split('?').next().unwrap_or(url);

    if path == "/robots.txt" {
        return serve_plain_text(request, robots_txt(config.site_url()));
    }

    serve_not_found(request)
}

/// Build the `robots.txt` body for a site base URL.
///
/// Allows every crawler everywhere and advertises the sitemap index,
/// resolved relative to the base URL. Always ends with a newline.
pub fn robots_txt(site_url: &str) -> String {
    let sitemap = resolve_url(site_url, "sitemap-index.xml");
    let lines = ["User-agent: *".to_owned(), "Allow: /".to_owned(), format!("Sitemap: {sitemap}")];
    let mut body = lines.join("\n");
    body.push('\n');
    body
}

/// Resolve a relative reference against a base URL.
///
/// Follows the browser URL rules the templates rely on: the reference
/// replaces everything after the last `/` of the base path. A base without
/// a path gets `/<reference>` appended.
fn resolve_url(base: &str, reference: &str) -> String {
    let path_start = base
        .find("://")
        .map(|scheme_end| scheme_end + 3)
        .and_then(|authority_start| {
            base[authority_start..]
                .find('/')
                .map(|offset| authority_start + offset)
        });

    match path_start {
        None => format!("{base}/{reference}"),
        Some(start) => {
            let (origin, path) = base.split_at(start);
            let last_slash = path.rfind('/').unwrap_or(0);
            format!("{origin}{}{reference}", &path[..=last_slash])
        }
    }
}

// ============================================================================
// Response Helpers
// ============================================================================

/// Serve plain text with UTF-8 charset.
fn serve_plain_text(request: Request, content: String) -> Result<()> {
    let response = Response::from_string(content).with_header(
        Header::from_bytes("Content-Type", "text/plain; charset=utf-8")
            .map_err(|()| anyhow::anyhow!("invalid header"))?,
    );
    request.respond(response)?;
    Ok(())
}

/// Serve 404 Not Found response.
fn serve_not_found(request: Request) -> Result<()> {
    let response = Response::from_string("404 Not Found")
        .with_status_code(StatusCode(404))
        .with_header(
            Header::from_bytes("Content-Type", "text/plain; charset=utf-8")
                .map_err(|()| anyhow::anyhow!("invalid header"))?,
        );
    request.respond(response)?;
    Ok(())
}
