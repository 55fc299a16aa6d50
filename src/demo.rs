// Demo handlers bundled with the binary
// Run e.g. `alb-local demo/echo.handler` and curl http://localhost:3000/anything?x=1

use alb_local::error::{BoxError, ResolveError};
use alb_local::event::{AlbEvent, AlbResponse, Context};
use alb_local::handler::{handler_fn, HandlerRegistry};

/// 1x1 transparent GIF
const PIXEL_GIF_BASE64: &str = "R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

pub fn registry() -> Result<HandlerRegistry, ResolveError> {
    let mut registry = HandlerRegistry::new();
    registry.register("demo/echo.handler", handler_fn(echo))?;
    registry.register("demo/hello.handler", handler_fn(hello))?;
    registry.register("demo/pixel.handler", handler_fn(pixel))?;
    Ok(registry)
}

/// Responds with the event it received, as JSON
async fn echo(event: AlbEvent, _context: Context) -> Result<AlbResponse, BoxError> {
    let body = serde_json::to_string_pretty(&event)?;
    Ok(AlbResponse::new(200)
        .with_header("content-type", "application/json")
        .with_body(body))
}

async fn hello(event: AlbEvent, _context: Context) -> Result<AlbResponse, BoxError> {
    let name = event
        .query_string_parameters
        .get("name")
        .map_or("world", String::as_str);
    Ok(AlbResponse::new(200)
        .with_header("content-type", "text/plain; charset=utf-8")
        .with_body(format!("Hello, {name}!\n")))
}

async fn pixel(_event: AlbEvent, _context: Context) -> Result<AlbResponse, BoxError> {
    Ok(AlbResponse::new(200)
        .with_header("content-type", "image/gif")
        .with_header("cache-control", "no-store")
        .with_base64_body(PIXEL_GIF_BASE64))
}
