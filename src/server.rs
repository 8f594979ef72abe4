use crate::fumo_context::FumoContext;

use std::{net::SocketAddr, sync::Arc};

use tokio::{net::TcpListener, sync::oneshot::Receiver};

use bytes::Bytes;
use eyre::Result;
use http_body_util::Full;
use hyper::{server::conn::http1, service::service_fn, Request, Response, StatusCode};
use hyper_util::rt::tokio::TokioIo;
use prometheus::{Encoder, TextEncoder};

fn metrics_response(ctx: &FumoContext) -> Result<Response<Full<Bytes>>> {
    let mut buf = Vec::new();
    let encoder = TextEncoder::new();
    let metric_families = ctx.stats.registry.gather();
    encoder.encode(&metric_families, &mut buf)?;

    let response = Response::builder()
        .header("Content-Type", encoder.format_type())
        .body(Bytes::from(buf).into())?;

    Ok(response)
}

async fn metrics_handler(
    ctx: Arc<FumoContext>,
    _req: Request<hyper::body::Incoming>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    match metrics_response(&ctx) {
        Ok(response) => Ok(response),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {e:?}");

            let mut response = Response::default();
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;

            Ok(response)
        }
    }
}

async fn service(
    ctx: Arc<FumoContext>,
    req: Request<hyper::body::Incoming>,
) -> Result<Response<Full<Bytes>>, hyper::Error> {
    match req.uri().path() {
        "/metrics" => metrics_handler(ctx, req).await,
        _ => {
            let mut response = Response::default();
            *response.status_mut() = StatusCode::NOT_FOUND;

            Ok(response)
        }
    }
}

pub async fn server_loop(ctx: Arc<FumoContext>, port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));

    let listener = TcpListener::bind(&addr).await?;

    tracing::info!("Started metrics HTTP server at :{}", port);

    loop {
        let (stream, _) = listener.accept().await?;
        let io = TokioIo::new(stream);

        let context = ctx.clone();
        tokio::task::spawn(async move {
            let _ = http1::Builder::new()
                .serve_connection(
                    io,
                    service_fn(|req| service(context.clone(), req)),
                )
                .await;
        });
    }
}

pub async fn run_server(
    ctx: Arc<FumoContext>,
    port: u16,
    shutdown_rx: Receiver<()>,
) {
    tokio::select! {
        res = server_loop(ctx.clone(), port) => match res {
            Ok(()) => tracing::error!("Http server suddenly closes"),
            Err(e) => tracing::error!("Http server failed: {e:?}"),
        },
        _ = shutdown_rx => tracing::info!("Bye http server"),
    };
}
