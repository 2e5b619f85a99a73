use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;

use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper::Request;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto;
use tokio::net::TcpListener;

use crate::api::handler::process_http;
use crate::context::BackendContext;

/// Accepts connections until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, ctx: Arc<BackendContext>, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()>,
{
    tokio::pin!(shutdown);
    loop {
        let (stream, peer) = tokio::select! {
            accepted = listener.accept() => match accepted {
                Ok(v) => v,
                Err(e) => {
                    log::warn!("accept failed: {}", e);
                    continue;
                }
            },
            _ = &mut shutdown => {
                log::info!("shutting down");
                break;
            }
        };
        log::debug!("Peer address: {}", peer);

        let ctx = ctx.clone();
        tokio::spawn(async move {
            let service = service_fn(move |req: Request<Incoming>| {
                let ctx = ctx.clone();
                async move { Ok::<_, Infallible>(process_http(&ctx, req).await) }
            });
            if let Err(e) = auto::Builder::new(TokioExecutor::new())
                .serve_connection(TokioIo::new(stream), service)
                .await
            {
                log::debug!("connection {} closed: {}", peer, e);
            }
        });
    }
    Ok(())
}
