use std::{convert::Infallible, net::SocketAddr};

use hyper::{
    service::{make_service_fn, service_fn},
    Server,
};
use log::info;
use marketing_api::{config::C, controller::route, model};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let _ = env_logger::try_init();
    model::do_migration()?;

    let addr: SocketAddr = format!("{}:{}", C.web.listen, C.web.port).parse()?;
    let make_svc = make_service_fn(|_conn| async {
        Ok::<_, Infallible>(service_fn(|req| async { Ok::<_, Infallible>(route(req).await) }))
    });

    info!("Listening on {}", addr);
    Server::bind(&addr).serve(make_svc).await?;
    Ok(())
}
