//! In-process stand-in for the n8n webhooks.

use std::{
    convert::Infallible,
    net::SocketAddr,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use http::{Response, StatusCode};
use hyper::{
    body::Bytes,
    service::{make_service_fn, service_fn},
    Body, Server,
};

pub struct MockUpstream {
    pub url: String,
    hits: Arc<AtomicUsize>,
    received: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MockUpstream {
    /// Requests received so far.
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// Raw request bodies received so far.
    pub fn received(&self) -> Vec<Vec<u8>> {
        self.received.lock().unwrap().clone()
    }
}

/// Serve every request with `status`, streaming `chunks` one by one.
pub async fn spawn_upstream(status: StatusCode, chunks: Vec<&'static str>) -> MockUpstream {
    let hits = Arc::new(AtomicUsize::new(0));
    let received = Arc::new(Mutex::new(Vec::new()));

    let (svc_hits, svc_received) = (hits.clone(), received.clone());
    let make_svc = make_service_fn(move |_conn| {
        let (hits, received, chunks) = (svc_hits.clone(), svc_received.clone(), chunks.clone());
        async move {
            Ok::<_, Infallible>(service_fn(move |req: hyper::Request<Body>| {
                let (hits, received, chunks) = (hits.clone(), received.clone(), chunks.clone());
                async move {
                    hits.fetch_add(1, Ordering::SeqCst);
                    let bytes = hyper::body::to_bytes(req.into_body()).await?;
                    received.lock().unwrap().push(bytes.to_vec());

                    let (mut sender, body) = Body::channel();
                    tokio::spawn(async move {
                        for chunk in chunks {
                            if sender.send_data(Bytes::from(chunk)).await.is_err() {
                                break;
                            }
                        }
                    });
                    Ok::<_, hyper::Error>(Response::builder().status(status).body(body).unwrap())
                }
            }))
        }
    });

    let server = Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0))).serve(make_svc);
    let addr = server.local_addr();
    tokio::spawn(server);

    MockUpstream {
        url: format!("http://{}/webhook", addr),
        hits,
        received,
    }
}

/// Collect a response body into a string.
pub async fn body_string(body: Body) -> String {
    let bytes = hyper::body::to_bytes(body).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
