use crate::controller::{error_body, route, Body as OurBody, Request as OurRequest};
use crate::error::Error;
use http::{header, HeaderValue};
use lambda_http::{
    Body as LambdaBody, Error as LambdaError, Request as LambdaRequest,
    Response as LambdaResponse,
};
use log::error;

/// Translate between `lambda_http` `Body` and our `Body`.
async fn parse(req: LambdaRequest) -> LambdaResponse<LambdaBody> {
    let (parts, old_body) = req.into_parts();
    let body = match old_body {
        LambdaBody::Empty => OurBody::empty(),
        LambdaBody::Text(text) => OurBody::from(text),
        LambdaBody::Binary(bin) => OurBody::from(bin),
    };
    let new_req: OurRequest = http::Request::from_parts(parts, body);

    // Lambda cannot stream: buffer whatever the route produced.
    let (mut parts, our_body) = route(new_req).await.into_parts();
    let lambda_body = match hyper::body::to_bytes(our_body).await {
        Ok(bytes) if bytes.is_empty() => LambdaBody::Empty,
        Ok(bytes) => match String::from_utf8(bytes.to_vec()) {
            Ok(text) => LambdaBody::Text(text),
            Err(not_utf8) => LambdaBody::Binary(not_utf8.into_bytes()),
        },
        Err(err) => {
            let err = Error::from(err);
            error!("Response body broke while buffering: {:?}", err);
            parts.status = err.http_status();
            parts.headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/json"),
            );
            LambdaBody::Text(error_body(&err))
        }
    };

    LambdaResponse::from_parts(parts, lambda_body)
}

/// Main entrypoint for `lambda_http`.
pub async fn entrypoint(req: LambdaRequest) -> Result<LambdaResponse<LambdaBody>, LambdaError> {
    Ok(parse(req).await)
}
