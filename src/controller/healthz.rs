use crate::{
    controller::{json_response, Request, Response},
    error::Error,
};
use http::StatusCode;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
struct HealthzResponse {
    pub hello: String,
    pub build_at: String,
    pub commit_version: String,
}

pub async fn controller(_req: Request) -> Result<Response, Error> {
    json_response(
        StatusCode::OK,
        &HealthzResponse {
            hello: "marketing api".to_string(),
            build_at: option_env!("MARKETING_API_BUILD_AT")
                .unwrap_or("UNKNOWN")
                .to_string(),
            commit_version: option_env!("MARKETING_API_CURRENT_COMMIT_ID")
                .unwrap_or("UNKNOWN")
                .to_string(),
        },
    )
}
