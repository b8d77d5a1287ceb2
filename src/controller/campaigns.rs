use http::StatusCode;
use serde::Serialize;
use uuid::Uuid;

use crate::{
    controller::{json_response, org_id, query_parse, Request, Response},
    error::Error,
    model::{
        campaign::{self, CallLog, Campaign, MessageLog},
        run,
    },
};

#[derive(Debug, Serialize)]
struct CampaignSummary {
    #[serde(flatten)]
    pub campaign: Campaign,
    pub answer_rate: f64,
}

impl From<Campaign> for CampaignSummary {
    fn from(campaign: Campaign) -> Self {
        let answer_rate = campaign.answer_rate();
        Self {
            campaign,
            answer_rate,
        }
    }
}

#[derive(Debug, Serialize)]
struct ListResponse {
    pub campaigns: Vec<CampaignSummary>,
}

#[derive(Debug, Serialize)]
struct LogsResponse {
    pub campaign: CampaignSummary,
    pub call_logs: Vec<CallLog>,
    pub message_logs: Vec<MessageLog>,
}

pub async fn list(req: Request) -> Result<Response, Error> {
    let org = org_id(&query_parse(&req))?;
    let campaigns = run(move |conn| campaign::list(conn, org))
        .await?
        .into_iter()
        .map(CampaignSummary::from)
        .collect();

    json_response(StatusCode::OK, &ListResponse { campaigns })
}

pub async fn logs(req: Request, campaign_id: Uuid) -> Result<Response, Error> {
    let org = org_id(&query_parse(&req))?;
    let (found, call_logs, message_logs) = run(move |conn| {
        let found = campaign::find(conn, org, campaign_id)?;
        let call_logs = campaign::list_call_logs(conn, org, campaign_id)?;
        let message_logs = campaign::list_message_logs(conn, org, campaign_id)?;
        Ok((found, call_logs, message_logs))
    })
    .await?;

    json_response(
        StatusCode::OK,
        &LogsResponse {
            campaign: found.into(),
            call_logs,
            message_logs,
        },
    )
}
