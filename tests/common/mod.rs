//! In-process mock of the scraping API used by the integration tests

#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use std::collections::{HashMap, VecDeque};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use channelscout::api::models::ScrapeRequest;

/// One scripted answer of `GET /data/{job_id}`
#[derive(Clone, Debug)]
pub enum StatusReply {
    Json(Value),
    Http(StatusCode),
    Garbage,
}

pub fn processing() -> StatusReply {
    StatusReply::Json(json!({ "status": "processing" }))
}

pub fn queued() -> StatusReply {
    StatusReply::Json(json!({ "status": "queued" }))
}

pub fn completed(channels: Value) -> StatusReply {
    StatusReply::Json(json!({ "status": "completed", "channel_details": channels }))
}

pub fn failed(error: &str) -> StatusReply {
    StatusReply::Json(json!({ "status": "failed", "error": error }))
}

#[derive(Default)]
struct Inner {
    /// Script per query; assigned to the job when it is submitted
    plans: HashMap<String, Vec<StatusReply>>,
    /// Remaining replies per job; the final reply repeats
    jobs: HashMap<String, VecDeque<StatusReply>>,
    rejection: Option<(StatusCode, Option<String>)>,
    submissions: Vec<ScrapeRequest>,
    submit_headers: Vec<HeaderMap>,
    status_calls: HashMap<String, u32>,
}

#[derive(Clone, Default)]
pub struct MockApi {
    inner: Arc<Mutex<Inner>>,
}

impl MockApi {
    /// Script the status replies for jobs created with `query`
    pub fn plan(&self, query: &str, replies: Vec<StatusReply>) {
        self.inner
            .lock()
            .unwrap()
            .plans
            .insert(query.to_string(), replies);
    }

    /// Make `POST /scrape` fail with `status`, optionally carrying a `detail` body
    pub fn reject_submissions(&self, status: StatusCode, detail: Option<&str>) {
        self.inner.lock().unwrap().rejection = Some((status, detail.map(str::to_string)));
    }

    pub fn submissions(&self) -> Vec<ScrapeRequest> {
        self.inner.lock().unwrap().submissions.clone()
    }

    pub fn submit_headers(&self) -> Vec<HeaderMap> {
        self.inner.lock().unwrap().submit_headers.clone()
    }

    pub fn status_calls(&self, job_id: &str) -> u32 {
        self.inner
            .lock()
            .unwrap()
            .status_calls
            .get(job_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_status_calls(&self) -> u32 {
        self.inner.lock().unwrap().status_calls.values().sum()
    }

    /// Start the mock on a random local port and return its base URL
    pub async fn serve(&self) -> String {
        let app = Router::new()
            .route("/scrape", post(submit))
            .route("/data/{job_id}", get(status))
            .route("/download/{job_id}/{kind}", get(download))
            .with_state(self.clone());

        let addr = SocketAddr::from(([127, 0, 0, 1], 0));
        let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
        let bound_addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", bound_addr)
    }
}

async fn submit(
    State(api): State<MockApi>,
    headers: HeaderMap,
    Json(request): Json<ScrapeRequest>,
) -> Response {
    let mut inner = api.inner.lock().unwrap();
    inner.submissions.push(request.clone());
    inner.submit_headers.push(headers);

    if let Some((status, detail)) = inner.rejection.clone() {
        return match detail {
            Some(detail) => (status, Json(json!({ "detail": detail }))).into_response(),
            None => (status, "upstream unavailable").into_response(),
        };
    }

    let job_id = Uuid::now_v7().to_string();
    let plan = inner
        .plans
        .get(&request.search_query)
        .cloned()
        .unwrap_or_else(|| vec![processing()]);
    inner.jobs.insert(job_id.clone(), plan.into());

    Json(json!({ "job_id": job_id })).into_response()
}

async fn status(State(api): State<MockApi>, Path(job_id): Path<String>) -> Response {
    let mut inner = api.inner.lock().unwrap();
    *inner.status_calls.entry(job_id.clone()).or_default() += 1;

    let Some(replies) = inner.jobs.get_mut(&job_id) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    let reply = if replies.len() > 1 {
        replies.pop_front()
    } else {
        replies.front().cloned()
    };

    match reply {
        Some(StatusReply::Json(body)) => Json(body).into_response(),
        Some(StatusReply::Http(code)) => code.into_response(),
        Some(StatusReply::Garbage) => (
            [(header::CONTENT_TYPE, "application/json")],
            "{\"status\": ",
        )
            .into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn download(
    State(api): State<MockApi>,
    Path((job_id, kind)): Path<(String, String)>,
) -> Response {
    let inner = api.inner.lock().unwrap();
    if !inner.jobs.contains_key(&job_id) {
        return StatusCode::NOT_FOUND.into_response();
    }

    let body = match kind.as_str() {
        "details" => "Channel URL,Nationality\nhttps://www.youtube.com/@tabby,Norway\n",
        "urls" => "Channel URL\nhttps://www.youtube.com/@tabby\n",
        _ => return StatusCode::BAD_REQUEST.into_response(),
    };

    ([(header::CONTENT_TYPE, "text/csv; charset=utf-8")], body).into_response()
}

/// Channel record in server shape
pub fn raw_channel(handle: &str, nationality: &str, videos: &str) -> Value {
    json!({
        "channel_url": format!("https://www.youtube.com/@{}", handle),
        "nationality": nationality,
        "joined_on": "Joined Feb 2, 2016",
        "subscribers": "48.1K subscribers",
        "videos_count": videos,
        "total_views": "Not found",
    })
}
