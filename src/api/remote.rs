//! Purpose: HTTP client for the remote posts resource.
//! Exports: `RemoteClient`, `DEFAULT_BASE_URL`.
//! Role: One method per REST operation; maps transport/status failures to `ErrorKind`.
//! Invariants: Base URLs are http/https with no path, query, or fragment.
//! Invariants: Each operation issues exactly one request; no retry.

use crate::core::error::{Error, ErrorKind};
use crate::core::post::{Draft, Post, PostPatch, UpdatedFields};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

type ApiResult<T> = Result<T, Error>;

#[derive(Clone)]
pub struct RemoteClient {
    inner: Arc<RemoteClientInner>,
}

struct RemoteClientInner {
    base_url: Url,
    agent: ureq::Agent,
}

impl RemoteClient {
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let base_url = normalize_base_url(base_url.into())?;
        let agent = ureq::AgentBuilder::new().build();
        Ok(Self {
            inner: Arc::new(RemoteClientInner { base_url, agent }),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    /// `GET /posts`: the full collection, in server order.
    pub fn posts(&self) -> ApiResult<Vec<Post>> {
        let url = build_url(&self.inner.base_url, &["posts"])?;
        self.request_json("GET", &url, &())
    }

    /// `POST /posts`: create from a draft; the server assigns the id.
    pub fn create_post(&self, draft: &Draft) -> ApiResult<Post> {
        let url = build_url(&self.inner.base_url, &["posts"])?;
        self.request_json("POST", &url, draft)
    }

    /// `PUT /posts/{id}`: partial update; returns whatever fields came back.
    pub fn update_post(&self, id: u64, patch: &PostPatch) -> ApiResult<UpdatedFields> {
        let url = build_url(&self.inner.base_url, &["posts", &id.to_string()])?;
        self.request_json("PUT", &url, patch)
            .map_err(|err| err.with_post_id(id))
    }

    /// `DELETE /posts/{id}`: the response body is ignored.
    pub fn delete_post(&self, id: u64) -> ApiResult<()> {
        let url = build_url(&self.inner.base_url, &["posts", &id.to_string()])?;
        self.request_discard("DELETE", &url)
            .map_err(|err| err.with_post_id(id))
    }

    fn request_json<T, R>(&self, method: &str, url: &Url, body: &T) -> ApiResult<R>
    where
        T: Serialize,
        R: DeserializeOwned,
    {
        let response = self.dispatch(method, url, body)?;
        read_json_response(response)
    }

    fn request_discard(&self, method: &str, url: &Url) -> ApiResult<()> {
        let response = self.dispatch(method, url, &())?;
        let _ = response.into_string();
        Ok(())
    }

    fn dispatch<T: Serialize>(&self, method: &str, url: &Url, body: &T) -> ApiResult<ureq::Response> {
        debug!(method, url = %url, "request");
        let request = self
            .inner
            .agent
            .request(method, url.as_str())
            .set("Accept", "application/json");
        let response = if method == "GET" || method == "DELETE" {
            request.call()
        } else {
            let payload = serde_json::to_string(body).map_err(|err| {
                Error::new(ErrorKind::Internal)
                    .with_message("failed to encode request json")
                    .with_source(err)
            })?;
            request
                .set("Content-Type", "application/json")
                .send_string(&payload)
        };

        match response {
            Ok(resp) => Ok(resp),
            Err(ureq::Error::Status(status, resp)) => Err(status_error(status, resp)),
            Err(ureq::Error::Transport(err)) => Err(Error::new(ErrorKind::Network)
                .with_message("request failed")
                .with_source(err)),
        }
    }
}

fn normalize_base_url(raw: String) -> ApiResult<Url> {
    let mut url = Url::parse(&raw).map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message("invalid base url")
            .with_source(err)
    })?;
    let scheme = url.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(Error::new(ErrorKind::Usage).with_message("base url must use http or https scheme"));
    }
    if url.path() != "/" && !url.path().is_empty() {
        return Err(Error::new(ErrorKind::Usage).with_message("base url must not include a path"));
    }
    url.set_path("/");
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}

fn build_url(base_url: &Url, segments: &[&str]) -> ApiResult<Url> {
    let mut url = base_url.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|_| Error::new(ErrorKind::Usage).with_message("base url cannot be a base"))?;
        path.clear();
        for segment in segments {
            path.push(segment);
        }
    }
    Ok(url)
}

fn read_json_response<R>(response: ureq::Response) -> ApiResult<R>
where
    R: DeserializeOwned,
{
    let body = response.into_string().map_err(|err| {
        Error::new(ErrorKind::Network)
            .with_message("failed to read response body")
            .with_source(err)
    })?;
    serde_json::from_str(&body).map_err(|err| {
        Error::new(ErrorKind::Decode)
            .with_message("invalid response json")
            .with_source(err)
    })
}

fn status_error(status: u16, response: ureq::Response) -> Error {
    let _ = response.into_string();
    let kind = match status {
        404 => ErrorKind::NotFound,
        400..=499 => ErrorKind::Validation,
        _ => ErrorKind::Upstream,
    };
    Error::new(kind)
        .with_message(format!("remote error status {status}"))
        .with_status(status)
}
