use std::time::Duration;

use anyhow::Context as _;
use encoding_rs::{Encoding, UTF_8};
use reqwest::StatusCode;
use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};

const USER_AGENT_VALUE: &str = concat!("page-analyzer/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: usize = 10;
/// How far into the body a `<meta charset>` declaration is looked for.
const META_SNIFF_BYTES: usize = 1024;

#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: StatusCode,
    pub body: String,
    pub truncated: bool,
}

/// Result of a single GET against a monitored site.
#[derive(Debug)]
pub enum FetchOutcome {
    /// A response arrived with a status below 400.
    Success(FetchedPage),
    /// A response arrived with a 4xx/5xx status. Still carries the page.
    RemoteError(FetchedPage),
    /// No usable response: DNS, connect, TLS, timeout or a broken body.
    ConnectionFailure(anyhow::Error),
}

impl FetchOutcome {
    pub fn page(&self) -> Option<&FetchedPage> {
        match self {
            Self::Success(page) | Self::RemoteError(page) => Some(page),
            Self::ConnectionFailure(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
    max_body_bytes: usize,
}

impl PageFetcher {
    pub fn new(timeout: Duration, max_body_bytes: usize) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()
            .context("build page fetcher http client")?;

        Ok(Self {
            client,
            max_body_bytes,
        })
    }

    pub async fn fetch(&self, url: &str) -> FetchOutcome {
        let resp = match self
            .client
            .get(url)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .header(ACCEPT, "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8")
            .send()
            .await
            .with_context(|| format!("GET {url}"))
        {
            Ok(resp) => resp,
            Err(err) => return FetchOutcome::ConnectionFailure(err),
        };

        let status = resp.status();
        let content_type = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let (bytes, truncated) = match read_bytes_limited(resp, self.max_body_bytes).await {
            Ok(read) => read,
            Err(err) => {
                return FetchOutcome::ConnectionFailure(
                    err.context(format!("read body of {url}")),
                );
            }
        };
        if truncated {
            tracing::debug!(url, limit = self.max_body_bytes, "response body truncated");
        }
        let body = decode_body(&bytes, content_type.as_deref());

        let page = FetchedPage {
            status,
            body,
            truncated,
        };
        if status.is_client_error() || status.is_server_error() {
            FetchOutcome::RemoteError(page)
        } else {
            FetchOutcome::Success(page)
        }
    }
}

async fn read_bytes_limited(
    mut resp: reqwest::Response,
    limit: usize,
) -> anyhow::Result<(Vec<u8>, bool)> {
    let mut out: Vec<u8> = Vec::new();
    let mut truncated = false;

    while let Some(chunk) = resp.chunk().await.context("read response chunk")? {
        if out.len() + chunk.len() > limit {
            let remaining = limit.saturating_sub(out.len());
            out.extend_from_slice(&chunk[..remaining]);
            truncated = true;
            break;
        }
        out.extend_from_slice(&chunk);
    }

    Ok((out, truncated))
}

/// Decodes a page using the `Content-Type` charset, then a `<meta>` declaration
/// near the top of the document, then UTF-8. A byte order mark wins over all three.
fn decode_body(bytes: &[u8], content_type: Option<&str>) -> String {
    let encoding = content_type
        .and_then(charset_param)
        .or_else(|| meta_charset(bytes))
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);
    let (text, _, _) = encoding.decode(bytes);
    text.into_owned()
}

fn charset_param(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|param| {
        let (key, value) = param.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches(|c| c == '"' || c == '\'').to_string())
            .filter(|v| !v.is_empty())
    })
}

/// Finds `charset=...` inside the first few hundred bytes, which covers both
/// `<meta charset="...">` and the `http-equiv="Content-Type"` form.
fn meta_charset(bytes: &[u8]) -> Option<String> {
    let head = bytes[..bytes.len().min(META_SNIFF_BYTES)].to_ascii_lowercase();
    let head = String::from_utf8_lossy(&head);
    let meta = head.find("<meta")?;
    let at = head[meta..].find("charset=")? + meta + "charset=".len();
    let label: String = head[at..]
        .trim_start_matches(['"', '\''])
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | ':' | '.'))
        .collect();
    (!label.is_empty()).then_some(label)
}
