use crate::error::{BackendAck, ResolveError};
use crate::types::{ConnectionConfig, PageRecord, SiteSettings, TemplateRecord};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::future::Future;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Request/response seam over the remote CMS backend. The production
/// implementation speaks JSON-over-HTTP; tests substitute fakes here.
pub trait Backend: Send + Sync {
    fn test_connection(
        &self,
        config: &ConnectionConfig,
    ) -> impl Future<Output = Result<BackendAck, ResolveError>> + Send;

    fn get_page(
        &self,
        slug: &str,
        config: &ConnectionConfig,
    ) -> impl Future<Output = Result<Option<PageRecord>, ResolveError>> + Send;

    fn get_template(
        &self,
        name: &str,
        config: &ConnectionConfig,
    ) -> impl Future<Output = Result<Option<TemplateRecord>, ResolveError>> + Send;

    fn get_settings(
        &self,
        config: &ConnectionConfig,
    ) -> impl Future<Output = Result<Option<SiteSettings>, ResolveError>> + Send;
}

/// Body posted to every backend action: the credential bag flattened in,
/// plus whichever lookup key the action needs.
#[derive(Serialize)]
struct WireRequest<'a> {
    #[serde(flatten)]
    config: &'a ConnectionConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    slug: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Deserialize)]
struct PageReply {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    page: Option<PageRecord>,
}

#[derive(Deserialize)]
struct TemplateReply {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    template: Option<TemplateRecord>,
}

#[derive(Deserialize)]
struct SettingsReply {
    status: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    settings: Option<SiteSettings>,
}

/// JSON-over-HTTP backend client. Each action posts to
/// `{base}/{action}.php`; timeouts are enforced client-side so a stalled
/// backend cannot block resolution.
pub struct HttpBackend {
    client: reqwest::Client,
    base: Url,
}

impl HttpBackend {
    pub fn new(base: Url, fetch_timeout: Duration) -> Result<Self, ResolveError> {
        let client = reqwest::Client::builder()
            .user_agent("pagefall/0.2")
            .connect_timeout(Duration::from_secs(5))
            .timeout(fetch_timeout)
            .build()?;
        Ok(Self { client, base })
    }

    async fn post<T: DeserializeOwned>(
        &self,
        action: &str,
        body: &WireRequest<'_>,
    ) -> Result<T, ResolveError> {
        let url = self.base.join(&format!("{action}.php"))?;
        let resp = self
            .client
            .post(url)
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        // Parse from text so a malformed body classifies as a data error
        // rather than a transport one.
        let text = resp.text().await?;
        let parsed = serde_json::from_str(&text)?;
        debug!(action, "backend reply parsed");
        Ok(parsed)
    }
}

impl Backend for HttpBackend {
    async fn test_connection(
        &self,
        config: &ConnectionConfig,
    ) -> Result<BackendAck, ResolveError> {
        let body = WireRequest {
            config,
            slug: None,
            name: None,
        };
        self.post("test_connection", &body).await
    }

    async fn get_page(
        &self,
        slug: &str,
        config: &ConnectionConfig,
    ) -> Result<Option<PageRecord>, ResolveError> {
        let body = WireRequest {
            config,
            slug: Some(slug),
            name: None,
        };
        let reply: PageReply = self.post("get_page", &body).await?;
        if reply.status != "success" {
            return Err(ResolveError::Backend(
                reply.message.unwrap_or(reply.status),
            ));
        }
        Ok(reply.page)
    }

    async fn get_template(
        &self,
        name: &str,
        config: &ConnectionConfig,
    ) -> Result<Option<TemplateRecord>, ResolveError> {
        let body = WireRequest {
            config,
            slug: None,
            name: Some(name),
        };
        let reply: TemplateReply = self.post("get_template", &body).await?;
        if reply.status != "success" {
            return Err(ResolveError::Backend(
                reply.message.unwrap_or(reply.status),
            ));
        }
        Ok(reply.template)
    }

    async fn get_settings(
        &self,
        config: &ConnectionConfig,
    ) -> Result<Option<SiteSettings>, ResolveError> {
        let body = WireRequest {
            config,
            slug: None,
            name: None,
        };
        let reply: SettingsReply = self.post("get_settings", &body).await?;
        if reply.status != "success" {
            return Err(ResolveError::Backend(
                reply.message.unwrap_or(reply.status),
            ));
        }
        Ok(reply.settings)
    }
}
