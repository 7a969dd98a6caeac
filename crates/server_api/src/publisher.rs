use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use shared::protocol::BlogEvent;
use tracing::debug;
use url::Url;

#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: &BlogEvent) -> Result<()>;
}

pub struct NoopEventPublisher;

#[async_trait]
impl EventPublisher for NoopEventPublisher {
    async fn publish(&self, event: &BlogEvent) -> Result<()> {
        debug!(event = event.kind(), "no event bus configured, dropping event");
        Ok(())
    }
}

pub struct HttpEventPublisher {
    http: Client,
    events_url: Url,
}

impl HttpEventPublisher {
    pub fn new(events_url: Url, timeout: Duration) -> Result<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build event bus http client")?;
        Ok(Self { http, events_url })
    }
}

#[async_trait]
impl EventPublisher for HttpEventPublisher {
    async fn publish(&self, event: &BlogEvent) -> Result<()> {
        self.http
            .post(self.events_url.clone())
            .json(event)
            .send()
            .await
            .with_context(|| format!("failed to reach event bus at {}", self.events_url))?
            .error_for_status()
            .with_context(|| format!("event bus at {} rejected event", self.events_url))?;
        debug!(event = event.kind(), url = %self.events_url, "event delivered");
        Ok(())
    }
}
