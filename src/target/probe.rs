use super::{ProbeError, ProbeResult};
use crate::config::{Attrs, TargetId};
use reqwest::{blocking::Client, header::ACCEPT};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// What a server reports about itself when asked how to log in.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerInfo {
    pub prompts: Attrs,
    pub token_endpoint: Option<String>,
}

/// Checks that a target is reachable and is a server of the expected kind.
pub trait Probe {
    fn probe(&self, target: &TargetId) -> ProbeResult<ServerInfo>;
}

impl<P: Probe + ?Sized> Probe for &P {
    fn probe(&self, target: &TargetId) -> ProbeResult<ServerInfo> {
        (**self).probe(target)
    }
}

/// Asks `{target}/login` for its prompts over HTTP.
pub struct HttpProbe {
    client: Client,
}

#[derive(Deserialize)]
struct LoginReply {
    prompts: Option<Attrs>,
    token_endpoint: Option<String>,
}

impl HttpProbe {
    pub fn new(timeout: Duration) -> ProbeResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("authctl/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl Probe for HttpProbe {
    fn probe(&self, target: &TargetId) -> ProbeResult<ServerInfo> {
        let url = format!("{target}/login");
        debug!(%url, "probing target");

        let response = self
            .client
            .get(&url)
            .header(ACCEPT, "application/json")
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProbeError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let reply: LoginReply = response
            .json()
            .map_err(|_| ProbeError::InvalidResponse { url: url.clone() })?;

        let Some(prompts) = reply.prompts else {
            return Err(ProbeError::InvalidResponse { url });
        };

        Ok(ServerInfo {
            prompts,
            token_endpoint: reply.token_endpoint,
        })
    }
}
