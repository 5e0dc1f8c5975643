use std::path::PathBuf;

/// Server configuration, immutable after construction.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host:port the HTTP listener binds to.
    pub listen_addr: String,
    /// Host:port of the upstream TCP target, dialed once per relay.
    pub target_addr: String,
    /// Directory served as static content. None disables static serving;
    /// a value equal to the process working directory refuses at startup.
    pub web_root: Option<PathBuf>,
}

impl ServerConfig {
    pub fn new(listen_addr: impl Into<String>, target_addr: impl Into<String>) -> Self {
        Self {
            listen_addr: listen_addr.into(),
            target_addr: target_addr.into(),
            web_root: None,
        }
    }

    pub fn with_web_root(mut self, web_root: impl Into<PathBuf>) -> Self {
        self.web_root = Some(web_root.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpgradeDecision {
    Accept,
    Rejected { reason: String },
}
