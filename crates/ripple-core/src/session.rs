use crate::broadcast::{OriginChannel, OriginPublisher, OriginSubscriber};
use crate::config::{Config, ConfigError};

/// Per-page-session context: the validated configuration plus the origin
/// channel shared by capture points and the grid owner. Pass it by reference;
/// it lives as long as the session and has no teardown of its own.
#[derive(Debug)]
pub struct Session {
    config: Config,
    origin: OriginChannel,
}

impl Session {
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            origin: OriginChannel::new(),
        })
    }

    #[inline]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[inline]
    pub fn origin(&self) -> &OriginChannel {
        &self.origin
    }

    pub fn publisher(&self) -> OriginPublisher {
        self.origin.publisher()
    }

    pub fn subscriber(&self) -> OriginSubscriber {
        self.origin.subscriber()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self {
            config: Config::default(),
            origin: OriginChannel::new(),
        }
    }
}
