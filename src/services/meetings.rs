//! Video meeting link generation
//!
//! Scheduled follow-up visits can carry a generated video-meeting link. Links
//! are rooms under a configurable meeting host, named after the church slug
//! plus a random code so they are hard to guess.

use rand::distributions::Alphanumeric;
use rand::Rng;
use url::Url;

use crate::config::settings::MeetingConfig;
use crate::utils::errors::{FlockKeeperError, Result};

const ROOM_CODE_LEN: usize = 8;

#[derive(Debug, Clone)]
pub struct MeetingService {
    base_url: Url,
}

impl MeetingService {
    /// Create a new MeetingService instance
    pub fn new(config: &MeetingConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(FlockKeeperError::Config(format!(
                "Meeting base URL is not usable: {}",
                config.base_url
            )));
        }

        Ok(Self { base_url })
    }

    /// Generate a meeting link for a church's follow-up visit
    pub fn create_link(&self, church_slug: &str) -> String {
        let code: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(ROOM_CODE_LEN)
            .map(|c| (c as char).to_ascii_lowercase())
            .collect();

        let room = format!("{}-{}", church_slug, code);
        let mut link = self.base_url.clone();
        link.set_path(&room);
        link.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> MeetingService {
        MeetingService::new(&MeetingConfig {
            base_url: "https://meet.jit.si".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_link_contains_slug_and_code() {
        let link = service().create_link("grace-chapel");
        assert!(link.starts_with("https://meet.jit.si/grace-chapel-"));

        let code = link.rsplit('-').next().unwrap();
        assert_eq!(code.len(), ROOM_CODE_LEN);
        assert!(code.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
    }

    #[test]
    fn test_links_are_unique() {
        let service = service();
        let a = service.create_link("grace-chapel");
        let b = service.create_link("grace-chapel");
        assert_ne!(a, b);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let result = MeetingService::new(&MeetingConfig {
            base_url: "not a url".to_string(),
        });
        assert!(result.is_err());
    }
}
