use percent_encoding::utf8_percent_encode;
use serde::{Deserialize, Serialize};

use crate::constants::URI_COMPONENT_ENCODE_SET;

#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ShareNetwork {
    Facebook,
    Twitter,
    Whatsapp,
    Linkedin,
}

fn encode(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT_ENCODE_SET).to_string()
}

impl ShareNetwork {
    pub fn share_url(&self, url: &str, text: &str) -> String {
        match self {
            ShareNetwork::Facebook => format!(
                "https://www.facebook.com/sharer/sharer.php?u={}",
                encode(url)
            ),
            ShareNetwork::Twitter => format!(
                "https://twitter.com/intent/tweet?url={}&text={}",
                encode(url),
                encode(text)
            ),
            ShareNetwork::Whatsapp => {
                format!("https://wa.me/?text={}", encode(&format!("{text} {url}")))
            }
            ShareNetwork::Linkedin => format!(
                "https://www.linkedin.com/sharing/share-offsite/?url={}",
                encode(url)
            ),
        }
    }
}
