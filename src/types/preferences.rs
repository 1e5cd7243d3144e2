use serde::{Deserialize, Serialize};

/// Landing page choices persisted in `localStorage`.
#[derive(Clone, PartialEq, Eq, Default, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub dark_mode: bool,
    pub favorites: Vec<u64>,
}

impl Preferences {
    pub fn is_favorite(&self, service_id: u64) -> bool {
        self.favorites.contains(&service_id)
    }
    /// Returns whether the service is a favorite after the toggle.
    pub fn toggle_favorite(&mut self, service_id: u64) -> bool {
        match self.favorites.iter().position(|id| *id == service_id) {
            Some(position) => {
                self.favorites.remove(position);
                false
            }
            None => {
                self.favorites.push(service_id);
                true
            }
        }
    }
}
