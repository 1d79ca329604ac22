use gloo::storage::{LocalStorage, Storage};
use pixelwar_core::Preferences;

/// [`Preferences`] kept in the browser's local storage.
#[derive(Copy, Clone, Debug, Default)]
pub(crate) struct BrowserPreferences;

impl Preferences for BrowserPreferences {
    fn load(&self, key: &str) -> Option<String> {
        LocalStorage::get(key).ok()
    }

    fn save(&mut self, key: &str, value: &str) {
        if let Err(err) = LocalStorage::set(key, value) {
            log::error!("Could not save {} to local storage: {:?}", key, err);
        }
    }

    fn forget(&mut self, key: &str) {
        LocalStorage::delete(key);
    }
}
