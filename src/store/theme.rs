use parking_lot::RwLock;
use std::sync::Arc;

use crate::models::ThemeMode;

#[derive(Clone)]
pub struct ThemeStore {
    mode: Arc<RwLock<ThemeMode>>,
}

impl ThemeStore {
    pub fn new(initial: ThemeMode) -> Self {
        Self {
            mode: Arc::new(RwLock::new(initial)),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        *self.mode.read()
    }

    /// Flips light/dark and returns the new mode.
    pub fn toggle(&self) -> ThemeMode {
        let mut mode = self.mode.write();
        *mode = mode.toggled();
        *mode
    }

    pub fn set(&self, mode: ThemeMode) {
        *self.mode.write() = mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_and_set() {
        let store = ThemeStore::new(ThemeMode::Light);

        assert_eq!(store.toggle(), ThemeMode::Dark);
        assert_eq!(store.mode(), ThemeMode::Dark);
        assert_eq!(store.toggle(), ThemeMode::Light);

        store.set(ThemeMode::Dark);
        assert_eq!(store.mode(), ThemeMode::Dark);
    }
}
