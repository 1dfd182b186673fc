use cruiser_sync_shared::NetworkSettings;

/// Produces this peer's settings from whatever local configuration the game
/// keeps. Called once at the start of every session.
pub trait SettingsSource: Send {
    fn load(&self) -> NetworkSettings;
}

impl<F: Fn() -> NetworkSettings + Send> SettingsSource for F {
    fn load(&self) -> NetworkSettings {
        self()
    }
}
