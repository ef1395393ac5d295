use gove_business::{BusinessConfig, register};
use gove_states::StateCtx;

/// The main application state.
pub struct State {
    /// The state context for business logic.
    pub ctx: StateCtx,
}

impl State {
    pub fn new(config: BusinessConfig) -> Self {
        let mut ctx = StateCtx::new();
        register(&mut ctx, config);
        Self { ctx }
    }

    /// State talking to `base_url`, used against mock servers.
    pub fn test(base_url: impl AsRef<str>) -> Self {
        Self::new(BusinessConfig::new(base_url))
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new(BusinessConfig::default())
    }
}
