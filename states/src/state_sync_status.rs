#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StateSyncStatus {
    /// Registered but never observed by `run_computed`.
    #[default]
    BeforeInit,
    /// Changed since the last `run_computed`.
    Dirty,
    Clean,
}

impl StateSyncStatus {
    pub fn needs_compute(self) -> bool {
        !matches!(self, Self::Clean)
    }
}
