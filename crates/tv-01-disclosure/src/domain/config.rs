//! Engine configuration.

/// Twelve hours, the default pre-release window.
pub const DEFAULT_PRE_RELEASE_WINDOW_SECS: u64 = 12 * 60 * 60;

/// Default cap on proposals returned by one upkeep check.
pub const DEFAULT_MAX_UPKEEP_BATCH: usize = 256;

/// Disclosure engine configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisclosureConfig {
    /// How long before `release_time` an entry enters `ReleaseRequested` (seconds)
    pub pre_release_window_secs: u64,
    /// Maximum proposals returned by a single `check_due`
    pub max_upkeep_batch: usize,
    /// Reject submissions whose payload does not digest to the supplied hash.
    /// Forced on while `verify_on_disclosure` is set, see [`Self::checks_on_add`].
    pub verify_on_add: bool,
    /// Re-digest the stored payload before every gate pull
    pub verify_on_disclosure: bool,
}

impl Default for DisclosureConfig {
    fn default() -> Self {
        Self {
            pre_release_window_secs: DEFAULT_PRE_RELEASE_WINDOW_SECS,
            max_upkeep_batch: DEFAULT_MAX_UPKEEP_BATCH,
            verify_on_add: true,
            verify_on_disclosure: true,
        }
    }
}

impl DisclosureConfig {
    /// Config with a different pre-release window.
    pub fn with_window(mut self, secs: u64) -> Self {
        self.pre_release_window_secs = secs;
        self
    }

    /// Config with a different batch cap. A cap of zero is raised to one.
    pub fn with_max_batch(mut self, max: usize) -> Self {
        self.max_upkeep_batch = max.max(1);
        self
    }

    /// Whether `add_entry` digests the payload before storing it.
    ///
    /// A gate that re-digests on every pull would refuse a mismatched entry
    /// forever, so such entries must be turned away at submission.
    pub fn checks_on_add(&self) -> bool {
        self.verify_on_add || self.verify_on_disclosure
    }
}
