//! Persona lookup: biases the tone of the improved example toward a known employee.

/// Employees the e-learning scenarios know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownEmployee {
    Jordan,
    Alex,
    Taylor,
    AlexRivera,
}

impl KnownEmployee {
    /// Matches an already-normalized (trimmed, lower-cased) key.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "jordan" => Some(KnownEmployee::Jordan),
            "alex" => Some(KnownEmployee::Alex),
            "taylor" => Some(KnownEmployee::Taylor),
            "rivera" | "alex rivera" => Some(KnownEmployee::AlexRivera),
            _ => None,
        }
    }

    pub fn descriptor(self) -> &'static str {
        match self {
            KnownEmployee::Jordan => {
                "Jordan is collaborative and positive, but underestimates task time. \
                 Benefits from clearer planning and milestone check-ins."
            }
            KnownEmployee::Alex => {
                "Alex is detail-oriented and produces high quality work, but can get stuck polishing. \
                 Benefits from time-boxing and clear priorities."
            }
            KnownEmployee::Taylor => {
                "Taylor is strong with customers but context switches often. \
                 Benefits from focused work blocks and explicit handoff notes."
            }
            KnownEmployee::AlexRivera => {
                "Alex Rivera values autonomy and concise feedback. \
                 Responds well to concrete examples and measurable next steps."
            }
        }
    }
}

/// Returns the persona descriptor for `employee`, or `""` when unknown.
pub fn persona_for(employee: &str) -> &'static str {
    let key = employee.trim().to_lowercase();
    KnownEmployee::from_key(&key)
        .map(KnownEmployee::descriptor)
        .unwrap_or("")
}
