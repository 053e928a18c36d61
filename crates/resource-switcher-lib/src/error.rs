use thiserror::Error;

/// Convenient result alias for the resource switcher library.
pub type Result<T> = std::result::Result<T, Error>;

/// Configuration problems detected while building compartments, loadouts and
/// switchers.
///
/// These never surface during interactive use. They are stored on the owning
/// loadout or switcher, which is then excluded from selection.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// A required field was absent from a configuration record.
    #[error("{record}: missing value for {field}")]
    MissingField { record: String, field: &'static str },

    /// Compartment ratios of a loadout do not add up to 1.
    #[error("loadout {loadout} has invalid resource ratios (total {total}, must total 1)")]
    InvalidRatioSum { loadout: String, total: f64 },

    /// A compartment references a resource the library does not know about.
    #[error("no resource definition found for {resource}{}", format_suggestions(.suggestions))]
    UnknownResource {
        resource: String,
        suggestions: Vec<String>,
    },

    /// A loadout declared no compartments at all.
    #[error("loadout {loadout} declares no compartments")]
    NoCompartments { loadout: String },

    /// Two loadouts on the same switcher share an id.
    #[error("loadout id {loadout} is already used on switcher {switcher}")]
    DuplicateLoadoutId { switcher: String, loadout: String },

    /// A loadout was sized for a different container volume than its switcher.
    #[error("loadout {loadout} is sized for volume {loadout_volume}, but switcher {switcher} holds {switcher_volume}")]
    VolumeMismatch {
        switcher: String,
        loadout: String,
        loadout_volume: f64,
        switcher_volume: f64,
    },

    /// A switcher volume is not a finite positive number.
    #[error("switcher {switcher} volume must be a finite positive number, got {volume}")]
    InvalidVolume { switcher: String, volume: f64 },

    /// A resource definition failed validation.
    #[error("invalid resource definition: {message}")]
    InvalidResourceDefinition { message: String },
}

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Wrapper for configuration errors that reached an API returning `Result`.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Raised when a resource could not be resolved while computing loadout metadata.
    #[error("loadout {loadout}: resource {resource} could not be resolved")]
    Lookup { loadout: String, resource: String },

    /// Raised when a selection does not point at a usable loadout.
    #[error("invalid selection on switcher {switcher} (index {index}): {reason}")]
    InvalidSelection {
        switcher: String,
        index: usize,
        reason: String,
    },

    /// Raised when a texture or material update could not be applied.
    #[error("cosmetic update failed: {message}")]
    Cosmetic { message: String },

    /// Raised when a switcher id is not registered.
    #[error("unknown switcher: {id}{}", format_suggestions(.suggestions))]
    UnknownSwitcher {
        id: String,
        suggestions: Vec<String>,
    },

    /// Raised when a loadout id is not declared on the given switcher.
    #[error("switcher {switcher} has no loadout {loadout}{}", format_suggestions(.suggestions))]
    UnknownLoadout {
        switcher: String,
        loadout: String,
        suggestions: Vec<String>,
    },

    /// Raised when resource catalog data fails validation.
    #[error("invalid resource data: {message}")]
    ResourceData { message: String },

    /// Raised when duplicate resource names are encountered during catalog load.
    #[error("duplicate resource name encountered: {name}")]
    DuplicateResource { name: String },

    /// Raised when swap-cost text cannot be parsed.
    #[error("invalid resource ratios '{text}': {message}")]
    InvalidResourceRatios { text: String, message: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON parsing errors.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

/// Rank `candidates` by similarity to `needle` and return the closest few.
pub(crate) fn suggest<'a, I>(needle: &str, candidates: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = needle.to_lowercase();
    let mut scored: Vec<(f64, &str)> = candidates
        .into_iter()
        .map(|candidate| {
            (
                strsim::jaro_winkler(&needle, &candidate.to_lowercase()),
                candidate,
            )
        })
        .filter(|(score, _)| *score >= 0.8)
        .collect();
    scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    scored
        .into_iter()
        .take(3)
        .map(|(_, name)| name.to_string())
        .collect()
}
