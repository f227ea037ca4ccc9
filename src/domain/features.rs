//! Feature-selection resolution for the optional install packages.

use crate::domain::AppError;
use crate::ports::Prompter;

/// Raw feature flags as given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureFlags {
    pub horizon: bool,
    pub reverb: bool,
    pub telescope: bool,
    pub all: bool,
}

/// The resolved three-way selection of optional subsystems.
///
/// Derived once per invocation and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureSelection {
    pub horizon: bool,
    pub reverb: bool,
    pub telescope: bool,
}

impl FeatureSelection {
    pub const ALL: FeatureSelection =
        FeatureSelection { horizon: true, reverb: true, telescope: true };
}

/// Resolve the feature selection from flags, falling back to prompts.
///
/// Precedence: `--all` wins over individual flags; any individual flag then
/// selects exactly the flagged subsystems; non-interactive runs with no flags
/// enable everything; otherwise one yes/no prompt per feature (default yes).
pub fn resolve_features(
    flags: FeatureFlags,
    no_interaction: bool,
    prompter: &dyn Prompter,
) -> Result<FeatureSelection, AppError> {
    if flags.all {
        return Ok(FeatureSelection::ALL);
    }

    if flags.horizon || flags.reverb || flags.telescope {
        return Ok(FeatureSelection {
            horizon: flags.horizon,
            reverb: flags.reverb,
            telescope: flags.telescope,
        });
    }

    if no_interaction {
        return Ok(FeatureSelection::ALL);
    }

    Ok(FeatureSelection {
        horizon: prompter.confirm("Install Laravel Horizon? (Redis-based queue management)", true)?,
        reverb: prompter.confirm("Install Laravel Reverb? (WebSocket server)", true)?,
        telescope: prompter.confirm("Install Laravel Telescope? (Debugging & monitoring)", true)?,
    })
}
