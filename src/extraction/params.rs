//! User parameters controlling frame extraction.

use crate::config::params::{ParamError, ParamHandle, ParamRegistry, ParamSpec, UserInput};
use crate::extraction::options::{ExtractionOptions, UNSET_BOUND};

/// Parameter group shown alongside other output tweaks.
pub const GROUP_OTHER_FIXES: &str = "Other Fixes";

/// Handles for the four extraction parameters.
#[derive(Debug, Clone)]
pub struct ExtractionParams {
    pub save_first: ParamHandle<bool>,
    pub save_last: ParamHandle<bool>,
    pub range_start: ParamHandle<i64>,
    pub range_end: ParamHandle<i64>,
}

impl ExtractionParams {
    pub fn register(registry: &mut ParamRegistry) -> Result<Self, ParamError> {
        let save_first = registry.register::<bool>(
            ParamSpec::new("Save First Frame", "false")
                .description("When enabled, the first frame of the video will be saved and output")
                .group(GROUP_OTHER_FIXES)
                .order_priority(30.0)
                .ignore_if("false"),
        )?;
        let save_last = registry.register::<bool>(
            ParamSpec::new("Save Last Frame", "false")
                .description("When enabled, the last frame of the video will be saved and output")
                .group(GROUP_OTHER_FIXES)
                .order_priority(31.0)
                .ignore_if("false"),
        )?;
        let range_start = registry.register::<i64>(
            ParamSpec::new("Save Frame Range Start", "-1")
                .description(
                    "First frame (0-based) of a range of frames to save and output. \
                     -1 disables range saving",
                )
                .group(GROUP_OTHER_FIXES)
                .order_priority(32.0)
                .ignore_if("-1"),
        )?;
        let range_end = registry.register::<i64>(
            ParamSpec::new("Save Frame Range End", "-1")
                .description(
                    "Last frame (0-based, inclusive) of a range of frames to save and output. \
                     -1 disables range saving",
                )
                .group(GROUP_OTHER_FIXES)
                .order_priority(33.0)
                .ignore_if("-1"),
        )?;

        Ok(Self {
            save_first,
            save_last,
            range_start,
            range_end,
        })
    }

    /// Options for the current build.
    pub fn resolve(&self, input: &UserInput) -> ExtractionOptions {
        ExtractionOptions {
            save_first: input.get(&self.save_first, false),
            save_last: input.get(&self.save_last, false),
            range_start: input.get(&self.range_start, UNSET_BOUND),
            range_end: input.get(&self.range_end, UNSET_BOUND),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_register_all_params() {
        let mut registry = ParamRegistry::new();
        ExtractionParams::register(&mut registry).unwrap();

        let ids: Vec<_> = registry.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["savefirstframe", "savelastframe", "saveframerangestart", "saveframerangeend"]
        );
        assert!(registry
            .iter()
            .all(|p| p.spec.group.as_deref() == Some(GROUP_OTHER_FIXES)));
    }

    #[test]
    fn test_resolve_unset_input() {
        let mut registry = ParamRegistry::new();
        let params = ExtractionParams::register(&mut registry).unwrap();
        assert_eq!(params.resolve(&UserInput::new()), ExtractionOptions::default());
    }

    #[test]
    fn test_resolve_supplied_input() {
        let mut registry = ParamRegistry::new();
        let params = ExtractionParams::register(&mut registry).unwrap();
        let mut input = UserInput::new();
        input.set(&params.save_last, true);
        input.set_raw("Save Frame Range Start", json!(3));
        input.set_raw("Save Frame Range End", json!("5"));

        let options = params.resolve(&input);
        assert_eq!(options, ExtractionOptions::new().with_last().with_range(3, 5));
    }

    #[test]
    fn test_register_twice_fails() {
        let mut registry = ParamRegistry::new();
        ExtractionParams::register(&mut registry).unwrap();
        let err = ExtractionParams::register(&mut registry).unwrap_err();
        assert_eq!(err, ParamError::DuplicateParam { id: "savefirstframe".into() });
    }
}
