use crate::error::MtakaError;
use crate::profile::schema::DatasetProfile;
use crate::profile::validate_profile;

const CRICHOW_JSON: &str = include_str!("../../../../profiles/crichow.json");
const CRICHOW_MIXED_JSON: &str = include_str!("../../../../profiles/crichow-mixed.json");

/// Available predefined dataset profiles.
pub const PRESETS: &[&str] = &["crichow", "crichow-mixed"];

/// Profile used when none is given.
pub const DEFAULT_PRESET: &str = "crichow";

/// Load a predefined profile by name.
pub fn load_preset(name: &str) -> Result<DatasetProfile, MtakaError> {
    let json = match name {
        "crichow" => CRICHOW_JSON,
        "crichow-mixed" => CRICHOW_MIXED_JSON,
        _ => {
            return Err(MtakaError::ProfileInvalid(format!(
                "unknown preset '{}'. Available: {}",
                name,
                PRESETS.join(", ")
            )))
        }
    };
    let profile: DatasetProfile = serde_json::from_str(json)?;
    validate_profile(&profile)?;
    Ok(profile)
}
