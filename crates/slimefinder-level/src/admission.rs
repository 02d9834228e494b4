use slimefinder_common::{Result, SlimeError};

pub const MIN_LEVEL_FILE_LEN: u64 = 100;
pub const MAX_LEVEL_FILE_LEN: u64 = 1024 * 1024;

const EXPECTED_NAME: &str = "level.dat";

/// Cheap pre-flight filter run before reading a candidate file's contents.
///
/// The name must mention `level.dat` (any case, so `level.dat_old` and
/// backups pass) and the size must sit between 100 bytes and 1 MiB.
pub fn check_admissibility(file_name: &str, byte_len: u64) -> Result<()> {
    if !file_name.to_lowercase().contains(EXPECTED_NAME) {
        return Err(SlimeError::AdmissibilityRejected(format!(
            "{} is not a level.dat file",
            file_name
        )));
    }

    if !(MIN_LEVEL_FILE_LEN..=MAX_LEVEL_FILE_LEN).contains(&byte_len) {
        return Err(SlimeError::AdmissibilityRejected(format!(
            "{} is {} bytes, expected {} to {}",
            file_name, byte_len, MIN_LEVEL_FILE_LEN, MAX_LEVEL_FILE_LEN
        )));
    }

    Ok(())
}
