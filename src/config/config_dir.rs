use std::path::{Path, PathBuf};

use super::error::{ConfigError, ConfigResult};

const CONFIG_FILE: &str = "config.toml";

/// `./config.toml` when `use_local`, otherwise the per-user config directory
/// with `./config.toml` as fallback.
pub fn find_config_file(use_local: bool) -> PathBuf {
    if use_local {
        return PathBuf::from(".").join(CONFIG_FILE);
    }

    user_config_file()
        .filter(|path| path.exists())
        .unwrap_or_else(|| PathBuf::from(".").join(CONFIG_FILE))
}

fn user_config_file() -> Option<PathBuf> {
    #[cfg(unix)]
    let base = std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".config"));
    #[cfg(windows)]
    let base = std::env::var_os("APPDATA").map(PathBuf::from);
    #[cfg(not(any(unix, windows)))]
    let base: Option<PathBuf> = None;

    base.map(|dir| dir.join(crate::APPLICATION_NAME).join(CONFIG_FILE))
}

pub fn read_config(use_local: bool) -> ConfigResult<Vec<u8>> {
    read_config_at(&find_config_file(use_local))
}

fn read_config_at(path: &Path) -> ConfigResult<Vec<u8>> {
    tracing::trace!("looking for config at: {}", path.display());
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let unreadable = |source| ConfigError::Unreadable {
        path: path.to_path_buf(),
        source,
    };
    let path = path.canonicalize().map_err(unreadable)?;
    tracing::debug!("using {} as configuration file", path.display());
    std::fs::read(&path).map_err(unreadable)
}

#[cfg(test)]
mod test {
    use std::fs;

    use super::*;

    #[test]
    fn local_lookup_is_cwd() {
        assert_eq!(find_config_file(true), PathBuf::from("./config.toml"));
    }

    #[cfg(unix)]
    #[test]
    fn user_file_lives_under_dot_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        unsafe {
            std::env::set_var("HOME", temp_dir.path());
        }

        let expected = temp_dir
            .path()
            .join(".config")
            .join(crate::APPLICATION_NAME)
            .join("config.toml");
        assert_eq!(user_config_file(), Some(expected.clone()));

        // not there yet, falls back to the working directory
        assert_eq!(find_config_file(false), PathBuf::from("./config.toml"));

        fs::create_dir_all(expected.parent().unwrap()).unwrap();
        fs::write(&expected, "[host]").unwrap();
        assert_eq!(find_config_file(false), expected);
    }

    #[test]
    fn reads_existing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let file_path = temp_dir.path().join("config.toml");
        fs::write(&file_path, b"[app]\njwt = 'x'").unwrap();

        assert_eq!(read_config_at(&file_path).unwrap(), b"[app]\njwt = 'x'");
    }

    #[test]
    fn missing_file_is_not_found() {
        let temp_dir = tempfile::tempdir().unwrap();
        let missing = temp_dir.path().join("nope.toml");
        match read_config_at(&missing) {
            Err(ConfigError::NotFound(path)) => assert_eq!(path, missing),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
