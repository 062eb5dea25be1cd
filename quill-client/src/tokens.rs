//! The one piece of client-local persisted state: the bearer token,
//! stored as a single line in a file only the current user can read.

use crate::{Result, CONFIG};
use std::fs::{self, DirBuilder};
use std::path::Path;
use tracing::debug;

pub fn load() -> Option<String> {
    load_from(&CONFIG.token_file)
}

pub fn save(token: &str) -> Result<()> {
    save_to(&CONFIG.token_file, token)
}

pub fn clear() -> Result<()> {
    clear_at(&CONFIG.token_file)
}

fn load_from(path: &Path) -> Option<String> {
    let token = fs::read_to_string(path).ok()?;
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_owned())
    }
}

fn save_to(path: &Path, token: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        DirBuilder::new().recursive(true).create(parent)?;
    }
    fs::write(path, token)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    debug!("token saved to {}", path.display());
    Ok(())
}

fn clear_at(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(ref e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn scratch_path() -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .subsec_nanos();
        temp_dir()
            .join(format!("quill-test-{}-{}", std::process::id(), nanos))
            .join("token")
    }

    #[test]
    fn round_trip() {
        let path = scratch_path();
        assert!(load_from(&path).is_none());

        save_to(&path, "sekret").unwrap();
        assert_eq!(load_from(&path).as_deref(), Some("sekret"));

        clear_at(&path).unwrap();
        assert!(load_from(&path).is_none());
        // Clearing twice is fine.
        clear_at(&path).unwrap();
    }

    #[test]
    fn blank_file_is_no_token() {
        let path = scratch_path();
        save_to(&path, "  \n").unwrap();
        assert!(load_from(&path).is_none());
    }
}
